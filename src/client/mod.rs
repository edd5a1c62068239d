//! Client side of the video generation endpoint
//!
//! [`VideoApi::generate`] resolves as soon as the response head is in; the
//! body is pulled afterwards through [`ApiResponse::bytes`] or
//! [`ApiResponse::error_body`], so callers can report progress in between.

mod error;
mod http;
pub mod models;

pub use error::{ClientError, Result};
pub use http::HttpVideoApi;
pub use models::{ErrorBody, GenerateVideoRequest};

use async_trait::async_trait;
use bytes::Bytes;

/// Video generation backend
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Send the script; resolves once the status line and headers arrive
    async fn generate(&self, request: &GenerateVideoRequest) -> Result<ApiResponse>;
}

/// Not-yet-consumed response body
#[async_trait]
pub trait ResponseBody: Send {
    async fn read_all(self: Box<Self>) -> Result<Bytes>;
}

#[async_trait]
impl ResponseBody for Bytes {
    async fn read_all(self: Box<Self>) -> Result<Bytes> {
        Ok(*self)
    }
}

/// Response head plus a lazily read body
pub struct ApiResponse {
    status: u16,
    content_type: Option<String>,
    body: Box<dyn ResponseBody>,
}

impl ApiResponse {
    pub fn new(status: u16, content_type: Option<String>, body: Box<dyn ResponseBody>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// Response whose body is already in memory
    pub fn from_bytes(status: u16, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        Self::new(status, content_type.map(str::to_string), Box::new(body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub async fn bytes(self) -> Result<Bytes> {
        self.body.read_all().await
    }

    /// Read the body as a JSON [`ErrorBody`]; invalid JSON is [`ClientError::Decode`]
    pub async fn error_body(self) -> Result<ErrorBody> {
        let raw = self.bytes().await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

impl std::fmt::Debug for ApiResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::from_bytes(200, None, "").is_success());
        assert!(ApiResponse::from_bytes(206, None, "").is_success());
        assert!(!ApiResponse::from_bytes(302, None, "").is_success());
        assert!(!ApiResponse::from_bytes(400, None, "").is_success());
        assert!(!ApiResponse::from_bytes(500, None, "").is_success());
    }

    #[tokio::test]
    async fn test_error_body_parses_detail() {
        let response = ApiResponse::from_bytes(
            400,
            Some("application/json"),
            r#"{"detail":"No valid dialogue lines found in script."}"#,
        );

        let body = response.error_body().await.unwrap();
        assert_eq!(body.message(), Some("No valid dialogue lines found in script."));
    }

    #[tokio::test]
    async fn test_error_body_rejects_non_json() {
        let response = ApiResponse::from_bytes(502, Some("text/html"), "<h1>Bad Gateway</h1>");

        assert!(matches!(
            response.error_body().await,
            Err(ClientError::Decode(_))
        ));
    }
}
