//! reqwest-backed [`VideoApi`]

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, Url, header};
use tracing::{debug, warn};

use super::{ApiResponse, ClientError, GenerateVideoRequest, ResponseBody, Result, VideoApi};
use crate::config::ClientConfig;

/// HTTP client for the generation endpoint
#[derive(Debug, Clone)]
pub struct HttpVideoApi {
    client: Client,
    endpoint: Url,
    max_body_bytes: u64,
}

impl HttpVideoApi {
    /// Build a client for `config.base_url` + `config.endpoint`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        let endpoint = base
            .join(&config.endpoint)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.endpoint, e)))?;

        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(&config.user_agent);

        // No timeout unless configured: generation can legitimately take minutes
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            max_body_bytes: config.max_video_bytes.as_u64(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl VideoApi for HttpVideoApi {
    async fn generate(&self, request: &GenerateVideoRequest) -> Result<ApiResponse> {
        debug!(url = %self.endpoint, script_len = request.script.len(), "Posting script");

        let body = serde_json::to_vec(request)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        debug!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("-"),
            content_length = response.content_length(),
            "Response head received"
        );

        Ok(ApiResponse::new(
            status.as_u16(),
            content_type,
            Box::new(LimitedBody {
                response,
                limit: self.max_body_bytes,
            }),
        ))
    }
}

/// reqwest body with a size cap checked before and after reading
struct LimitedBody {
    response: Response,
    limit: u64,
}

#[async_trait]
impl ResponseBody for LimitedBody {
    async fn read_all(self: Box<Self>) -> Result<Bytes> {
        let LimitedBody { mut response, limit } = *self;

        if let Some(len) = response.content_length() {
            if len > limit {
                warn!(content_length = len, limit, "Refusing oversized response");
                return Err(ClientError::BodyTooLarge { actual: len, limit });
            }
        }

        // Chunked responses carry no length up front
        let mut buf = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let actual = (buf.len() + chunk.len()) as u64;
            if actual > limit {
                warn!(read = actual, limit, "Response grew past limit");
                return Err(ClientError::BodyTooLarge { actual, limit });
            }
            buf.extend_from_slice(&chunk);
        }

        Ok(Bytes::from(buf))
    }
}
