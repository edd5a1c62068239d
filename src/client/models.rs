//! Wire types for `POST /api/generate-video`.
//!
//! ```json
//! // request
//! { "script": "[peter]: hey brian\n[brian]: hello" }
//!
//! // non-2xx response
//! { "detail": "Script is empty." }
//! ```
//!
//! A 2xx response carries the rendered video as an opaque byte stream.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateVideoRequest {
    pub script: String,
}

impl GenerateVideoRequest {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

/// Error payload of a rejected request.
///
/// `detail` is kept as raw JSON: the server may send a string, `null`, or
/// a validation structure, and only a non-empty string is shown verbatim.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}
