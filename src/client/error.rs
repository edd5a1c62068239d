use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("response body of {actual} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { actual: u64, limit: u64 },

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_builder() {
            ClientError::InvalidUrl(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
