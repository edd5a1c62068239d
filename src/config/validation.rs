use super::models::Config;
use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("client.base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("client.base_url '{url}' must use http or https, got '{scheme}'")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("client.endpoint '{0}' must start with '/'")]
    RelativeEndpoint(String),

    #[error("{field} must be positive")]
    ZeroValue { field: &'static str },

    #[error("download.filename must not be empty")]
    EmptyFilename,

    #[error("download.filename '{0}' must be a bare file name, not a path")]
    FilenameIsPath(String),

    #[error("download.filename '{0}' has leading or trailing whitespace")]
    PaddedFilename(String),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_client(config)?;
    validate_download(config)?;
    Ok(())
}

fn validate_client(config: &Config) -> Result<(), ValidationError> {
    let client = &config.client;

    let url = Url::parse(&client.base_url).map_err(|e| ValidationError::InvalidBaseUrl {
        url: client.base_url.clone(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::UnsupportedScheme {
            url: client.base_url.clone(),
            scheme: url.scheme().to_string(),
        });
    }

    if !client.endpoint.starts_with('/') {
        return Err(ValidationError::RelativeEndpoint(client.endpoint.clone()));
    }

    if client.connect_timeout_secs == 0 {
        return Err(ValidationError::ZeroValue {
            field: "client.connect_timeout_secs",
        });
    }
    if client.request_timeout_secs == Some(0) {
        return Err(ValidationError::ZeroValue {
            field: "client.request_timeout_secs",
        });
    }
    if client.max_video_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroValue {
            field: "client.max_video_bytes",
        });
    }

    Ok(())
}

/// The filename lands inside `output_dir`; separators would let it escape
fn validate_download(config: &Config) -> Result<(), ValidationError> {
    let filename = config.download.filename.as_str();
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }
    if filename.trim() != filename {
        return Err(ValidationError::PaddedFilename(filename.to_string()));
    }
    if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
        return Err(ValidationError::FilenameIsPath(filename.to_string()));
    }
    Ok(())
}
