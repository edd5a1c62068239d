//! Configuration management for reelgen
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use reelgen::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Posting scripts to: {}", config.client.base_url);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `REELGEN__<section>__<key>`
//!
//! Examples:
//! - `REELGEN__CLIENT__BASE_URL=https://my-app.onrender.com`
//! - `REELGEN__CLIENT__MAX_VIDEO_BYTES=256MB`
//! - `REELGEN__DOWNLOAD__OUTPUT_DIR=/tmp/videos`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/reelgen.toml`.
//! This can be overridden using the `REELGEN_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{ClientConfig, Config, DownloadConfig, TelemetryConfig};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Failed to render configuration: {0}")]
    RenderError(#[from] toml::ser::Error),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`REELGEN__*`)
    /// 2. TOML file (default: `config/reelgen.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = Self::read_from_path(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load file and environment layers without validating, so callers can
    /// apply their own overrides before calling [`Config::validate`]
    pub fn read_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        Ok(sources::load_from_sources(path)?)
    }

    /// Path of the configuration file: `REELGEN_CONFIG` or `config/reelgen.toml`
    pub fn default_path() -> PathBuf {
        sources::config_path()
    }

    /// Validate the merged configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self)?;
        Ok(())
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
