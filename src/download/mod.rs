//! Object URLs and file downloads
//!
//! A downloaded body is parked behind an [`ObjectUrl`], handed to a
//! [`DownloadLink`] carrying the target filename, saved, and then released.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use uuid::Uuid;

use crate::config::DownloadConfig;
use crate::humanize::ByteSize;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("object URL not found or already revoked: {0}")]
    UnknownObjectUrl(ObjectUrl),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DownloadError>;

const OBJECT_URL_PREFIX: &str = "blob:reelgen/";

/// Temporary reference to bytes held by a [`DownloadSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectUrl(Uuid);

impl ObjectUrl {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectUrl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", OBJECT_URL_PREFIX, self.0)
    }
}

/// Link that saves `href` under `filename` when clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: ObjectUrl,
    pub filename: String,
}

/// Destination for downloaded videos
#[async_trait]
pub trait DownloadSink: Send + Sync {
    fn create_object_url(&self, data: Bytes) -> ObjectUrl;

    /// Save the bytes behind `link.href`; returns where they went
    async fn save(&self, link: &DownloadLink) -> Result<PathBuf>;

    /// Release the bytes; `false` if the URL was unknown
    fn revoke_object_url(&self, url: &ObjectUrl) -> bool;
}

/// Sink that writes into a directory on disk
#[derive(Debug)]
pub struct FileDownloads {
    output_dir: PathBuf,
    objects: Mutex<HashMap<ObjectUrl, Bytes>>,
}

impl FileDownloads {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(config.output_dir.clone())
    }

    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    /// Number of object URLs not yet revoked
    pub fn live_objects(&self) -> usize {
        self.objects().len()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<ObjectUrl, Bytes>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DownloadSink for FileDownloads {
    fn create_object_url(&self, data: Bytes) -> ObjectUrl {
        let url = ObjectUrl::new();
        tracing::debug!(%url, size = %ByteSize(data.len() as u64), "Object URL created");
        self.objects().insert(url, data);
        url
    }

    async fn save(&self, link: &DownloadLink) -> Result<PathBuf> {
        // Bytes is refcounted; the clone keeps the lock out of the await
        let data = self
            .objects()
            .get(&link.href)
            .cloned()
            .ok_or(DownloadError::UnknownObjectUrl(link.href))?;

        let path = self.output_dir.join(&link.filename);
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| DownloadError::Write {
                path: self.output_dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, &data)
            .await
            .map_err(|source| DownloadError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), size = %ByteSize(data.len() as u64), "Video saved");
        Ok(path)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) -> bool {
        let removed = self.objects().remove(url).is_some();
        tracing::debug!(%url, removed, "Object URL revoked");
        removed
    }
}
