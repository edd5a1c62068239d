//! Submit handler: script in, video file out
//!
//! Flow per submission: Idle -> Busy -> (Success | Failure | Exception) -> Idle.
//!
//! - empty or whitespace-only script: alert, nothing else touched
//! - 2xx: body saved through the [`DownloadSink`] under a fixed filename
//! - other status: `Error: <detail>` from the JSON error body
//! - transport, decode or write failure: generic message, error logged
//!
//! The button is restored by a drop guard, so every exit path (including a
//! panic unwinding through the handler) leaves the form usable.

pub mod messages;

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::client::{ClientError, GenerateVideoRequest, VideoApi};
use crate::download::{DownloadError, DownloadLink, DownloadSink};
use crate::events::{SubmitEvent, SubmitListener};
use crate::humanize::ByteSize;
use crate::observability::Metrics;
use crate::ui::{Alerter, ScriptInput, StatusDisplay, TriggerButton};

/// Anything that ends a submission on the generic-error path
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// How a submission ended
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing to send; the user was alerted
    EmptyScript,
    Downloaded { path: PathBuf, bytes: u64 },
    ServerError { status: u16, message: String },
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_downloaded(&self) -> bool {
        matches!(self, SubmitOutcome::Downloaded { .. })
    }
}

/// Elements the handler works with, injected by the page that owns them
#[derive(Clone)]
pub struct UiHandles {
    pub script: Arc<dyn ScriptInput>,
    pub button: Arc<dyn TriggerButton>,
    pub status: Arc<dyn StatusDisplay>,
    pub alerts: Arc<dyn Alerter>,
}

pub struct SubmitHandler {
    api: Arc<dyn VideoApi>,
    downloads: Arc<dyn DownloadSink>,
    ui: UiHandles,
    filename: String,
    metrics: Arc<Metrics>,
    outcomes: Option<mpsc::UnboundedSender<SubmitOutcome>>,
}

impl SubmitHandler {
    pub fn new(
        api: Arc<dyn VideoApi>,
        downloads: Arc<dyn DownloadSink>,
        ui: UiHandles,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            api,
            downloads,
            ui,
            filename: messages::DEFAULT_FILENAME.to_string(),
            metrics,
            outcomes: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Forward each outcome of a listener-driven submission to `tx`
    pub fn with_outcome_channel(mut self, tx: mpsc::UnboundedSender<SubmitOutcome>) -> Self {
        self.outcomes = Some(tx);
        self
    }

    /// Run one submission to completion
    pub async fn handle(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        let script = self.ui.script.value();
        if script.trim().is_empty() {
            debug!(form = event.form_id(), "Empty script, not submitting");
            self.metrics.empty_script();
            self.ui.alerts.alert(messages::EMPTY_SCRIPT);
            return SubmitOutcome::EmptyScript;
        }

        self.metrics.submission();
        let _busy = BusyGuard::engage(self.ui.button.as_ref());
        self.ui.status.set_text(messages::SENDING);

        match self.request(script).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Fetch error");
                self.metrics.failure();
                self.ui.status.set_text(messages::UNEXPECTED_ERROR);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn request(&self, script: String) -> Result<SubmitOutcome, SubmitError> {
        let response = self.api.generate(&GenerateVideoRequest { script }).await?;
        let status = response.status();

        if !response.is_success() {
            let body = response.error_body().await?;
            let message = messages::server_error(body.message());
            warn!(status, %message, "Video generation rejected");
            self.metrics.server_error();
            self.ui.status.set_text(&message);
            return Ok(SubmitOutcome::ServerError { status, message });
        }

        info!(
            status,
            content_type = response.content_type().unwrap_or("-"),
            "Video generated"
        );
        self.ui.status.set_text(messages::GENERATED);

        let video = response.bytes().await?;
        let bytes = video.len() as u64;
        let path = self.download(video).await?;

        info!(path = %path.display(), size = %ByteSize(bytes), "Download complete");
        self.metrics.download();
        self.ui.status.set_text(messages::DOWNLOAD_STARTED);
        Ok(SubmitOutcome::Downloaded { path, bytes })
    }

    /// Object URL is revoked whether or not the save succeeded
    async fn download(&self, video: Bytes) -> Result<PathBuf, DownloadError> {
        let href = self.downloads.create_object_url(video);
        let link = DownloadLink {
            href,
            filename: self.filename.clone(),
        };

        let saved = self.downloads.save(&link).await;
        self.downloads.revoke_object_url(&href);
        saved
    }
}

#[async_trait]
impl SubmitListener for SubmitHandler {
    async fn on_submit(&self, event: &mut SubmitEvent) {
        let outcome = self.handle(event).await;
        debug!(?outcome, "Submission settled");

        if let Some(tx) = &self.outcomes {
            // Receiver gone means nobody is waiting on the result
            let _ = tx.send(outcome);
        }
    }
}

/// Disables the trigger for its lifetime
struct BusyGuard<'a> {
    button: &'a dyn TriggerButton,
}

impl<'a> BusyGuard<'a> {
    fn engage(button: &'a dyn TriggerButton) -> Self {
        button.set_disabled(true);
        button.set_label(messages::BUSY_LABEL);
        Self { button }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.button.set_disabled(false);
        self.button.set_label(messages::IDLE_LABEL);
    }
}
