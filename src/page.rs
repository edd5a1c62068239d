//! Page wiring: builds the elements, injects them into a [`SubmitHandler`]
//! and subscribes the handler to the form.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::client::VideoApi;
use crate::download::DownloadSink;
use crate::events::{SubmitEvent, VideoForm};
use crate::handler::{SubmitHandler, SubmitOutcome, UiHandles, messages};
use crate::observability::Metrics;
use crate::ui::{AlertLog, Button, StatusArea, TextField, ids};

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub filename: String,
    /// Print status text and alerts to stderr
    pub echo: bool,
    pub metrics: Arc<Metrics>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            filename: messages::DEFAULT_FILENAME.to_string(),
            echo: false,
            metrics: Arc::new(Metrics::new()),
        }
    }
}

pub struct Page {
    form: VideoForm,
    pub script: Arc<TextField>,
    pub button: Arc<Button>,
    pub status: Arc<StatusArea>,
    pub alerts: Arc<AlertLog>,
    pub metrics: Arc<Metrics>,
    outcomes: mpsc::UnboundedReceiver<SubmitOutcome>,
}

impl Page {
    pub fn mount(
        api: Arc<dyn VideoApi>,
        downloads: Arc<dyn DownloadSink>,
        options: PageOptions,
    ) -> Self {
        let script = Arc::new(TextField::new(ids::SCRIPT, ""));
        let button = Arc::new(Button::new(ids::GENERATE_BUTTON, messages::IDLE_LABEL));
        let (status, alerts) = if options.echo {
            (StatusArea::echoing(ids::STATUS_AREA), AlertLog::echoing())
        } else {
            (StatusArea::new(ids::STATUS_AREA), AlertLog::new())
        };
        let status = Arc::new(status);
        let alerts = Arc::new(alerts);

        let ui = UiHandles {
            script: script.clone(),
            button: button.clone(),
            status: status.clone(),
            alerts: alerts.clone(),
        };

        let (tx, outcomes) = mpsc::unbounded_channel();
        let handler = SubmitHandler::new(api, downloads, ui, options.metrics.clone())
            .with_filename(options.filename)
            .with_outcome_channel(tx);

        let mut form = VideoForm::new(ids::FORM);
        form.add_submit_listener(Arc::new(handler));

        Self {
            form,
            script,
            button,
            status,
            alerts,
            metrics: options.metrics,
            outcomes,
        }
    }

    pub fn form(&self) -> &VideoForm {
        &self.form
    }

    /// Submit the form and collect what the handler did with it
    pub async fn submit(&mut self) -> (SubmitEvent, Option<SubmitOutcome>) {
        let event = self.form.submit().await;
        // Listeners have finished, so the outcome is already queued
        let outcome = self.outcomes.try_recv().ok();
        (event, outcome)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("form", &self.form)
            .field("button", &self.button.state())
            .field("status", &self.status.text())
            .finish_non_exhaustive()
    }
}
