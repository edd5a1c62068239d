//! Form submit events and their listeners

use async_trait::async_trait;
use std::sync::Arc;

/// One submission of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    form_id: &'static str,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form_id: &'static str) -> Self {
        Self {
            form_id,
            default_prevented: false,
        }
    }

    pub fn form_id(&self) -> &'static str {
        self.form_id
    }

    /// Opt out of the form's default action (navigating to its target)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Subscriber to a form's submit events
#[async_trait]
pub trait SubmitListener: Send + Sync {
    async fn on_submit(&self, event: &mut SubmitEvent);
}

/// Form that dispatches submit events to its listeners in registration order
pub struct VideoForm {
    id: &'static str,
    listeners: Vec<Arc<dyn SubmitListener>>,
}

impl VideoForm {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn add_submit_listener(&mut self, listener: Arc<dyn SubmitListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch one submit event and hand it back once every listener ran
    pub async fn submit(&self) -> SubmitEvent {
        let mut event = SubmitEvent::new(self.id);
        tracing::debug!(form = self.id, listeners = self.listeners.len(), "Dispatching submit");

        for listener in &self.listeners {
            listener.on_submit(&mut event).await;
        }

        if !event.default_prevented() {
            tracing::debug!(form = self.id, "Submit default action not prevented");
        }
        event
    }
}

impl std::fmt::Debug for VideoForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoForm")
            .field("id", &self.id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
