//! Element handles the submit handler reads and mutates
//!
//! Handles take `&self` so one element can be shared between the page that
//! owns it and the handler that drives it.

mod elements;

pub use elements::{AlertLog, Button, ButtonState, StatusArea, TextField};

/// Identifiers of the page elements the handler is wired to
pub mod ids {
    pub const FORM: &str = "video-form";
    pub const SCRIPT: &str = "script";
    pub const GENERATE_BUTTON: &str = "generate-btn";
    pub const STATUS_AREA: &str = "status-area";
}

/// Text input holding the dialogue script
pub trait ScriptInput: Send + Sync {
    fn value(&self) -> String;
}

/// Control that triggers submission
pub trait TriggerButton: Send + Sync {
    fn set_disabled(&self, disabled: bool);
    fn set_label(&self, label: &str);
}

/// Region showing the current operation state
pub trait StatusDisplay: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Blocking notice shown to the user
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}
