//! In-memory elements that remember every value they were given.
//!
//! With `echo` on, status text and alerts are also printed to stderr, which
//! is how the CLI presents them.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Alerter, ScriptInput, StatusDisplay, TriggerButton};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
pub struct TextField {
    id: &'static str,
    value: Mutex<String>,
}

impl TextField {
    pub fn new(id: &'static str, value: impl Into<String>) -> Self {
        Self {
            id,
            value: Mutex::new(value.into()),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *lock(&self.value) = value.into();
    }
}

impl ScriptInput for TextField {
    fn value(&self) -> String {
        lock(&self.value).clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug)]
pub struct Button {
    id: &'static str,
    state: Mutex<ButtonState>,
    changes: Mutex<Vec<ButtonState>>,
}

impl Button {
    /// Enabled button with the given label
    pub fn new(id: &'static str, label: impl Into<String>) -> Self {
        Self {
            id,
            state: Mutex::new(ButtonState {
                disabled: false,
                label: label.into(),
            }),
            changes: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn state(&self) -> ButtonState {
        lock(&self.state).clone()
    }

    pub fn is_disabled(&self) -> bool {
        lock(&self.state).disabled
    }

    pub fn label(&self) -> String {
        lock(&self.state).label.clone()
    }

    /// State after each mutation, oldest first
    pub fn changes(&self) -> Vec<ButtonState> {
        lock(&self.changes).clone()
    }

    fn update(&self, f: impl FnOnce(&mut ButtonState)) {
        let mut state = lock(&self.state);
        f(&mut state);
        tracing::trace!(element = self.id, disabled = state.disabled, label = %state.label, "Button updated");
        lock(&self.changes).push(state.clone());
    }
}

impl TriggerButton for Button {
    fn set_disabled(&self, disabled: bool) {
        self.update(|s| s.disabled = disabled);
    }

    fn set_label(&self, label: &str) {
        self.update(|s| s.label = label.to_string());
    }
}

#[derive(Debug)]
pub struct StatusArea {
    id: &'static str,
    echo: bool,
    texts: Mutex<Vec<String>>,
}

impl StatusArea {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            echo: false,
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Status area that also prints each message to stderr
    pub fn echoing(id: &'static str) -> Self {
        Self {
            echo: true,
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Current text; empty until first set
    pub fn text(&self) -> String {
        lock(&self.texts).last().cloned().unwrap_or_default()
    }

    pub fn history(&self) -> Vec<String> {
        lock(&self.texts).clone()
    }
}

impl StatusDisplay for StatusArea {
    fn set_text(&self, text: &str) {
        if self.echo {
            eprintln!("{text}");
        }
        tracing::trace!(element = self.id, text, "Status updated");
        lock(&self.texts).push(text.to_string());
    }
}

#[derive(Debug, Default)]
pub struct AlertLog {
    echo: bool,
    alerts: Mutex<Vec<String>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl Alerter for AlertLog {
    fn alert(&self, message: &str) {
        if self.echo {
            eprintln!("{message}");
        }
        lock(&self.alerts).push(message.to_string());
    }
}
