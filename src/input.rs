//! Interaction events routed from DOM listeners into the controller core.
//!
//! The DOM host resolves which element was hit (trigger attribute, enclosing
//! overlay, backdrop vs. content) and hands the core a `UiEvent` carrying only
//! the ids it needs.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::ESCAPE_KEY;

/// A keyboard key as reported by the browser (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == ESCAPE_KEY
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// An interaction the core reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A trigger was clicked; `target` is its modal-id attribute, if present.
    TriggerClicked { target: Option<String> },
    /// A dismisser was clicked; `modal` is its nearest enclosing overlay id.
    DismisserClicked { modal: Option<String> },
    /// An overlay received a click.
    OverlayClicked {
        modal: String,
        /// The event target is the overlay itself rather than its content.
        on_backdrop: bool,
    },
    /// A key was pressed anywhere in the document.
    KeyDown(Key),
}
