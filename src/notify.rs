//! Notifications dispatched on a modal when its visibility changes.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use crate::config::WidgetConfig;

/// Which visibility change a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Shown,
    Hidden,
}

impl Notification {
    /// DOM event type for this notification under `config`.
    #[must_use]
    pub fn event_name(self, config: &WidgetConfig) -> &str {
        match self {
            Self::Shown => &config.shown_event,
            Self::Hidden => &config.hidden_event,
        }
    }
}

/// Flags every notification is dispatched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchFlags {
    pub bubbles: bool,
    pub cancelable: bool,
}

/// Notifications bubble to the document and may be canceled by observers.
pub const NOTIFICATION_FLAGS: DispatchFlags = DispatchFlags { bubbles: true, cancelable: true };
