//! Overridable markup contract and timing.
//!
//! Hosts whose markup uses different class or attribute names can pass a
//! partial JSON object; every missing field falls back to the defaults in
//! [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ACTIVE_CLASS, DISMISSER_CLASS, HIDDEN_EVENT, MODAL_CLASS, RELEASE_DELAY_MS, SHOWN_EVENT, TRIGGER_ATTR,
    TRIGGER_CLASS,
};
use crate::error::WidgetError;

/// Names and timing the controller uses when scanning and mutating the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub trigger_class: String,
    pub trigger_attr: String,
    pub modal_class: String,
    pub active_class: String,
    pub dismisser_class: String,
    pub shown_event: String,
    pub hidden_event: String,
    /// Delay before a closed modal releases its scroll-lock share.
    pub release_delay_ms: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            trigger_class: TRIGGER_CLASS.to_owned(),
            trigger_attr: TRIGGER_ATTR.to_owned(),
            modal_class: MODAL_CLASS.to_owned(),
            active_class: ACTIVE_CLASS.to_owned(),
            dismisser_class: DISMISSER_CLASS.to_owned(),
            shown_event: SHOWN_EVENT.to_owned(),
            hidden_event: HIDDEN_EVENT.to_owned(),
            release_delay_ms: RELEASE_DELAY_MS,
        }
    }
}

impl WidgetConfig {
    /// Parse a (possibly partial) JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Config`] if `json` is not a valid config object,
    /// or [`WidgetError::InvalidConfig`] if any class or event name is empty.
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), WidgetError> {
        let names = [
            ("triggerClass", &self.trigger_class),
            ("triggerAttr", &self.trigger_attr),
            ("modalClass", &self.modal_class),
            ("activeClass", &self.active_class),
            ("dismisserClass", &self.dismisser_class),
            ("shownEvent", &self.shown_event),
            ("hiddenEvent", &self.hidden_event),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(WidgetError::InvalidConfig(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// CSS selector matching every trigger.
    #[must_use]
    pub fn trigger_selector(&self) -> String {
        format!(".{}", self.trigger_class)
    }

    /// CSS selector matching every modal overlay.
    #[must_use]
    pub fn modal_selector(&self) -> String {
        format!(".{}", self.modal_class)
    }

    /// CSS selector matching every modal overlay currently visible.
    #[must_use]
    pub fn active_modal_selector(&self) -> String {
        format!(".{}.{}", self.modal_class, self.active_class)
    }

    /// CSS selector matching every dismisser.
    #[must_use]
    pub fn dismisser_selector(&self) -> String {
        format!(".{}", self.dismisser_class)
    }
}
