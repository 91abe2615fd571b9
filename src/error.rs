//! Internal failure taxonomy.
//!
//! None of these reach page users: missing elements are silent no-ops. They
//! exist so the DOM host can propagate with `?` and log once at the boundary.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use wasm_bindgen::JsValue;

/// Error raised while binding or driving the document.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// No global `window` (not running in a browser main thread).
    #[error("no global window available")]
    NoWindow,
    /// The window has no `document`.
    #[error("window has no document")]
    NoDocument,
    /// A DOM call threw; the message is the stringified JS exception.
    #[error("dom operation `{op}` failed: {message}")]
    Dom { op: &'static str, message: String },
    /// The config JSON could not be parsed.
    #[error("invalid widget config: {0}")]
    Config(#[from] serde_json::Error),
    /// The config parsed but holds an unusable value.
    #[error("invalid widget config: {0}")]
    InvalidConfig(String),
}

impl WidgetError {
    /// Wrap a thrown JS value from the DOM call named `op`.
    pub fn dom(op: &'static str, err: &JsValue) -> Self {
        let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
        Self::Dom { op, message }
    }
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
