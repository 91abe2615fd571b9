//! Shared constants for the widget DOM contract.

// ── Markup contract ─────────────────────────────────────────────

/// Class carried by elements that open a modal.
pub const TRIGGER_CLASS: &str = "floating-btn";

/// Attribute on a trigger naming the modal it opens.
pub const TRIGGER_ATTR: &str = "data-modal-id";

/// Class carried by modal overlay elements.
pub const MODAL_CLASS: &str = "modal-overlay";

/// Class marking a modal as visible.
pub const ACTIVE_CLASS: &str = "active";

/// Class carried by close buttons nested inside a modal.
pub const DISMISSER_CLASS: &str = "close-btn";

// ── Notifications ───────────────────────────────────────────────

/// Custom event dispatched on a modal after it becomes visible.
pub const SHOWN_EVENT: &str = "modalShown";

/// Custom event dispatched on a modal after it is hidden.
pub const HIDDEN_EVENT: &str = "modalHidden";

// ── Timing ──────────────────────────────────────────────────────

/// Delay before a closing modal gives up its scroll-lock, in milliseconds.
/// Matches the overlay's CSS exit transition.
pub const RELEASE_DELAY_MS: u32 = 300;

// ── Keys ────────────────────────────────────────────────────────

/// Key name reported by the browser for the escape key.
pub const ESCAPE_KEY: &str = "Escape";
