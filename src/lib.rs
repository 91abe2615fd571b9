//! Floating trigger buttons that open modal overlays.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It scans
//! the page for triggers (`.floating-btn[data-modal-id]`), overlays
//! (`.modal-overlay[id]`) and close buttons (`.close-btn`), then wires clicks,
//! backdrop clicks and the Escape key to show/hide operations. While any
//! modal is open the body is scroll-locked.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Browser host and testable [`controller::ControllerCore`] |
//! | [`registry`] | Discovered modals, visibility and pending releases |
//! | [`scroll_lock`] | Reference-counted body scroll-lock |
//! | [`input`] | Interaction events routed into the core |
//! | [`notify`] | `modalShown` / `modalHidden` notifications |
//! | [`config`] | Overridable class names, event names and release delay |
//! | [`dom`] | web-sys helpers |
//! | [`error`] | Internal error type |
//! | [`consts`] | Markup contract defaults |

pub mod config;
pub mod consts;
pub mod controller;
pub mod dom;
pub mod error;
pub mod input;
pub mod notify;
pub mod registry;
pub mod scroll_lock;

use wasm_bindgen::prelude::*;

use crate::config::WidgetConfig;
use crate::controller::ModalController;
use crate::error::WidgetError;

/// Create a controller over the current document with the default markup
/// contract, bind it, and return it.
///
/// # Errors
///
/// Fails outside a browser window with a document.
#[wasm_bindgen(js_name = initFloatingWidgets)]
pub fn init_floating_widgets() -> Result<ModalController, JsValue> {
    Ok(init_with(WidgetConfig::default())?)
}

/// Like [`init_floating_widgets`], with a partial JSON config.
///
/// # Errors
///
/// Fails on invalid config JSON or outside a browser window.
#[wasm_bindgen(js_name = initFloatingWidgetsWith)]
pub fn init_floating_widgets_with(config_json: &str) -> Result<ModalController, JsValue> {
    Ok(init_with(WidgetConfig::from_json(config_json)?)?)
}

fn init_with(config: WidgetConfig) -> Result<ModalController, WidgetError> {
    let controller = ModalController::new(config)?;
    controller.try_init()?;
    Ok(controller)
}

#[cfg(feature = "autostart")]
mod autostart {
    use std::cell::RefCell;

    use crate::config::WidgetConfig;
    use crate::controller::ModalController;
    use crate::dom;
    use crate::error::WidgetError;

    thread_local! {
        static INSTANCE: RefCell<Option<ModalController>> = const { RefCell::new(None) };
    }

    /// Init now if the document is interactive, otherwise on `DOMContentLoaded`.
    pub(crate) fn schedule() -> Result<(), WidgetError> {
        let document = dom::document()?;
        if document.ready_state() == "loading" {
            log::debug!("document loading; deferring floating widgets init");
            dom::listen(&document, "DOMContentLoaded", |_event| run())
        } else {
            run();
            Ok(())
        }
    }

    fn run() {
        let already = INSTANCE.with(|slot| slot.borrow().is_some());
        if already {
            return;
        }
        match super::init_with(WidgetConfig::default()) {
            Ok(controller) => INSTANCE.with(|slot| *slot.borrow_mut() = Some(controller)),
            Err(err) => log::warn!("floating widgets auto-init failed: {err}"),
        }
    }
}

/// Module entry: install browser logging and self-initialize.
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("keeping existing logger: {err}");
    }
    if let Err(err) = autostart::schedule() {
        log::warn!("floating widgets not started: {err}");
    }
}
