//! Thin web-sys helpers used by the controller host.
//!
//! Every fallible DOM call is mapped into [`WidgetError`] so the host can use
//! `?` and log once. Requires a browser environment.

use js_sys::{Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, Event, EventTarget, HtmlElement};

use crate::error::WidgetError;
use crate::notify::NOTIFICATION_FLAGS;
use crate::scroll_lock::BODY_LOCK_STYLE;

/// The global window's document.
pub fn document() -> Result<Document, WidgetError> {
    web_sys::window().ok_or(WidgetError::NoWindow)?.document().ok_or(WidgetError::NoDocument)
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, WidgetError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| WidgetError::dom("querySelectorAll", &e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect())
}

/// Id of the nearest ancestor-or-self matching `selector`, if it has one.
pub fn closest_id(el: &Element, selector: &str) -> Result<Option<String>, WidgetError> {
    let found = el.closest(selector).map_err(|e| WidgetError::dom("closest", &e))?;
    Ok(found.map(|m| m.id()).filter(|id| !id.is_empty()))
}

/// Add or remove `class` on `el`.
pub fn set_class(el: &Element, class: &str, on: bool) -> Result<(), WidgetError> {
    let list = el.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    result.map_err(|e| WidgetError::dom("classList", &e))
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Apply or clear the scroll-lock style on the document body.
///
/// A document without a body has nothing to lock.
pub fn set_body_locked(document: &Document, locked: bool) -> Result<(), WidgetError> {
    let Some(body): Option<HtmlElement> = document.body() else {
        return Ok(());
    };
    let style = body.style();
    for (prop, value) in BODY_LOCK_STYLE {
        if locked {
            style.set_property(prop, value).map_err(|e| WidgetError::dom("style.setProperty", &e))?;
        } else {
            style.remove_property(prop).map_err(|e| WidgetError::dom("style.removeProperty", &e))?;
        }
    }
    Ok(())
}

/// Dispatch a bubbling, cancelable custom event on `modal`.
///
/// `detail` is `{ target: <modal>, modalId: <id> }`. Returns `false` if an
/// observer called `preventDefault`.
pub fn dispatch_notification(modal: &Element, event_name: &str) -> Result<bool, WidgetError> {
    let detail = Object::new();
    Reflect::set(&detail, &JsValue::from_str("target"), modal).map_err(|e| WidgetError::dom("Reflect.set", &e))?;
    Reflect::set(&detail, &JsValue::from_str("modalId"), &JsValue::from_str(&modal.id()))
        .map_err(|e| WidgetError::dom("Reflect.set", &e))?;

    let init = CustomEventInit::new();
    init.set_bubbles(NOTIFICATION_FLAGS.bubbles);
    init.set_cancelable(NOTIFICATION_FLAGS.cancelable);
    init.set_detail(&detail);

    let event = CustomEvent::new_with_event_init_dict(event_name, &init)
        .map_err(|e| WidgetError::dom("new CustomEvent", &e))?;
    modal.dispatch_event(&event).map_err(|e| WidgetError::dom("dispatchEvent", &e))
}

/// Whether `event` was targeted at `el` itself rather than a descendant.
pub fn targets_self(event: &Event, el: &Element) -> bool {
    event.target().is_some_and(|t| {
        let target: &JsValue = t.as_ref();
        let el: &JsValue = el.as_ref();
        target == el
    })
}

/// Attach `handler` to `target` for `event_type`.
///
/// The listener lives for the document lifetime; its closure is leaked.
pub fn listen<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), WidgetError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        .map_err(|e| WidgetError::dom("addEventListener", &e))?;
    closure.forget();
    Ok(())
}
