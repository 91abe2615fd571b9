//! Modal controller: show/hide state, scroll-lock and event routing.
//!
//! ARCHITECTURE
//! ============
//! `ControllerCore` owns every decision and returns [`Action`]s; it has no
//! browser dependency and is what the unit tests drive. `ModalController`
//! owns the document, binds listeners, applies actions to the DOM and runs
//! the deferred release timers.
//!
//! Release timing: hiding a modal removes its `active` class at once but
//! keeps its scroll-lock share until a release task fires after the exit
//! transition. Reopening the modal inside that window cancels the task, so a
//! stale release can never unlock a modal that is visible again.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, KeyboardEvent};

use crate::config::WidgetConfig;
use crate::dom;
use crate::error::WidgetError;
use crate::input::{Key, UiEvent};
use crate::notify::Notification;
use crate::registry::{ModalRegistry, ReleaseToken};
use crate::scroll_lock::{LockChange, ScrollLock};

/// DOM mutations requested by the core, applied in order by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add (`true`) or remove (`false`) the active class on a modal.
    SetVisible { modal: String, visible: bool },
    /// Apply the body scroll-lock style.
    LockBody,
    /// Clear the body scroll-lock style.
    UnlockBody,
    /// Start the release timer for a closing modal.
    ScheduleRelease { modal: String, token: ReleaseToken, delay_ms: u32 },
    /// Stop a modal's pending release timer.
    CancelRelease { modal: String },
    /// Dispatch a notification on a modal.
    Notify { modal: String, kind: Notification },
}

fn lock_action(change: LockChange) -> Option<Action> {
    match change {
        LockChange::Engage => Some(Action::LockBody),
        LockChange::Disengage => Some(Action::UnlockBody),
        LockChange::Unchanged => None,
    }
}

/// Controller state independent of the browser.
#[derive(Debug, Clone)]
pub struct ControllerCore {
    registry: ModalRegistry,
    lock: ScrollLock,
    release_delay_ms: u32,
}

impl Default for ControllerCore {
    fn default() -> Self {
        Self::new(crate::consts::RELEASE_DELAY_MS)
    }
}

impl ControllerCore {
    #[must_use]
    pub fn new(release_delay_ms: u32) -> Self {
        Self { registry: ModalRegistry::new(), lock: ScrollLock::new(), release_delay_ms }
    }

    // --- Discovery ---

    /// Register a discovered modal. A modal already marked visible in the
    /// markup takes a lock share immediately.
    pub fn register_modal(&mut self, id: &str, visible: bool) -> Vec<Action> {
        if !self.registry.insert_modal(id, visible) {
            return Vec::new();
        }
        if visible { lock_action(self.lock.acquire(id)).into_iter().collect() } else { Vec::new() }
    }

    pub fn register_trigger(&mut self) {
        self.registry.note_trigger();
    }

    pub fn register_dismisser(&mut self) {
        self.registry.note_dismisser();
    }

    // --- Operations ---

    /// Make `id` visible and hold scroll-lock for it. Unknown ids are ignored.
    pub fn show(&mut self, id: &str) -> Vec<Action> {
        if !self.registry.contains(id) {
            return Vec::new();
        }
        let mut actions = vec![Action::SetVisible { modal: id.to_owned(), visible: true }];
        self.registry.set_visible(id, true);
        if self.registry.cancel_release(id).is_some() {
            actions.push(Action::CancelRelease { modal: id.to_owned() });
        }
        actions.extend(lock_action(self.lock.acquire(id)));
        actions.push(Action::Notify { modal: id.to_owned(), kind: Notification::Shown });
        actions
    }

    /// Hide `id` now and schedule its lock release. Unknown ids are ignored.
    pub fn hide(&mut self, id: &str) -> Vec<Action> {
        if !self.registry.contains(id) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.close_into(id, &mut actions);
        actions.push(Action::Notify { modal: id.to_owned(), kind: Notification::Hidden });
        actions
    }

    /// Adopt the document's view of which modals are visible. Overlays made
    /// active by page code become visible here without taking a lock share.
    pub fn sync_visibility(&mut self, active: &[String]) {
        self.registry.sync_visible(active);
    }

    /// Hide every visible modal without notifications.
    pub fn hide_all(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        for id in self.registry.visible_ids() {
            self.close_into(&id, &mut actions);
        }
        actions
    }

    fn close_into(&mut self, id: &str, actions: &mut Vec<Action>) {
        self.registry.set_visible(id, false);
        actions.push(Action::SetVisible { modal: id.to_owned(), visible: false });
        if !self.lock.holds(id) {
            return;
        }
        if let Some((token, previous)) = self.registry.begin_release(id) {
            if previous.is_some() {
                actions.push(Action::CancelRelease { modal: id.to_owned() });
            }
            actions.push(Action::ScheduleRelease { modal: id.to_owned(), token, delay_ms: self.release_delay_ms });
        }
    }

    /// A release timer fired. Stale or canceled tokens do nothing.
    pub fn release_elapsed(&mut self, id: &str, token: ReleaseToken) -> Vec<Action> {
        if !self.registry.finish_release(id, token) {
            return Vec::new();
        }
        lock_action(self.lock.release(id)).into_iter().collect()
    }

    /// Route an interaction event to the matching operation.
    pub fn handle(&mut self, event: UiEvent) -> Vec<Action> {
        match event {
            UiEvent::TriggerClicked { target: Some(id) } => self.show(&id),
            UiEvent::DismisserClicked { modal: Some(id) } => self.hide(&id),
            UiEvent::OverlayClicked { modal, on_backdrop: true } => self.hide(&modal),
            UiEvent::KeyDown(key) if key.is_escape() => self.hide_all(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn knows(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.registry.is_visible(id)
    }

    #[must_use]
    pub fn visible_modals(&self) -> Vec<String> {
        self.registry.visible_ids()
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_locked()
    }

    #[cfg(test)]
    pub(crate) fn pending_release(&self, id: &str) -> Option<ReleaseToken> {
        self.registry.pending_release(id)
    }

    #[must_use]
    pub fn registry(&self) -> &ModalRegistry {
        &self.registry
    }
}

struct Shared {
    config: WidgetConfig,
    document: Document,
    core: RefCell<ControllerCore>,
    timers: RefCell<HashMap<String, Timeout>>,
}

/// Browser-bound controller. Cloning shares the same state.
#[wasm_bindgen(js_name = FloatingWidgets)]
#[derive(Clone)]
pub struct ModalController {
    shared: Rc<Shared>,
}

impl ModalController {
    /// Controller over the global document, with nothing bound yet.
    ///
    /// # Errors
    ///
    /// Fails outside a browser window with a document.
    pub fn new(config: WidgetConfig) -> Result<Self, WidgetError> {
        Ok(Self::with_document(dom::document()?, config))
    }

    #[must_use]
    pub fn with_document(document: Document, config: WidgetConfig) -> Self {
        let core = ControllerCore::new(config.release_delay_ms);
        Self {
            shared: Rc::new(Shared {
                config,
                document,
                core: RefCell::new(core),
                timers: RefCell::new(HashMap::new()),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.shared.config
    }

    /// Scan the document and bind every trigger, modal and dismisser, plus
    /// the document Escape handler.
    ///
    /// # Errors
    ///
    /// Fails if a selector query or the document keydown binding fails.
    /// Individual elements that fail to bind are logged and skipped.
    pub fn try_init(&self) -> Result<(), WidgetError> {
        let config = &self.shared.config;
        let document = &self.shared.document;

        for modal in dom::query_all(document, &config.modal_selector())? {
            log_failure("bind modal", self.try_bind_modal(&modal));
        }
        for trigger in dom::query_all(document, &config.trigger_selector())? {
            log_failure("bind trigger", self.try_bind_trigger(&trigger));
        }
        for dismisser in dom::query_all(document, &config.dismisser_selector())? {
            log_failure("bind dismisser", self.try_bind_dismisser(&dismisser));
        }

        let shared = Rc::clone(&self.shared);
        dom::listen(document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                let key = Key(key);
                if key.is_escape() {
                    sync_from_document(&shared);
                }
                route(&shared, UiEvent::KeyDown(key));
            }
        })?;

        let registry = self.shared.core.borrow().registry().clone();
        log::debug!(
            "floating widgets bound: {} modals, {} triggers, {} dismissers",
            registry.modal_count(),
            registry.trigger_count(),
            registry.dismisser_count()
        );
        Ok(())
    }

    fn try_bind_trigger(&self, el: &Element) -> Result<(), WidgetError> {
        let shared = Rc::clone(&self.shared);
        let trigger = el.clone();
        dom::listen(el, "click", move |_event| {
            let target = trigger.get_attribute(&shared.config.trigger_attr).filter(|id| !id.is_empty());
            if let Some(id) = target.as_deref() {
                ensure_registered(&shared, id);
            }
            route(&shared, UiEvent::TriggerClicked { target });
        })?;
        self.shared.core.borrow_mut().register_trigger();
        Ok(())
    }

    fn try_bind_modal(&self, el: &Element) -> Result<(), WidgetError> {
        let id = el.id();
        if id.is_empty() {
            log::debug!("skipping modal overlay without id");
            return Ok(());
        }
        let visible = dom::has_class(el, &self.shared.config.active_class);
        let actions = self.shared.core.borrow_mut().register_modal(&id, visible);
        apply(&self.shared, actions);

        let shared = Rc::clone(&self.shared);
        let overlay = el.clone();
        dom::listen(el, "click", move |event| {
            let on_backdrop = dom::targets_self(&event, &overlay);
            route(&shared, UiEvent::OverlayClicked { modal: overlay.id(), on_backdrop });
        })
    }

    fn try_bind_dismisser(&self, el: &Element) -> Result<(), WidgetError> {
        let shared = Rc::clone(&self.shared);
        let dismisser = el.clone();
        dom::listen(el, "click", move |_event| {
            let modal = match dom::closest_id(&dismisser, &shared.config.modal_selector()) {
                Ok(found) => found,
                Err(err) => {
                    log::warn!("close button lookup failed: {err}");
                    None
                }
            };
            if let Some(id) = modal.as_deref() {
                ensure_registered(&shared, id);
            }
            route(&shared, UiEvent::DismisserClicked { modal });
        })?;
        self.shared.core.borrow_mut().register_dismisser();
        Ok(())
    }
}

#[wasm_bindgen(js_class = FloatingWidgets)]
impl ModalController {
    /// Scan and bind the document, returning the controller for chaining.
    /// Calling this twice binds every listener twice.
    pub fn init(&self) -> ModalController {
        log_failure("init", self.try_init());
        self.clone()
    }

    #[wasm_bindgen(js_name = showModal)]
    pub fn show_modal(&self, modal_id: &str) {
        ensure_registered(&self.shared, modal_id);
        let actions = self.shared.core.borrow_mut().show(modal_id);
        apply(&self.shared, actions);
    }

    #[wasm_bindgen(js_name = hideModal)]
    pub fn hide_modal(&self, modal_id: &str) {
        ensure_registered(&self.shared, modal_id);
        let actions = self.shared.core.borrow_mut().hide(modal_id);
        apply(&self.shared, actions);
    }

    #[wasm_bindgen(js_name = hideAllModals)]
    pub fn hide_all_modals(&self) {
        sync_from_document(&self.shared);
        let actions = self.shared.core.borrow_mut().hide_all();
        apply(&self.shared, actions);
    }

    /// Wire a trigger added after `init`.
    #[wasm_bindgen(js_name = bindTrigger)]
    pub fn bind_trigger(&self, el: &Element) {
        log_failure("bind trigger", self.try_bind_trigger(el));
    }

    /// Wire a modal overlay added after `init`.
    #[wasm_bindgen(js_name = bindModal)]
    pub fn bind_modal(&self, el: &Element) {
        log_failure("bind modal", self.try_bind_modal(el));
    }

    /// Wire a close button added after `init`.
    #[wasm_bindgen(js_name = bindDismisser)]
    pub fn bind_dismisser(&self, el: &Element) {
        log_failure("bind dismisser", self.try_bind_dismisser(el));
    }

    /// Whether `modal_id` names an overlay currently carrying the active class.
    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self, modal_id: &str) -> bool {
        let config = &self.shared.config;
        self.shared
            .document
            .get_element_by_id(modal_id)
            .is_some_and(|el| dom::has_class(&el, &config.modal_class) && dom::has_class(&el, &config.active_class))
    }

    /// Ids of every overlay in the document carrying the active class.
    #[wasm_bindgen(js_name = visibleModals)]
    pub fn visible_modals(&self) -> Vec<String> {
        match active_modal_ids(&self.shared) {
            Ok(ids) => ids,
            Err(err) => {
                log::warn!("visible modal query failed: {err}");
                Vec::new()
            }
        }
    }

    #[wasm_bindgen(js_name = isScrollLocked)]
    pub fn is_scroll_locked(&self) -> bool {
        self.shared.core.borrow().is_scroll_locked()
    }
}

fn log_failure(what: &str, result: Result<(), WidgetError>) {
    if let Err(err) = result {
        log::warn!("{what}: {err}");
    }
}

fn active_modal_ids(shared: &Rc<Shared>) -> Result<Vec<String>, WidgetError> {
    let selector = shared.config.active_modal_selector();
    Ok(dom::query_all(&shared.document, &selector)?
        .iter()
        .map(Element::id)
        .filter(|id| !id.is_empty())
        .collect())
}

/// Refresh core visibility from the active classes in the document, so
/// overlays opened or closed by page code are seen by hide-all.
fn sync_from_document(shared: &Rc<Shared>) {
    match active_modal_ids(shared) {
        Ok(active) => {
            for id in &active {
                ensure_registered(shared, id);
            }
            shared.core.borrow_mut().sync_visibility(&active);
        }
        Err(err) => log::warn!("active modal query failed: {err}"),
    }
}

/// Register a modal the scan never saw, so ids resolved at call time still
/// work for overlays inserted later. Its listeners are not bound.
///
/// It is recorded hidden and holds no lock share: this controller never
/// locked the body for it.
fn ensure_registered(shared: &Rc<Shared>, id: &str) {
    if id.is_empty() || shared.core.borrow().knows(id) {
        return;
    }
    let Some(el) = shared.document.get_element_by_id(id) else {
        return;
    };
    if !dom::has_class(&el, &shared.config.modal_class) {
        return;
    }
    let actions = shared.core.borrow_mut().register_modal(id, false);
    apply(shared, actions);
}

fn route(shared: &Rc<Shared>, event: UiEvent) {
    let actions = shared.core.borrow_mut().handle(event);
    apply(shared, actions);
}

/// Apply actions in order. No core borrow is held here, so notification
/// observers may call back into the controller.
fn apply(shared: &Rc<Shared>, actions: Vec<Action>) {
    for action in actions {
        log_failure("apply", apply_one(shared, action));
    }
}

fn apply_one(shared: &Rc<Shared>, action: Action) -> Result<(), WidgetError> {
    let config = &shared.config;
    match action {
        Action::SetVisible { modal, visible } => {
            if let Some(el) = shared.document.get_element_by_id(&modal) {
                dom::set_class(&el, &config.active_class, visible)?;
            }
        }
        Action::LockBody => dom::set_body_locked(&shared.document, true)?,
        Action::UnlockBody => dom::set_body_locked(&shared.document, false)?,
        Action::ScheduleRelease { modal, token, delay_ms } => {
            let weak = Rc::downgrade(shared);
            let id = modal.clone();
            // The fired timer stays in the map until replaced or canceled;
            // dropping it from inside its own callback would free the running closure.
            let timeout = Timeout::new(delay_ms, move || {
                if let Some(shared) = weak.upgrade() {
                    let actions = shared.core.borrow_mut().release_elapsed(&id, token);
                    apply(&shared, actions);
                }
            });
            shared.timers.borrow_mut().insert(modal, timeout);
        }
        Action::CancelRelease { modal } => {
            // Dropping a Timeout clears it.
            shared.timers.borrow_mut().remove(&modal);
        }
        Action::Notify { modal, kind } => {
            if let Some(el) = shared.document.get_element_by_id(&modal) {
                let proceeded = dom::dispatch_notification(&el, kind.event_name(config))?;
                log::debug!("{modal}: {kind:?} dispatched (default prevented: {})", !proceeded);
            }
        }
    }
    Ok(())
}
