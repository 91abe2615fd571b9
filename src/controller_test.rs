use super::*;

// =============================================================
// Helpers
// =============================================================

fn core_with(ids: &[&str]) -> ControllerCore {
    let mut core = ControllerCore::default();
    for id in ids {
        assert!(core.register_modal(id, false).is_empty());
    }
    core
}

fn scheduled_token(actions: &[Action], id: &str) -> ReleaseToken {
    actions
        .iter()
        .find_map(|a| match a {
            Action::ScheduleRelease { modal, token, .. } if modal == id => Some(*token),
            _ => None,
        })
        .expect("release should be scheduled")
}

fn has_notify(actions: &[Action], id: &str, kind: Notification) -> bool {
    actions.contains(&Action::Notify { modal: id.to_owned(), kind })
}

fn set_visible(id: &str, visible: bool) -> Action {
    Action::SetVisible { modal: id.to_owned(), visible }
}

/// Fire every release scheduled in `actions`, collecting the follow-up actions.
fn elapse(core: &mut ControllerCore, actions: &[Action]) -> Vec<Action> {
    let mut out = Vec::new();
    for action in actions {
        if let Action::ScheduleRelease { modal, token, .. } = action {
            out.extend(core.release_elapsed(modal, *token));
        }
    }
    out
}

// =============================================================
// Construction and discovery
// =============================================================

#[test]
fn new_core_is_unlocked_with_nothing_visible() {
    let core = ControllerCore::default();
    assert!(!core.is_scroll_locked());
    assert!(core.visible_modals().is_empty());
}

#[test]
fn register_hidden_modal_emits_nothing() {
    let mut core = ControllerCore::default();
    assert!(core.register_modal("m1", false).is_empty());
    assert!(core.knows("m1"));
    assert!(!core.is_visible("m1"));
}

#[test]
fn register_modal_already_active_locks_body() {
    let mut core = ControllerCore::default();
    assert_eq!(core.register_modal("m1", true), vec![Action::LockBody]);
    assert!(core.is_visible("m1"));
    assert!(core.is_scroll_locked());
}

#[test]
fn register_duplicate_modal_is_ignored() {
    let mut core = core_with(&["m1"]);
    assert!(core.register_modal("m1", true).is_empty());
    assert!(!core.is_visible("m1"));
}

#[test]
fn register_counts_triggers_and_dismissers() {
    let mut core = ControllerCore::default();
    core.register_trigger();
    core.register_dismisser();
    core.register_dismisser();
    assert_eq!(core.registry().trigger_count(), 1);
    assert_eq!(core.registry().dismisser_count(), 2);
}

// =============================================================
// show
// =============================================================

#[test]
fn show_makes_visible_locks_then_notifies() {
    let mut core = core_with(&["m1"]);
    let actions = core.show("m1");
    assert_eq!(
        actions,
        vec![
            set_visible("m1", true),
            Action::LockBody,
            Action::Notify { modal: "m1".to_owned(), kind: Notification::Shown },
        ]
    );
    assert!(core.is_visible("m1"));
    assert!(core.is_scroll_locked());
}

#[test]
fn show_unknown_id_is_silent_noop() {
    let mut core = core_with(&["m1"]);
    assert!(core.show("missing").is_empty());
    assert!(!core.is_scroll_locked());
    assert!(core.visible_modals().is_empty());
}

#[test]
fn show_twice_reapplies_visible_without_relocking() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    let actions = core.show("m1");
    assert!(actions.contains(&set_visible("m1", true)));
    assert!(!actions.contains(&Action::LockBody));
    assert!(has_notify(&actions, "m1", Notification::Shown));
    assert_eq!(core.visible_modals(), vec!["m1".to_owned()]);
}

#[test]
fn second_modal_does_not_relock() {
    let mut core = core_with(&["m1", "m2"]);
    core.show("m1");
    let actions = core.show("m2");
    assert!(!actions.contains(&Action::LockBody));
    assert_eq!(core.visible_modals().len(), 2);
}

// =============================================================
// hide
// =============================================================

#[test]
fn hide_is_immediate_but_release_is_deferred() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    let actions = core.hide("m1");
    assert_eq!(actions[0], set_visible("m1", false));
    assert!(has_notify(&actions, "m1", Notification::Hidden));
    assert!(!actions.contains(&Action::UnlockBody));
    assert!(!core.is_visible("m1"));
    assert!(core.is_scroll_locked());

    let follow_up = elapse(&mut core, &actions);
    assert_eq!(follow_up, vec![Action::UnlockBody]);
    assert!(!core.is_scroll_locked());
}

#[test]
fn hide_schedules_with_configured_delay() {
    let mut core = ControllerCore::new(120);
    core.register_modal("m1", false);
    core.show("m1");
    let actions = core.hide("m1");
    assert!(actions.iter().any(|a| matches!(a, Action::ScheduleRelease { delay_ms: 120, .. })));
}

#[test]
fn hide_unknown_id_is_silent_noop() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    assert!(core.hide("missing").is_empty());
    assert!(core.is_visible("m1"));
}

#[test]
fn hide_of_hidden_modal_notifies_without_scheduling() {
    let mut core = core_with(&["m1"]);
    let actions = core.hide("m1");
    assert_eq!(
        actions,
        vec![set_visible("m1", false), Action::Notify { modal: "m1".to_owned(), kind: Notification::Hidden }]
    );
}

#[test]
fn closing_one_of_several_keeps_lock() {
    let mut core = core_with(&["m1", "m2", "m3"]);
    core.show("m1");
    core.show("m2");
    core.show("m3");

    let actions = core.hide("m2");
    assert!(elapse(&mut core, &actions).is_empty());
    assert!(core.is_scroll_locked());

    let actions = core.hide("m1");
    assert!(elapse(&mut core, &actions).is_empty());
    assert!(core.is_scroll_locked());

    let actions = core.hide("m3");
    assert_eq!(elapse(&mut core, &actions), vec![Action::UnlockBody]);
    assert!(!core.is_scroll_locked());
}

#[test]
fn hide_again_while_pending_replaces_release() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    let first = core.hide("m1");
    let first_token = scheduled_token(&first, "m1");
    let second = core.hide("m1");
    assert!(second.contains(&Action::CancelRelease { modal: "m1".to_owned() }));
    let second_token = scheduled_token(&second, "m1");

    assert!(core.release_elapsed("m1", first_token).is_empty());
    assert!(core.is_scroll_locked());
    assert_eq!(core.release_elapsed("m1", second_token), vec![Action::UnlockBody]);
}

// =============================================================
// Reopen inside the release window
// =============================================================

#[test]
fn reopen_within_delay_cancels_release() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    let hidden = core.hide("m1");
    let token = scheduled_token(&hidden, "m1");

    let reopened = core.show("m1");
    assert!(reopened.contains(&Action::CancelRelease { modal: "m1".to_owned() }));
    assert!(!reopened.contains(&Action::LockBody));
    assert_eq!(core.pending_release("m1"), None);

    // The old timer firing anyway must not unlock a visible modal.
    assert!(core.release_elapsed("m1", token).is_empty());
    assert!(core.is_scroll_locked());
    assert!(core.is_visible("m1"));
}

#[test]
fn release_elapsed_for_unknown_modal_is_noop() {
    let mut core = core_with(&["m1"]);
    assert!(core.release_elapsed("ghost", 1).is_empty());
}

// =============================================================
// hide_all
// =============================================================

#[test]
fn hide_all_hides_everything_without_notifications() {
    let mut core = core_with(&["m1", "m2", "m3"]);
    core.show("m1");
    core.show("m3");
    let actions = core.hide_all();

    assert!(actions.contains(&set_visible("m1", false)));
    assert!(actions.contains(&set_visible("m3", false)));
    assert!(!actions.contains(&set_visible("m2", false)));
    assert!(!actions.iter().any(|a| matches!(a, Action::Notify { .. })));
    assert!(core.visible_modals().is_empty());
    assert!(core.is_scroll_locked());

    assert_eq!(elapse(&mut core, &actions), vec![Action::UnlockBody]);
    assert!(!core.is_scroll_locked());
}

#[test]
fn hide_all_with_nothing_open_is_empty() {
    let mut core = core_with(&["m1"]);
    assert!(core.hide_all().is_empty());
    assert!(!core.is_scroll_locked());
}

#[test]
fn hide_all_releases_modal_visible_from_markup() {
    let mut core = ControllerCore::default();
    core.register_modal("m1", true);
    let actions = core.hide_all();
    assert_eq!(elapse(&mut core, &actions), vec![Action::UnlockBody]);
}

// =============================================================
// Event routing
// =============================================================

#[test]
fn trigger_click_with_target_shows() {
    let mut core = core_with(&["m1"]);
    let actions = core.handle(UiEvent::TriggerClicked { target: Some("m1".to_owned()) });
    assert!(has_notify(&actions, "m1", Notification::Shown));
    assert!(core.is_visible("m1"));
}

#[test]
fn trigger_click_without_target_is_ignored() {
    let mut core = core_with(&["m1"]);
    assert!(core.handle(UiEvent::TriggerClicked { target: None }).is_empty());
}

#[test]
fn dismisser_click_hides_enclosing_modal() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    let actions = core.handle(UiEvent::DismisserClicked { modal: Some("m1".to_owned()) });
    assert!(has_notify(&actions, "m1", Notification::Hidden));
    assert!(!core.is_visible("m1"));
}

#[test]
fn dismisser_outside_modal_is_ignored() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    assert!(core.handle(UiEvent::DismisserClicked { modal: None }).is_empty());
    assert!(core.is_visible("m1"));
}

#[test]
fn backdrop_click_hides() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    core.handle(UiEvent::OverlayClicked { modal: "m1".to_owned(), on_backdrop: true });
    assert!(!core.is_visible("m1"));
}

#[test]
fn content_click_inside_overlay_does_not_hide() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    let actions = core.handle(UiEvent::OverlayClicked { modal: "m1".to_owned(), on_backdrop: false });
    assert!(actions.is_empty());
    assert!(core.is_visible("m1"));
}

#[test]
fn escape_hides_all() {
    let mut core = core_with(&["m1", "m2"]);
    core.show("m1");
    core.show("m2");
    let actions = core.handle(UiEvent::KeyDown(Key::from("Escape")));
    assert!(core.visible_modals().is_empty());
    assert_eq!(elapse(&mut core, &actions), vec![Action::UnlockBody]);
}

#[test]
fn escape_with_nothing_open_is_harmless() {
    let mut core = ControllerCore::default();
    assert!(core.handle(UiEvent::KeyDown(Key::from("Escape"))).is_empty());
    assert!(!core.is_scroll_locked());
}

#[test]
fn other_keys_are_ignored() {
    let mut core = core_with(&["m1"]);
    core.show("m1");
    assert!(core.handle(UiEvent::KeyDown(Key::from("Enter"))).is_empty());
    assert!(core.is_visible("m1"));
}

// =============================================================
// Trigger -> close button walkthrough
// =============================================================

#[test]
fn trigger_then_close_button_walkthrough() {
    let mut core = core_with(&["m1"]);

    let opened = core.handle(UiEvent::TriggerClicked { target: Some("m1".to_owned()) });
    assert!(core.is_visible("m1"));
    assert!(opened.contains(&Action::LockBody));
    let notify_at = opened.iter().position(|a| matches!(a, Action::Notify { .. })).unwrap();
    let visible_at = opened.iter().position(|a| a == &set_visible("m1", true)).unwrap();
    assert!(visible_at < notify_at);

    let closed = core.handle(UiEvent::DismisserClicked { modal: Some("m1".to_owned()) });
    assert!(!core.is_visible("m1"));
    assert!(has_notify(&closed, "m1", Notification::Hidden));
    assert!(core.is_scroll_locked());

    assert_eq!(elapse(&mut core, &closed), vec![Action::UnlockBody]);
    assert!(!core.is_scroll_locked());
}

// =============================================================
// Visibility synced from the document
// =============================================================

#[test]
fn escape_after_external_activation_hides_it() {
    let mut core = core_with(&["m1", "m2"]);
    core.sync_visibility(&["m1".to_owned()]);
    assert!(core.is_visible("m1"));
    assert!(!core.is_scroll_locked());

    let actions = core.handle(UiEvent::KeyDown(Key::from("Escape")));
    assert_eq!(actions, vec![set_visible("m1", false)]);
    assert!(core.visible_modals().is_empty());
    assert!(elapse(&mut core, &actions).is_empty());
}

#[test]
fn sync_drops_modals_closed_by_page_code() {
    let mut core = core_with(&["m1", "m2"]);
    core.show("m1");
    core.show("m2");
    core.sync_visibility(&["m2".to_owned()]);
    let actions = core.hide_all();
    assert!(!actions.contains(&set_visible("m1", false)));
    assert!(actions.contains(&set_visible("m2", false)));
}

#[test]
fn hide_of_modal_registered_hidden_never_touches_lock() {
    let mut core = core_with(&["late"]);
    let actions = core.hide("late");
    assert!(!actions.iter().any(|a| matches!(a, Action::LockBody | Action::ScheduleRelease { .. })));
    assert!(!core.is_scroll_locked());
}
