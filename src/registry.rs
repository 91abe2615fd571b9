//! Discovered modals and their transient state.
//!
//! The registry is populated by the discovery scan (and by the bind-one
//! calls afterwards). It tracks per-modal visibility and, for modals that
//! are closing, the token of the release task still pending for them.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::BTreeMap;

/// Identifier of a pending scroll-lock release task.
pub type ReleaseToken = u64;

#[derive(Debug, Clone, Default)]
struct ModalEntry {
    visible: bool,
    pending_release: Option<ReleaseToken>,
}

/// All modals the controller knows about, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct ModalRegistry {
    modals: BTreeMap<String, ModalEntry>,
    trigger_count: usize,
    dismisser_count: usize,
    next_token: ReleaseToken,
}

impl ModalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a modal. Returns `false` for an empty or already-known id.
    pub fn insert_modal(&mut self, id: &str, visible: bool) -> bool {
        if id.is_empty() || self.modals.contains_key(id) {
            return false;
        }
        self.modals.insert(id.to_owned(), ModalEntry { visible, pending_release: None });
        true
    }

    pub fn note_trigger(&mut self) {
        self.trigger_count += 1;
    }

    pub fn note_dismisser(&mut self) {
        self.dismisser_count += 1;
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.modals.contains_key(id)
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.modals.get(id).is_some_and(|m| m.visible)
    }

    /// Set a known modal's visibility. Unknown ids are ignored.
    pub fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(entry) = self.modals.get_mut(id) {
            entry.visible = visible;
        }
    }

    /// Mark exactly the known modals in `active` as visible.
    pub fn sync_visible(&mut self, active: &[String]) {
        for (id, entry) in &mut self.modals {
            entry.visible = active.contains(id);
        }
    }

    /// Ids of every visible modal, in id order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<String> {
        self.modals
            .iter()
            .filter(|(_, m)| m.visible)
            .map(|(id, _)| id.clone())
            .collect()
    }

    #[must_use]
    pub fn modal_count(&self) -> usize {
        self.modals.len()
    }

    #[must_use]
    pub fn trigger_count(&self) -> usize {
        self.trigger_count
    }

    #[must_use]
    pub fn dismisser_count(&self) -> usize {
        self.dismisser_count
    }

    /// Start a release for `id`, replacing any earlier pending one.
    ///
    /// Returns the new token and the token it superseded, if any.
    pub fn begin_release(&mut self, id: &str) -> Option<(ReleaseToken, Option<ReleaseToken>)> {
        let entry = self.modals.get_mut(id)?;
        self.next_token += 1;
        let token = self.next_token;
        let previous = entry.pending_release.replace(token);
        Some((token, previous))
    }

    /// Drop the pending release for `id`, returning its token.
    pub fn cancel_release(&mut self, id: &str) -> Option<ReleaseToken> {
        self.modals.get_mut(id)?.pending_release.take()
    }

    /// Consume the pending release for `id` if it is exactly `token`.
    pub fn finish_release(&mut self, id: &str, token: ReleaseToken) -> bool {
        match self.modals.get_mut(id) {
            Some(entry) if entry.pending_release == Some(token) => {
                entry.pending_release = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn pending_release(&self, id: &str) -> Option<ReleaseToken> {
        self.modals.get(id).and_then(|m| m.pending_release)
    }
}
