//! Reference-counted scroll-lock over the document body.
//!
//! Each modal holds at most one share of the lock, from the moment it opens
//! until its release task fires after the exit transition. The body style is
//! applied on the first acquire and cleared on the last release, so closing
//! one of several open modals never unlocks scrolling early.

#[cfg(test)]
#[path = "scroll_lock_test.rs"]
mod scroll_lock_test;

use std::collections::BTreeSet;

/// Body style properties toggled by the lock.
///
/// `overflow: hidden` alone lets iOS Safari keep scrolling and zooming the
/// page behind an overlay; pinning position and width stops that.
pub const BODY_LOCK_STYLE: &[(&str, &str)] = &[("overflow", "hidden"), ("position", "fixed"), ("width", "100%")];

/// What the body style should do after a lock transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockChange {
    /// First holder acquired: apply [`BODY_LOCK_STYLE`].
    Engage,
    /// Last holder released: clear [`BODY_LOCK_STYLE`].
    Disengage,
    /// Holder count changed without crossing zero, or nothing changed.
    Unchanged,
}

/// The set of modal ids currently holding the lock.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: BTreeSet<String>,
}

impl ScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a share for `holder`. Acquiring twice for the same holder is a no-op.
    pub fn acquire(&mut self, holder: &str) -> LockChange {
        let was_locked = self.is_locked();
        if !self.holders.insert(holder.to_owned()) {
            return LockChange::Unchanged;
        }
        if was_locked { LockChange::Unchanged } else { LockChange::Engage }
    }

    /// Drop `holder`'s share. Releasing a holder that holds nothing is a no-op.
    pub fn release(&mut self, holder: &str) -> LockChange {
        if !self.holders.remove(holder) {
            return LockChange::Unchanged;
        }
        if self.is_locked() { LockChange::Unchanged } else { LockChange::Disengage }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    #[must_use]
    pub fn holds(&self, holder: &str) -> bool {
        self.holders.contains(holder)
    }

    #[cfg(test)]
    pub(crate) fn holder_count(&self) -> usize {
        self.holders.len()
    }
}
