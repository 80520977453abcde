//! In-flight submission tracking.
//!
//! Client-side scripting disables a form's buttons while a submission is
//! running, but the server cannot trust that. The registry is the
//! authoritative check: one mutation per record at a time, with repeats
//! dropped until the first completes.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Tracks which record mutations are currently running.
///
/// Keys are `{store_id}/{entity}/{record}` so that saving one record never
/// blocks work on another, while save and delete of the same record share
/// one slot.
#[derive(Clone, Default)]
pub struct SubmissionRegistry {
    inflight: Arc<Mutex<HashSet<String>>>,
}

impl SubmissionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as in flight.
    ///
    /// Returns `None` while an earlier submission for the same key is still
    /// running; the caller should drop the request without side effects.
    #[must_use]
    pub fn try_begin(&self, key: impl Into<String>) -> Option<SubmissionGuard> {
        let key = key.into();
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if inflight.insert(key.clone()) {
            Some(SubmissionGuard {
                registry: self.clone(),
                key,
            })
        } else {
            None
        }
    }

    fn finish(&self, key: &str) {
        let mut inflight = self
            .inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        inflight.remove(key);
    }
}

/// Clears the in-flight mark when dropped, so the slot frees on every exit
/// path from a handler, early returns included.
pub struct SubmissionGuard {
    registry: SubmissionRegistry,
    key: String,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.registry.finish(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submission_for_same_key_is_rejected() {
        let registry = SubmissionRegistry::new();

        let guard = registry.try_begin("store-1/colors/color-9");
        assert!(guard.is_some());
        assert!(registry.try_begin("store-1/colors/color-9").is_none());
    }

    #[test]
    fn test_slot_frees_when_guard_drops() {
        let registry = SubmissionRegistry::new();

        let guard = registry.try_begin("store-1/billboards/new");
        assert!(guard.is_some());
        drop(guard);

        assert!(registry.try_begin("store-1/billboards/new").is_some());
    }

    #[test]
    fn test_distinct_records_do_not_block_each_other() {
        let registry = SubmissionRegistry::new();

        let first = registry.try_begin("store-1/sizes/size-1");
        let second = registry.try_begin("store-1/sizes/size-2");
        let other_store = registry.try_begin("store-2/sizes/size-1");

        assert!(first.is_some());
        assert!(second.is_some());
        assert!(other_store.is_some());
    }

    #[test]
    fn test_save_and_delete_share_one_slot() {
        let registry = SubmissionRegistry::new();

        // A delete arriving while the save is still running must be dropped.
        let save = registry.try_begin("store-1/colors/color-9");
        assert!(save.is_some());
        assert!(registry.try_begin("store-1/colors/color-9").is_none());
    }
}
