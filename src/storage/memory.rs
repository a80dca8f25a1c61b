use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::contracts::{BoxError, LockResultExt, SequenceSnapshot, SequenceStore};

/// In-process [`SequenceStore`] holding the last saved snapshot in memory.
///
/// Survives as long as the value itself, so it can be shared (via `Arc`)
/// between successive registries in one process. Load and save calls are
/// counted, and either operation can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    persisted: Mutex<SequenceSnapshot>,
    loads: AtomicUsize,
    saves: AtomicUsize,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `sequences`.
    pub fn with_sequences(sequences: SequenceSnapshot) -> Self {
        Self {
            persisted: Mutex::new(sequences),
            ..Self::default()
        }
    }

    /// Returns a copy of the last saved snapshot.
    pub fn persisted(&self) -> SequenceSnapshot {
        self.persisted.lock().ignore_poison().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    /// Makes subsequent loads fail (`true`) or succeed (`false`).
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::Relaxed);
    }

    /// Makes subsequent saves fail (`true`) or succeed (`false`).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }
}

impl SequenceStore for MemoryStore {
    fn load(&self) -> Result<SequenceSnapshot, BoxError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        if self.fail_loads.load(Ordering::Relaxed) {
            return Err("memory store: load failure injected".into());
        }
        Ok(self.persisted())
    }

    fn save(&self, snapshot: &SequenceSnapshot) -> Result<(), BoxError> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err("memory store: save failure injected".into());
        }
        *self.persisted.lock().ignore_poison() = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_last_saved_snapshot() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let snapshot: SequenceSnapshot = [("a", 2), ("b", 5)].into_iter().collect();
        store.save(&snapshot).unwrap();

        assert_eq!(store.load().unwrap(), snapshot);
        assert_eq!(store.load_count(), 2);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn save_overwrites_instead_of_merging() {
        let store = MemoryStore::with_sequences([("a", 9)].into_iter().collect());
        store
            .save(&[("b", 1)].into_iter().collect())
            .unwrap();

        let persisted = store.persisted();
        assert_eq!(persisted.get("a"), None);
        assert_eq!(persisted.get("b"), Some(1));
    }

    #[test]
    fn injected_failures_leave_state_untouched() {
        let store = MemoryStore::with_sequences([("a", 3)].into_iter().collect());

        store.fail_saves(true);
        assert!(store.save(&SequenceSnapshot::new()).is_err());
        assert_eq!(store.persisted().get("a"), Some(3));

        store.fail_loads(true);
        assert!(store.load().is_err());

        store.fail_loads(false);
        assert_eq!(store.load().unwrap().get("a"), Some(3));
    }
}
