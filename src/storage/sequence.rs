use std::sync::atomic::{AtomicU64, Ordering};

use crate::contracts::SequenceGenerator;

/// Atomic sequence generator for a single key.
///
/// Uses a single `fetch_add` per call, so increments on one key never block
/// each other and never touch any other key's counter.
#[derive(Debug)]
pub struct Generator {
    key: String,
    counter: AtomicU64,
}

impl Generator {
    /// Creates a generator for `key` starting from 0.
    pub fn new(key: impl Into<String>) -> Self {
        Self::starting_from(key, 0)
    }

    /// Creates a generator for `key` starting from a specific value.
    /// The next call to `next()` returns `value + 1`.
    pub fn starting_from(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            counter: AtomicU64::new(value),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SequenceGenerator for Generator {
    fn next(&self) -> u64 {
        // fetch_add returns the previous value and wraps at u64::MAX
        let prev = self.counter.fetch_add(1, Ordering::Relaxed);
        prev.wrapping_add(1)
    }

    fn current(&self) -> u64 {
        // A single atomic load, never torn
        self.counter.load(Ordering::Relaxed)
    }
}
