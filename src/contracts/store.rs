use std::collections::hash_map;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::contracts::error::BoxError;

/// Persists the value of every generator of a registry.
///
/// # Behavior
/// - `load` is called once, when a registry is created
/// - `save` is called from `Registry::close` with the complete mapping and
///   replaces whatever was persisted before (no merge)
/// - A key absent from the loaded mapping is equivalent to value 0
pub trait SequenceStore: Send + Sync {
    /// Returns the last persisted value for every known key.
    fn load(&self) -> Result<SequenceSnapshot, BoxError>;

    /// Persists the complete mapping, overwriting prior state.
    fn save(&self, snapshot: &SequenceSnapshot) -> Result<(), BoxError>;
}

/// Key to counter value mapping exchanged with a [`SequenceStore`].
///
/// Serializes as a plain map, e.g. `{"orders": 42}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceSnapshot {
    sequences: HashMap<String, u64>,
}

impl SequenceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sequences: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.sequences.get(key).copied()
    }

    /// Sets the value for `key`, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: u64) -> Option<u64> {
        self.sequences.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sequences.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.sequences.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<HashMap<String, u64>> for SequenceSnapshot {
    fn from(sequences: HashMap<String, u64>) -> Self {
        Self { sequences }
    }
}

impl From<SequenceSnapshot> for HashMap<String, u64> {
    fn from(snapshot: SequenceSnapshot) -> Self {
        snapshot.sequences
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for SequenceSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            sequences: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for SequenceSnapshot {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.into_iter()
    }
}
