//! Keyed registry of sequence generators.
//!
//! A [`Registry`] creates one [`Generator`] per key on first use and hands out
//! shared handles to it. When built with a [`SequenceStore`] it restores every
//! counter at construction and writes them all back on [`Registry::close`].
//! The store is never touched on the increment path.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::contracts::{
    LockResultExt, SequenceGenerator, SequenceSnapshot, SequenceStore, StorageError,
};
use crate::storage::Generator;

/// Owns the generators of one process or component.
///
/// # Invariants
/// - At most one generator exists per key for the registry's lifetime
/// - The registry lock covers lookup/insert only, never `next()`
/// - A key is only present after `get_generator` or a load materialized it
pub struct Registry {
    generators: RwLock<HashMap<String, Arc<Generator>>>,
    store: Option<Arc<dyn SequenceStore>>,
}

impl Registry {
    /// Creates an empty registry without persistence.
    pub fn new() -> Self {
        Self {
            generators: RwLock::new(HashMap::new()),
            store: None,
        }
    }

    /// Creates a registry backed by `store`, restoring every saved counter.
    pub fn with_store<S>(store: Arc<S>) -> Result<Self, StorageError>
    where
        S: SequenceStore + 'static,
    {
        Self::create(Some(store as Arc<dyn SequenceStore>))
    }

    /// Creates a registry, loading from `store` when one is given.
    ///
    /// A failed load fails the whole construction; no partially seeded
    /// registry is ever returned.
    pub fn create(store: Option<Arc<dyn SequenceStore>>) -> Result<Self, StorageError> {
        let Some(store) = store else {
            return Ok(Self::new());
        };

        let loaded = store.load().map_err(StorageError::Load)?;
        let generators: HashMap<String, Arc<Generator>> = loaded
            .into_iter()
            .map(|(key, value)| {
                let generator = Arc::new(Generator::starting_from(key.clone(), value));
                (key, generator)
            })
            .collect();

        tracing::info!(keys = generators.len(), "Restored sequence generators");

        Ok(Self {
            generators: RwLock::new(generators),
            store: Some(store),
        })
    }

    /// Returns the generator for `key`, creating it at 0 if unseen.
    ///
    /// Concurrent callers asking for the same unseen key all receive the
    /// same instance.
    pub fn get_generator(&self, key: &str) -> Arc<Generator> {
        if let Some(generator) = self.generators.read().ignore_poison().get(key) {
            return Arc::clone(generator);
        }

        let mut generators = self.generators.write().ignore_poison();
        // Another caller may have inserted it between the two locks
        let generator = generators.entry(key.to_owned()).or_insert_with(|| {
            tracing::debug!(key = %key, "Created sequence generator");
            Arc::new(Generator::new(key))
        });
        Arc::clone(generator)
    }

    /// Increments the generator for `key` and returns the new value.
    pub fn next_id(&self, key: &str) -> u64 {
        self.get_generator(key).next()
    }

    /// Captures the current value of every generator.
    ///
    /// Holds the registry lock so no key appears mid-snapshot. Each counter
    /// is read atomically on its own; generators incremented while the
    /// snapshot runs may be captured before or after that increment.
    pub fn snapshot(&self) -> SequenceSnapshot {
        let generators = self.generators.read().ignore_poison();
        let mut snapshot = SequenceSnapshot::with_capacity(generators.len());
        for (key, generator) in generators.iter() {
            snapshot.insert(key.as_str(), generator.current());
        }
        snapshot
    }

    /// Saves a snapshot of every generator to the store.
    ///
    /// A no-op without a store. On failure nothing is rolled back and the
    /// registry stays usable, so `close` may be called again.
    pub fn close(&self) -> Result<(), StorageError> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        let snapshot = self.snapshot();
        store.save(&snapshot).map_err(StorageError::Save)?;

        tracing::info!(keys = snapshot.len(), "Saved sequence generators");
        Ok(())
    }

    /// Returns true if a generator exists for `key`. Never creates one.
    pub fn contains(&self, key: &str) -> bool {
        self.generators.read().ignore_poison().contains_key(key)
    }

    /// Number of keys materialized so far.
    pub fn len(&self) -> usize {
        self.generators.read().ignore_poison().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("generators", &self.len())
            .field("has_store", &self.has_store())
            .finish()
    }
}
