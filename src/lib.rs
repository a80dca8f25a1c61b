//! Named, monotonically increasing sequence generators.
//!
//! ```
//! use std::sync::Arc;
//!
//! use eid::contracts::SequenceGenerator;
//! use eid::registry::Registry;
//! use eid::storage::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//!
//! let registry = Registry::with_store(Arc::clone(&store)).unwrap();
//! assert_eq!(registry.get_generator("orders").next(), 1);
//! assert_eq!(registry.next_id("orders"), 2);
//! registry.close().unwrap();
//!
//! let restarted = Registry::with_store(store).unwrap();
//! assert_eq!(restarted.next_id("orders"), 3);
//! ```

pub mod contracts;
pub mod registry;
pub mod storage;

pub use contracts::{SequenceGenerator, SequenceSnapshot, SequenceStore, StorageError};
pub use registry::Registry;
pub use storage::{Generator, MemoryStore};
