pub mod error;
pub mod sequence;
pub mod store;

pub use error::{BoxError, LockResultExt, StorageError};
pub use sequence::SequenceGenerator;
pub use store::{SequenceSnapshot, SequenceStore};
