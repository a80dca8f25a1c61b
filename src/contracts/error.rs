use std::sync::{MutexGuard, PoisonError, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

/// Boxed failure produced by a [`SequenceStore`](crate::contracts::SequenceStore) backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to load sequences: {0}")]
    Load(#[source] BoxError),

    #[error("Failed to save sequences: {0}")]
    Save(#[source] BoxError),
}

impl StorageError {
    /// Returns true if the failure happened while loading.
    pub fn is_load(&self) -> bool {
        matches!(self, StorageError::Load(_))
    }

    /// Returns true if the failure happened while saving.
    pub fn is_save(&self) -> bool {
        matches!(self, StorageError::Save(_))
    }
}

/// Extension trait for taking a guard out of a poisoned lock.
///
/// Every structure guarded in this crate is updated by a single call
/// (one insert or one assignment), so a panic in another holder never
/// leaves it half-written.
pub trait LockResultExt<T> {
    fn ignore_poison(self) -> T;
}

impl<'a, T> LockResultExt<RwLockReadGuard<'a, T>>
    for Result<RwLockReadGuard<'a, T>, PoisonError<RwLockReadGuard<'a, T>>>
{
    #[inline]
    fn ignore_poison(self) -> RwLockReadGuard<'a, T> {
        self.unwrap_or_else(PoisonError::into_inner)
    }
}

impl<'a, T> LockResultExt<RwLockWriteGuard<'a, T>>
    for Result<RwLockWriteGuard<'a, T>, PoisonError<RwLockWriteGuard<'a, T>>>
{
    #[inline]
    fn ignore_poison(self) -> RwLockWriteGuard<'a, T> {
        self.unwrap_or_else(PoisonError::into_inner)
    }
}

impl<'a, T> LockResultExt<MutexGuard<'a, T>>
    for Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>
{
    #[inline]
    fn ignore_poison(self) -> MutexGuard<'a, T> {
        self.unwrap_or_else(PoisonError::into_inner)
    }
}
