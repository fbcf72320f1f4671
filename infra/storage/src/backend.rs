use crate::error::StorageError;
use std::fmt::Debug;
use std::sync::Arc;

/// Keyed byte store holding one overlay record per id.
///
/// Implementations must be safe to share between threads; each call is expected to be
/// synchronous and bounded.
pub trait OverlayBackend: Debug + Send + Sync {
    /// Identifier of the store, surfaced as the override directory.
    fn name(&self) -> &str;

    /// Returns the stored bytes, or `None` when no record exists.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the record cannot be written.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Removes the record for `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the store cannot be modified.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Removes every record.
    ///
    /// # Errors
    /// Returns a [`StorageError`] when the store cannot be modified.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<B: OverlayBackend + ?Sized> OverlayBackend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey {
            message: "EMPTY".into(),
            context: Some("Record key cannot be empty".into()),
        });
    }
    Ok(())
}
