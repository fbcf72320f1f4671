use crate::backend::{OverlayBackend, validate_key};
use crate::error::StorageError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// Process-local store. Cloning shares the same records.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    name: Arc<Cow<'static, str>>,
    records: Arc<RwLock<FxHashMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: Arc::new(name.into()), records: Arc::default() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl OverlayBackend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        Ok(self.records.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        self.records.write().insert(key.to_owned(), value.to_vec());
        debug!(store = %self.name, key, "Record stored in memory");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.records.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.records.write().clear();
        Ok(())
    }
}
