//! Persistent administrative overrides, one record per id.
//!
//! The overlay is independent of the declared data: records survive contribution reloads and
//! may exist for ids that are not currently registered. An id without a record behaves as if
//! both axes were unset.

use crate::error::{CatalogError, CatalogErrorExt};
use parking_lot::Mutex;
use std::sync::Arc;
use tplat_domain::{OverlayRecord, TriState};
use tplat_storage::OverlayBackend;
use tracing::{debug, instrument};

#[derive(Debug)]
struct OverrideStoreInner {
    backend: Arc<dyn OverlayBackend>,
    // Serialises read-modify-write cycles so concurrent toggles of one id cannot lose updates.
    writes: Mutex<()>,
}

/// Handle to the overlay. Cloning shares the backend.
#[derive(Debug, Clone)]
pub struct OverrideStore {
    inner: Arc<OverrideStoreInner>,
}

impl OverrideStore {
    #[must_use]
    pub fn new(backend: impl OverlayBackend + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    #[must_use]
    pub fn from_shared(backend: Arc<dyn OverlayBackend>) -> Self {
        Self { inner: Arc::new(OverrideStoreInner { backend, writes: Mutex::new(()) }) }
    }

    /// Identifier of the backing store.
    #[must_use]
    pub fn directory(&self) -> &str {
        self.inner.backend.name()
    }

    /// Current record for `id`; both axes unset when nothing is recorded.
    ///
    /// # Errors
    /// [`CatalogError::OverlayUnavailable`] when the store cannot be read and
    /// [`CatalogError::OverlayCorrupted`] when the stored bytes do not decode.
    pub fn get(&self, id: &str) -> Result<OverlayRecord, CatalogError> {
        match self.inner.backend.get(id).context(format!("Reading overlay of '{id}'"))? {
            Some(bytes) => postcard::from_bytes(&bytes)
                .context(format!("Decoding overlay of '{id}'")),
            None => Ok(OverlayRecord::default()),
        }
    }

    /// Forces the enabled axis to `false`.
    ///
    /// # Errors
    /// See [`OverrideStore::get`].
    #[instrument(skip(self), err)]
    pub fn disable(&self, id: &str) -> Result<OverlayRecord, CatalogError> {
        self.update(id, |record| record.enabled = TriState::Forced(false))
    }

    /// Forces the enabled axis to `true`.
    ///
    /// # Errors
    /// See [`OverrideStore::get`].
    #[instrument(skip(self), err)]
    pub fn enable(&self, id: &str) -> Result<OverlayRecord, CatalogError> {
        self.update(id, |record| record.enabled = TriState::Forced(true))
    }

    /// Forces the restricted axis to `true`.
    ///
    /// # Errors
    /// See [`OverrideStore::get`].
    #[instrument(skip(self), err)]
    pub fn restrict(&self, id: &str) -> Result<OverlayRecord, CatalogError> {
        self.update(id, |record| record.restricted = TriState::Forced(true))
    }

    /// Forces the restricted axis to `false`.
    ///
    /// # Errors
    /// See [`OverrideStore::get`].
    #[instrument(skip(self), err)]
    pub fn unrestrict(&self, id: &str) -> Result<OverlayRecord, CatalogError> {
        self.update(id, |record| record.restricted = TriState::Forced(false))
    }

    /// Resets both axes at once by dropping the record. Returns the now unset record.
    ///
    /// # Errors
    /// [`CatalogError::OverlayUnavailable`] when the store cannot be modified.
    #[instrument(skip(self), err)]
    pub fn restore(&self, id: &str) -> Result<OverlayRecord, CatalogError> {
        let _guard = self.inner.writes.lock();
        self.inner.backend.delete(id).context(format!("Restoring overlay of '{id}'"))?;
        debug!("Overlay restored");
        Ok(OverlayRecord::default())
    }

    /// Wipes every record.
    ///
    /// # Errors
    /// [`CatalogError::OverlayUnavailable`] when the store cannot be modified.
    pub fn clear(&self) -> Result<(), CatalogError> {
        let _guard = self.inner.writes.lock();
        self.inner.backend.clear().context("Clearing overlay store")?;
        debug!(store = self.directory(), "Overlay cleared");
        Ok(())
    }

    fn update(
        &self,
        id: &str,
        apply: impl FnOnce(&mut OverlayRecord),
    ) -> Result<OverlayRecord, CatalogError> {
        let _guard = self.inner.writes.lock();
        let mut record = self.get(id)?;
        apply(&mut record);

        let bytes = postcard::to_stdvec(&record).context(format!("Encoding overlay of '{id}'"))?;
        self.inner.backend.put(id, &bytes).context(format!("Writing overlay of '{id}'"))?;
        debug!(enabled = ?record.enabled, restricted = ?record.restricted, "Overlay updated");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tplat_storage::MemoryBackend;

    #[test]
    fn axes_are_independent() {
        let store = OverrideStore::new(MemoryBackend::new("targetplatforms"));

        store.disable("cap-5.8").expect("disable");
        let record = store.restrict("cap-5.8").expect("restrict");
        assert_eq!(record.enabled, TriState::Forced(false));
        assert_eq!(record.restricted, TriState::Forced(true));

        assert!(store.restore("cap-5.8").expect("restore").is_unset());
        assert!(store.get("cap-5.8").expect("get").is_unset());
    }

    #[test]
    fn garbage_bytes_are_corruption() {
        let backend = MemoryBackend::new("targetplatforms");
        backend.put("cap-5.8", &[0xff, 0xff, 0xff]).expect("put");

        let store = OverrideStore::new(backend);
        assert!(matches!(store.get("cap-5.8"), Err(CatalogError::OverlayCorrupted { .. })));
    }
}
