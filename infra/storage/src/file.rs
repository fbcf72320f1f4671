//! Directory-backed overlay store.
//!
//! Every record lives in its own file under `<root>/<namespace>`, named after the hex encoding
//! of its key and sharded on the first two byte pairs of that name. Keys too long for a file
//! name are stored under the SHA-256 of the key instead. Writes go through a unique temp file
//! that is synced and renamed over the target.

use crate::backend::{OverlayBackend, validate_key};
use crate::builder::FileBackendBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance::{self, TMP_MARKER};
use crate::namespace::NamespaceName;
use crate::security;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

// Hex doubles the key length; longer keys would overflow the usual 255 byte name limit.
const MAX_HEX_KEY_LEN: usize = 100;
// Never produced by hex encoding, so digest names cannot collide with plain ones.
const DIGEST_SUFFIX: &str = ".sha256";

/// The internal shared state of a [`FileBackend`].
#[derive(Debug)]
pub struct FileBackendInner {
    /// Canonicalized sandbox root.
    pub(crate) root: PathBuf,
    /// Store identifier as configured.
    pub(crate) name: String,
    /// On-disk directory derived from `name`.
    pub(crate) namespace: NamespaceName,
    pub(crate) tmp_counter: AtomicU64,
}

/// Thread-safe handle to a directory store. Cloning is cheap.
///
/// # Example
///
/// ```rust
/// use tplat_storage::{FileBackend, OverlayBackend};
///
/// # let tmp = tempfile::tempdir().unwrap();
/// let store = FileBackend::builder().root(tmp.path()).namespace("overrides").open().unwrap();
/// store.put("dm-5.3.0", b"payload").unwrap();
///
/// let path = store.record_path("dm-5.3.0").unwrap();
/// assert!(path.starts_with(store.namespace_dir()));
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    pub(crate) inner: Arc<FileBackendInner>,
}

impl Deref for FileBackend {
    type Target = FileBackendInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FileBackend {
    #[must_use = "The store is not opened until you call .open()"]
    pub fn builder() -> FileBackendBuilder {
        FileBackendBuilder::new()
    }

    /// Directory holding every record of this store.
    #[must_use]
    pub fn namespace_dir(&self) -> PathBuf {
        self.root.join(self.namespace.as_str())
    }

    /// Resolves the physical file of `key` inside the sandbox.
    ///
    /// # Errors
    /// Returns [`StorageError::InvalidKey`] for an empty key and
    /// [`StorageError::PathTraversalAttempt`] if the resolved path leaves the sandbox.
    pub fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        security::resolve_sharded(&self.root, self.namespace.as_str(), &record_file_name(key))
    }

    /// Removes stale temp files left behind by interrupted writes.
    pub fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.namespace_dir());
    }

    fn ensure_reachable(&self) -> Result<(), StorageError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(StorageError::Unavailable {
                message: self.root.display().to_string().into(),
                context: Some("Store root is no longer a reachable directory".into()),
            })
        }
    }

    fn write_atomic(&self, target: &Path, data: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create shards for {}", target.display()))?;
        }

        let temp = unique_tmp_path(target, &self.tmp_counter);
        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(data).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, target) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Io {
                source: err,
                context: Some(
                    format!("Atomic swap failed: {} -> {}", temp.display(), target.display()).into(),
                ),
            });
        }

        if let Some(parent) = target.parent() {
            sync_dir(parent);
        }
        Ok(())
    }
}

impl OverlayBackend for FileBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.ensure_reachable()?;
        let path = self.record_path(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", path.display()).into()),
            }),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.ensure_reachable()?;
        let path = self.record_path(key)?;
        self.write_atomic(&path, value)?;
        debug!(key, path = %path.display(), "Record saved atomically");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_reachable()?;
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, path = %path.display(), "Record deleted");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", path.display()).into()),
            }),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.ensure_reachable()?;
        let dir = self.namespace_dir();
        match fs::remove_dir_all(&dir) {
            Ok(()) => {},
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {},
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Failed to clear: {}", dir.display()).into()),
                });
            },
        }
        fs::create_dir_all(&dir).context(format!("Failed to recreate: {}", dir.display()))?;
        debug!(path = %dir.display(), "Store cleared");
        Ok(())
    }
}

fn record_file_name(key: &str) -> String {
    if key.len() <= MAX_HEX_KEY_LEN {
        hex::encode(key)
    } else {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        format!("{}{DIGEST_SUFFIX}", hex::encode(hasher.finalize()))
    }
}

fn sync_dir(path: &Path) {
    match fs::File::open(path) {
        Ok(dir) => {
            if let Err(err) = dir.sync_all() {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => warn!(path = %path.display(), error = %err, "Directory open failed"),
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("record");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
}
