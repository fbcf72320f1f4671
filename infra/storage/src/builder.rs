use crate::error::{StorageError, StorageErrorExt};
use crate::file::{FileBackend, FileBackendInner};
use crate::namespace::NamespaceName;
use private::Sealed;
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing::info;

const DEFAULT_NAMESPACE: &str = "targetplatforms";

#[derive(Debug, Clone)]
struct FileBackendConfig {
    namespace: Cow<'static, str>,
    create: bool,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self { namespace: Cow::Borrowed(DEFAULT_NAMESPACE), create: true }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct FileBackendBuilder<S: Sealed = NoRoot> {
    state: S,
    config: FileBackendConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> FileBackendBuilder<S> {
    #[must_use = "Sets the namespace directory (and store name) of the backend"]
    pub fn namespace(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.config.namespace = name.into();
        self
    }

    #[must_use = "Sets whether the root directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> FileBackendBuilder<N> {
        FileBackendBuilder { state, config: self.config }
    }
}

impl FileBackendBuilder<NoRoot> {
    #[must_use = "Creates a new backend builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the root directory of the sandbox"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileBackendBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl FileBackendBuilder<WithRoot> {
    /// Opens the store.
    ///
    /// 1. **Bootstrapping**: creates the root when `create(true)` (the default) was set.
    /// 2. **Canonicalization**: resolves the root to its physical path so symlinks cannot be
    ///    used to escape the sandbox.
    /// 3. **Namespace**: derives the directory from the store name
    ///    ([`NamespaceName::sanitize`]) and creates it. [`crate::OverlayBackend::name`] still
    ///    reports the name as given.
    /// 4. **Self-Healing**: purges orphaned temp files of interrupted writes. Failures are
    ///    only logged.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] for an empty namespace name and
    /// [`StorageError::Io`] if the root cannot be created or resolved.
    pub fn open(self) -> Result<FileBackend, StorageError> {
        let root = &self.state.0;
        let namespace = NamespaceName::sanitize(&self.config.namespace)?;

        if self.config.create {
            fs::create_dir_all(root)
                .context(format!("Failed to bootstrap store root: {}", root.display()))?;
        }

        let canonical = fs::canonicalize(root)
            .context(format!("Failed to resolve store root: {}", root.display()))?;

        let namespace_dir = canonical.join(namespace.as_str());
        fs::create_dir_all(&namespace_dir)
            .context(format!("Failed to create namespace: {}", namespace_dir.display()))?;

        info!(store = %self.config.namespace, path = %namespace_dir.display(), "Opened overlay store");

        let backend = FileBackend {
            inner: Arc::new(FileBackendInner {
                root: canonical,
                name: self.config.namespace.into_owned(),
                namespace,
                tmp_counter: AtomicU64::new(1),
            }),
        };
        backend.purge_tmp();

        Ok(backend)
    }
}
