use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Default identifier of the overlay store.
pub const DEFAULT_OVERLAY_DIRECTORY: &str = "targetplatforms";

/// Top-level catalog configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfigInner {
    pub overlay: OverlayConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(flatten, default)]
    inner: Arc<CatalogConfigInner>,
}

impl Deref for CatalogConfig {
    type Target = CatalogConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for CatalogConfig {
    fn deref_mut(&mut self) -> &mut CatalogConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where administrative overrides are persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Store identifier; also the namespace directory for the filesystem backend.
    pub directory: String,
    pub backend: OverlayBackendKind,
    /// Root directory of the filesystem backend.
    pub data_dir: PathBuf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayBackendKind {
    #[default]
    Memory,
    Filesystem,
}

/// Global subscriber settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; no file output when absent.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
    pub env_filter: Option<String>,
}

// --- Default ---

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OVERLAY_DIRECTORY.to_owned(),
            backend: OverlayBackendKind::Memory,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "tplat".to_owned(),
            level: "info".to_owned(),
            console: true,
            path: None,
            json: false,
            max_files: 10,
            env_filter: None,
        }
    }
}
