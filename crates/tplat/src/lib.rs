//! Facade crate for the target platform catalog.
//! Re-exports the domain, kernel, storage and catalog crates and wires a service from config.
//! Keep this crate thin: it should compose other crates, not implement catalog logic.
//!
//! ## Usage
//! ```rust,no_run
//! use tplat::domain::config::CatalogConfig;
//!
//! # fn main() -> Result<(), tplat::InitError> {
//! let config: CatalogConfig = tplat::kernel::config::load_config(Some("catalog.toml"))?;
//! let service = tplat::open_service(&config)?;
//! assert!(service.get_default_platform()?.is_none());
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use tplat_domain::config::{CatalogConfig, OverlayBackendKind, OverlayConfig};
use tplat_storage::{FileBackend, MemoryBackend, StorageError};
use tracing::info;

pub use tplat_catalog as catalog;
pub use tplat_domain as domain;
pub use tplat_kernel as kernel;
#[cfg(feature = "logging")]
pub use tplat_logger as logger;
pub use tplat_storage as storage;

pub use tplat_catalog::{CatalogError, TargetPlatformService};

/// Startup failures.
#[tplat_derive::tplat_error]
pub enum InitError {
    #[error("Configuration failed{}: {source}", format_context(.context))]
    Config { source: tplat_kernel::config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Overlay store failed to open{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Catalog failed{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },

    #[cfg(feature = "logging")]
    #[error("Logger failed{}: {source}", format_context(.context))]
    Logger { source: tplat_logger::LoggerError, context: Option<Cow<'static, str>> },
}

/// Builds a service over the overlay backend selected by `config.overlay`.
///
/// # Errors
/// Returns [`InitError::Storage`] when the filesystem store cannot be opened.
pub fn open_service(config: &CatalogConfig) -> Result<TargetPlatformService, InitError> {
    let overlay: &OverlayConfig = &config.overlay;
    let service = match overlay.backend {
        OverlayBackendKind::Memory => {
            TargetPlatformService::with_backend(MemoryBackend::new(overlay.directory.clone()))
        },
        OverlayBackendKind::Filesystem => {
            let backend = FileBackend::builder()
                .root(&overlay.data_dir)
                .namespace(overlay.directory.clone())
                .open()
                .context(format!("Opening overlay under {}", overlay.data_dir.display()))?;
            TargetPlatformService::with_backend(backend)
        },
    };
    info!(backend = ?overlay.backend, store = service.override_directory(), "Target platform service ready");
    Ok(service)
}

/// Installs the global subscriber described by `config.logging`.
///
/// Keep the returned guard alive for the lifetime of the process.
///
/// # Errors
/// Returns [`InitError::Logger`] for invalid settings or a second installation.
#[cfg(feature = "logging")]
pub fn init_logging(config: &CatalogConfig) -> Result<tplat_logger::Logger, InitError> {
    tplat_logger::Logger::from_config(&config.logging).context("Installing global subscriber")
}
