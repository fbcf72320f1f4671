//! # Target Platform Catalog
//!
//! Merges host-contributed platform and package descriptors with a persistent administrative
//! overlay and serves resolved views of them.
//!
//! ## Architecture
//!
//! 1.  **Registries**: one [`ContributionRegistry`](tplat_kernel::ContributionRegistry) per kind
//!     plus the single-slot [`ConfigurationRegistry`]. Later contributions override earlier
//!     ones in place.
//! 2.  **Overlay ([`OverrideStore`])**: per-id tri-state `enabled` / `restricted` overrides on
//!     top of an [`OverlayBackend`](tplat_storage::OverlayBackend).
//! 3.  **Resolution ([`PlatformCatalog`], [`PackageCatalog`])**: applies the overlay, follows
//!     parent chains with a bounded cycle guard and reverse-indexes packages onto platforms.
//! 4.  **Projections ([`projection`])**: info and instance views derived from a fully resolved
//!     entity.
//!
//! [`TargetPlatformService`] ties the pieces together and receives contributions through
//! [`ContributionSink`].
//!
//! ## Failure model
//!
//! Unknown ids, dangling parents and unknown instance packages are lenient (`None`, or skipped
//! with a warning). An unreachable overlay store is always an error.

mod chain;
mod configuration;
mod contribution;
mod error;
mod filter;
mod overlay;
mod packages;
mod platforms;
pub mod projection;
mod service;

pub use configuration::ConfigurationRegistry;
pub use contribution::{Contribution, ContributionEvent, ContributionSink, apply, apply_all};
pub use error::{CatalogError, CatalogErrorExt};
pub use filter::TargetFilter;
pub use overlay::OverrideStore;
pub use packages::PackageCatalog;
pub use platforms::PlatformCatalog;
pub use service::TargetPlatformService;
