//! Kernel utilities shared across slices.
//! Keep this crate lightweight: version ordering, the contribution registry and config loading.
//!
//! ## Version ordering
//! ```rust
//! use tplat_kernel::version::Versioned;
//!
//! assert!("5.8".is_version("5.8.0"));
//! assert!("5.8".is_after_version("5.6"));
//! assert!(!"5.8".is_strictly_before_version("5.6"));
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use tplat_kernel::config::load_config;
//! use tplat_kernel::domain::config::CatalogConfig;
//!
//! let cfg: CatalogConfig = load_config(Some("catalog")).unwrap();
//! ```
pub mod config;
pub mod registry;
pub mod version;

pub use tplat_domain as domain;

pub use registry::{Contribution, ContributionRegistry, Registration};
pub use version::{Versioned, cmp_by_name_version, compare_versions};
