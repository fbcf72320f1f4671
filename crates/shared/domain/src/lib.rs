//! # Domain Models
//!
//! Pure catalog types with minimal dependencies (`serde`, `chrono`, `typed-builder`).
//! Keep it lean: no I/O, locking, or resolution logic. Just the declared descriptors,
//! the administrative overlay record, the resolved views and configuration.

pub mod config;
pub mod descriptor;
pub mod overlay;
pub mod target;

pub use descriptor::{PackageDescriptor, PlatformDescriptor, ServiceConfiguration, TargetDescriptor};
pub use overlay::{OverlayRecord, TriState};
pub use target::{
    Target, TargetPackage, TargetPackageInfo, TargetPlatform, TargetPlatformInfo,
    TargetPlatformInstance,
};
