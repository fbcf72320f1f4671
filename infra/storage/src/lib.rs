//! Backing stores for the administrative overlay.
//!
//! The catalog only needs a small keyed byte store: [`OverlayBackend`]. Two implementations
//! ship with the crate:
//!
//! - **[`MemoryBackend`]**: process-local map, the default for tests and ephemeral setups.
//! - **[`FileBackend`]**: a sandboxed directory store.
//!   - **Sandbox Security**: path traversal protection using physical path canonicalization.
//!   - **Atomic Writes**: unique temp write + `fsync` + `rename`, so a record is never torn.
//!   - **Namespacing & Sharding**: one namespace directory per store, keys hex-encoded into
//!     sharded file names.
//!   - **Self-Healing**: orphaned temporary files are purged when the store is opened.
//!
//! # Examples
//!
//! ```rust
//! use tplat_storage::{FileBackend, OverlayBackend, StorageError};
//!
//! fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("data");
//!     let store = FileBackend::builder().root(&root).namespace("targetplatforms").open()?;
//!
//!     store.put("cap-5.8", b"record")?;
//!     assert_eq!(store.get("cap-5.8")?.as_deref(), Some(&b"record"[..]));
//!
//!     store.delete("cap-5.8")?;
//!     assert!(store.get("cap-5.8")?.is_none());
//!     Ok(())
//! }
//! ```

mod backend;
mod builder;
mod error;
mod file;
mod maintenance;
mod memory;
mod namespace;
mod security;

pub use backend::OverlayBackend;
pub use builder::FileBackendBuilder;
pub use error::{StorageError, StorageErrorExt};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use namespace::NamespaceName;
