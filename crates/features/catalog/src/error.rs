use std::borrow::Cow;
use tplat_storage::StorageError;

/// Errors surfaced by the catalog.
///
/// Lookups of unknown ids are not errors; they resolve to `None`.
#[tplat_derive::tplat_error]
pub enum CatalogError {
    /// The overlay store could not be reached. Never downgraded to "no overlay".
    #[error("Overlay store unavailable{}: {source}", format_context(.context))]
    OverlayUnavailable { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Overlay record corrupted{}: {source}", format_context(.context))]
    OverlayCorrupted { source: postcard::Error, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
