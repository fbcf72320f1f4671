#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the catalog workspace.
//! At the moment this is a single attribute macro that turns a plain enum into
//! the error type shape every crate in the workspace shares.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! tplat-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to results of every wrapped source error type.
/// * **Standard Conversions**: Implements `From<Source>` for variants carrying a
///   `source` field (or a field marked `#[source]`) next to `context`.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>`
///   when an `Internal { message, context }` variant exists.
/// * **`format_context`**: Emits a module-level helper used inside `#[error(..)]`
///   strings to render the optional context.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Every variant must use named fields.
/// 3. A variant with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[tplat_derive::tplat_error]
/// pub enum StoreError {
///     #[error("Store I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Vec<u8>, StoreError> {
///     std::fs::read("overlay.bin").context("Reading overlay")
/// }
/// ```
#[proc_macro_attribute]
pub fn tplat_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
