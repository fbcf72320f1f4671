use crate::error::StorageError;
use std::fmt;

/// Validated directory name of a store: lowercase ASCII alphanumerics and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceName(String);

impl NamespaceName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory name for an arbitrary store identifier.
    ///
    /// Identifiers made of ASCII alphanumerics and `_` are lowercased; anything else is
    /// hex-encoded behind a `ns_` prefix, so separators and dots never reach the file system.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] for an empty identifier.
    pub fn sanitize(identifier: &str) -> Result<Self, StorageError> {
        if identifier.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Self::try_from(identifier)
        } else {
            Self::try_from(format!("ns_{}", hex::encode(identifier)))
        }
    }
}

impl TryFrom<String> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        let name = value.to_lowercase();

        if name.is_empty() {
            return Err(StorageError::PathTraversalAttempt {
                message: "EMPTY".into(),
                context: Some("Namespace cannot be empty".into()),
            });
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StorageError::PathTraversalAttempt {
                message: name.into(),
                context: Some("Namespace contains illegal characters".into()),
            });
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for NamespaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
