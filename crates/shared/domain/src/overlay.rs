use serde::{Deserialize, Serialize};

/// One administrative axis: either left to the declared value or forced to a boolean.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    #[default]
    Unset,
    Forced(bool),
}

impl TriState {
    /// Resolved value: the forced one when set, otherwise `declared`.
    #[must_use]
    pub const fn resolve(self, declared: bool) -> bool {
        match self {
            Self::Unset => declared,
            Self::Forced(value) => value,
        }
    }

    #[must_use]
    pub const fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub const fn value(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Forced(value) => Some(value),
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        Self::Forced(value)
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unset, Self::Forced)
    }
}

/// Administrative state persisted per id, independent of the entity kind.
///
/// Both axes are orthogonal. A missing record is equivalent to [`OverlayRecord::default`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayRecord {
    pub enabled: TriState,
    pub restricted: TriState,
}

impl OverlayRecord {
    /// True when neither axis is forced, i.e. the record carries no information.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.enabled.is_unset() && self.restricted.is_unset()
    }

    #[must_use]
    pub const fn enabled(&self, declared: bool) -> bool {
        self.enabled.resolve(declared)
    }

    #[must_use]
    pub const fn restricted(&self, declared: bool) -> bool {
        self.restricted.resolve(declared)
    }
}
