use fxhash::FxHashSet;
use tracing::warn;

/// Longest parent chain followed before giving up.
pub(crate) const MAX_PARENT_DEPTH: usize = 64;

/// Visited-set guard for parent chains of externally contributed data.
///
/// A link that would revisit an id, or exceed [`MAX_PARENT_DEPTH`], is reported and treated as
/// a missing parent instead of failing the resolution.
#[derive(Debug, Default)]
pub(crate) struct ParentChain {
    visited: FxHashSet<String>,
}

impl ParentChain {
    pub(crate) fn enter(&mut self, id: &str) {
        self.visited.insert(id.to_owned());
    }

    /// Whether the link `child -> parent` may be followed.
    pub(crate) fn admits(&self, kind: &str, child: &str, parent: &str) -> bool {
        if self.visited.contains(parent) {
            warn!(kind, id = child, parent, "Parent chain cycle detected, ignoring parent");
            return false;
        }
        if self.visited.len() >= MAX_PARENT_DEPTH {
            warn!(kind, id = child, parent, depth = self.visited.len(), "Parent chain too deep");
            return false;
        }
        true
    }
}
