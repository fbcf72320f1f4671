//! Keyed contribution store with last-write-wins overrides.
//!
//! Listing order is registration order: the first `add` of a key fixes its position and later
//! overrides replace the value in place. Values are handed out as `Arc<T>`, so readers never
//! observe a half-applied override.

use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tplat_domain::{PackageDescriptor, PlatformDescriptor, ServiceConfiguration};

/// A value that can be contributed under a key.
pub trait Contribution {
    fn contribution_key(&self) -> &str;
}

impl Contribution for PlatformDescriptor {
    fn contribution_key(&self) -> &str {
        self.id()
    }
}

impl Contribution for PackageDescriptor {
    fn contribution_key(&self) -> &str {
        self.id()
    }
}

impl Contribution for ServiceConfiguration {
    // Every configuration lands in the same slot.
    fn contribution_key(&self) -> &str {
        Self::KEY
    }
}

/// Outcome of [`ContributionRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    Overridden,
}

struct Index<T> {
    values: FxHashMap<String, Arc<T>>,
    order: Vec<String>,
}

impl<T> Default for Index<T> {
    fn default() -> Self {
        Self { values: FxHashMap::default(), order: Vec::new() }
    }
}

/// Thread-safe registry handle. Cloning shares the underlying index.
pub struct ContributionRegistry<T> {
    inner: Arc<RwLock<Index<T>>>,
}

impl<T> Clone for ContributionRegistry<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Default for ContributionRegistry<T> {
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(Index::default())) }
    }
}

impl<T> fmt::Debug for ContributionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self.inner.read();
        f.debug_struct("ContributionRegistry").field("keys", &index.order).finish()
    }
}

impl<T> ContributionRegistry<T>
where
    T: Contribution + PartialEq,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing any previous value under the same key without moving it.
    pub fn add(&self, value: T) -> Registration {
        let key = value.contribution_key().to_owned();
        let value = Arc::new(value);
        let mut index = self.inner.write();
        if index.values.insert(key.clone(), value).is_some() {
            Registration::Overridden
        } else {
            index.order.push(key);
            Registration::Added
        }
    }

    /// Removes the mapping for the key of `value`, but only while it still holds an equal value.
    ///
    /// A stale remove arriving after a newer override is ignored. Returns whether anything
    /// was removed.
    pub fn remove(&self, value: &T) -> bool {
        let key = value.contribution_key();
        let mut index = self.inner.write();
        match index.values.get(key) {
            Some(current) if **current == *value => {},
            _ => return false,
        }
        index.values.remove(key);
        index.order.retain(|k| k != key);
        true
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.inner.read().values.get(key).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().values.contains_key(key)
    }

    /// Snapshot of every value in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<T>> {
        let index = self.inner.read();
        index.order.iter().filter_map(|key| index.values.get(key).cloned()).collect()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().order.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut index = self.inner.write();
        index.values.clear();
        index.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        key: &'static str,
        value: u32,
    }

    impl Contribution for Item {
        fn contribution_key(&self) -> &str {
            self.key
        }
    }

    #[test]
    fn override_keeps_first_position() {
        let registry = ContributionRegistry::new();
        assert_eq!(registry.add(Item { key: "a", value: 1 }), Registration::Added);
        assert_eq!(registry.add(Item { key: "b", value: 2 }), Registration::Added);
        assert_eq!(registry.add(Item { key: "a", value: 3 }), Registration::Overridden);

        let values: Vec<u32> = registry.list().iter().map(|item| item.value).collect();
        assert_eq!(values, vec![3, 2]);
        assert_eq!(registry.keys(), vec!["a", "b"]);
    }

    #[test]
    fn stale_remove_is_ignored() {
        let registry = ContributionRegistry::new();
        registry.add(Item { key: "a", value: 1 });
        registry.add(Item { key: "a", value: 2 });

        assert!(!registry.remove(&Item { key: "a", value: 1 }));
        assert_eq!(registry.get("a").map(|item| item.value), Some(2));

        assert!(registry.remove(&Item { key: "a", value: 2 }));
        assert!(registry.get("a").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn readd_after_remove_goes_last() {
        let registry = ContributionRegistry::new();
        registry.add(Item { key: "a", value: 1 });
        registry.add(Item { key: "b", value: 2 });
        registry.remove(&Item { key: "a", value: 1 });
        registry.add(Item { key: "a", value: 1 });

        assert_eq!(registry.keys(), vec!["b", "a"]);
    }
}
