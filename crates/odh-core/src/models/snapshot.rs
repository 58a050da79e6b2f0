use std::ops::Deref;
use std::sync::Arc;

use super::ConnectionType;

/// The latest fetched copy of a resource collection.
///
/// Cloning is cheap (shared `Arc`). A fetch whose result deep-equals the
/// current snapshot keeps the existing allocation, so consumers can use
/// [`ResourceSnapshot::ptr_eq`] to skip redundant work.
#[derive(Debug)]
pub struct ResourceSnapshot<T = ConnectionType> {
    items: Arc<Vec<T>>,
}

impl<T> Clone for ResourceSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for ResourceSnapshot<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: PartialEq> PartialEq for ResourceSnapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.items == other.items
    }
}

impl<T> Deref for ResourceSnapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> ResourceSnapshot<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// True when both snapshots share the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: PartialEq> ResourceSnapshot<T> {
    /// Swap in a freshly fetched list unless it deep-equals the current one.
    /// Returns whether the snapshot changed.
    pub fn replace_if_changed(&mut self, next: Vec<T>) -> bool {
        if *self.items == next {
            return false;
        }
        self.items = Arc::new(next);
        true
    }
}

impl ResourceSnapshot<ConnectionType> {
    pub fn find(&self, name: &str) -> Option<&ConnectionType> {
        self.items.iter().find(|ct| ct.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_fetch_keeps_allocation() {
        let mut snapshot = ResourceSnapshot::new(vec![ConnectionType::new("a").with_enabled(false)]);
        let before = snapshot.clone();

        let changed = snapshot.replace_if_changed(vec![ConnectionType::new("a").with_enabled(false)]);

        assert!(!changed);
        assert!(snapshot.ptr_eq(&before));
    }

    #[test]
    fn test_changed_fetch_replaces_allocation() {
        let mut snapshot = ResourceSnapshot::new(vec![ConnectionType::new("a").with_enabled(false)]);
        let before = snapshot.clone();

        let changed = snapshot.replace_if_changed(vec![ConnectionType::new("a").with_enabled(true)]);

        assert!(changed);
        assert!(!snapshot.ptr_eq(&before));
        assert!(snapshot.find("a").unwrap().enabled());
        // The old handle still sees the old data
        assert!(!before.find("a").unwrap().enabled());
    }

    #[test]
    fn test_order_matters_for_equality() {
        let a = ResourceSnapshot::new(vec![ConnectionType::new("a"), ConnectionType::new("b")]);
        let b = ResourceSnapshot::new(vec![ConnectionType::new("b"), ConnectionType::new("a")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_find_missing() {
        let snapshot: ResourceSnapshot = ResourceSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.find("a").is_none());
    }
}
