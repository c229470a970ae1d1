//! Ordered collection substrate for map state.
//!
//! The reconcilers never touch a concrete container directly. They mutate
//! anything implementing [`OrderedStore`], which exposes only index-based
//! access: append, remove by index, read by index, length and clear.
//!
//! [`Collection`] is the in-process implementation used for feature sets
//! (AIS vessels, track, route) and for the active layer stack.
//!
//! # Concurrency
//!
//! Stores carry no internal locking. Every mutating operation takes
//! `&mut self`, so a store can only be reconciled by one caller at a time.

/// Index-addressed ordered collection.
pub trait OrderedStore<T> {
    /// Append an item at the end.
    fn append(&mut self, item: T);

    /// Remove and return the item at `index`, shifting later items down.
    ///
    /// Returns `None` if `index` is out of range.
    fn remove_at(&mut self, index: usize) -> Option<T>;

    /// Borrow the item at `index`.
    fn item_at(&self, index: usize) -> Option<&T>;

    /// Mutably borrow the item at `index`.
    fn item_at_mut(&mut self, index: usize) -> Option<&mut T>;

    /// Number of items in the store.
    fn len(&self) -> usize;

    /// Remove every item.
    fn clear(&mut self);

    /// Returns `true` if the store holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vec-backed [`OrderedStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// View the items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> OrderedStore<T> for Collection<T> {
    fn append(&mut self, item: T) {
        self.items.push(item);
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    fn item_at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn item_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut c = Collection::new();
        c.append("a");
        c.append("b");
        c.append("c");
        assert_eq!(c.as_slice(), &["a", "b", "c"]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_remove_at_shifts_items() {
        let mut c: Collection<i32> = vec![1, 2, 3].into();
        assert_eq!(c.remove_at(1), Some(2));
        assert_eq!(c.item_at(1), Some(&3));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut c: Collection<i32> = vec![1].into();
        assert_eq!(c.remove_at(5), None);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_item_at_mut() {
        let mut c: Collection<i32> = vec![1, 2].into();
        if let Some(v) = c.item_at_mut(0) {
            *v = 10;
        }
        assert_eq!(c.as_slice(), &[10, 2]);
    }

    #[test]
    fn test_clear() {
        let mut c: Collection<i32> = (0..5).collect();
        assert!(!c.is_empty());
        c.clear();
        assert!(c.is_empty());
    }
}
