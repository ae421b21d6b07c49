//! Ordered set with unique elements.
//!
//! # Examples
//!
//! ```rust
//! use strata::ordered::TreeSet;
//!
//! let set: TreeSet<i32> = [3, 1, 4, 1, 5].into_iter().collect();
//! assert_eq!(set.len(), 4);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::{KeyIntoIter, KeyIter};
use crate::error::ContainerResult;
use crate::tree::{Position, SearchTree};

/// An ordered set of unique elements.
///
/// The set is a [`SearchTree`] whose nodes carry no payload. Inserting a value
/// that is already present leaves the set unchanged and reports the position
/// of the existing element.
///
/// # Examples
///
/// ```rust
/// use strata::ordered::TreeSet;
///
/// let mut set = TreeSet::new();
/// let (position, inserted) = set.insert("kiwi");
/// assert!(inserted);
/// assert_eq!(set.insert("kiwi"), (position, false));
/// assert_eq!(set.get_at(position), Some(&"kiwi"));
/// ```
#[derive(Clone)]
pub struct TreeSet<T> {
    tree: SearchTree<T, ()>,
}

impl<T> TreeSet<T> {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: SearchTree::new(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The largest number of elements a set of this type can hold.
    #[must_use]
    pub const fn max_size() -> usize {
        SearchTree::<T, ()>::max_size()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two sets.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> KeyIter<'_, T> {
        KeyIter::new(self.tree.iter())
    }

    /// The smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|(element, ())| element)
    }

    /// The largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|(element, ())| element)
    }

    /// Position of the smallest element.
    #[must_use]
    pub fn first_position(&self) -> Position {
        self.tree.first_position()
    }

    /// The past-the-end position.
    #[must_use]
    pub const fn end_position(&self) -> Position {
        self.tree.end_position()
    }

    /// See [`SearchTree::next_position`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for a stale position.
    pub fn next_position(&self, position: Position) -> ContainerResult<Position> {
        self.tree.next_position(position)
    }

    /// See [`SearchTree::prev_position`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for a stale position.
    pub fn prev_position(&self, position: Position) -> ContainerResult<Position> {
        self.tree.prev_position(position)
    }

    /// The element at `position`.
    #[must_use]
    pub fn get_at(&self, position: Position) -> Option<&T> {
        self.tree.entry_at(position).map(|(element, ())| element)
    }
}

impl<T: Ord> TreeSet<T> {
    /// Inserts `value` unless an equal element is present.
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        self.tree.insert_unique(value, ())
    }

    /// Inserts every value in order; see [`TreeMap::insert_many`](crate::ordered::TreeMap::insert_many).
    pub fn insert_many<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(|value| self.insert(value)).collect()
    }

    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(value)
    }

    /// `0` or `1`.
    #[must_use]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        usize::from(self.contains(value))
    }

    /// Position of the element equal to `value`, or the end position.
    #[must_use]
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(value)
    }

    /// Position of the first element not less than `value`.
    #[must_use]
    pub fn lower_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound(value)
    }

    /// Position of the first element greater than `value`.
    #[must_use]
    pub fn upper_bound<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.upper_bound(value)
    }

    /// Removes the element equal to `value`, returning it.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.erase_key(value).map(|(element, ())| element)
    }

    /// Removes the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for the end position or a stale position.
    pub fn erase(&mut self, position: Position) -> ContainerResult<T> {
        self.tree.erase(position).map(|(element, ())| element)
    }

    /// Moves the elements of `other` that `self` lacks into `self`, leaving
    /// `other` empty.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_unique(&mut other.tree);
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for TreeSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for TreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> IntoIterator for TreeSet<T> {
    type Item = T;
    type IntoIter = KeyIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        KeyIntoIter::new(self.tree.into_iter())
    }
}

impl<'a, T> IntoIterator for &'a TreeSet<T> {
    type Item = &'a T;
    type IntoIter = KeyIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for TreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq> Eq for TreeSet<T> {}

impl<T: Hash> Hash for TreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for TreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_braced(formatter, self.iter())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for TreeSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::serde_support::serialize_elements(serializer, self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for TreeSet<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(crate::serde_support::ExtendVisitor::new("a sequence"))
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_sorted() {
        let set: TreeSet<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3]");
    }

    #[rstest]
    fn test_deserialize_drops_duplicates() {
        let set: TreeSet<i32> = serde_json::from_str("[3,1,3,2]").unwrap();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
