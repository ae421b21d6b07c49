//! Ordered multiset.
//!
//! [`TreeMultiset`] keeps every inserted value, including repeats. Equal
//! elements are stored as separate nodes and iterate in insertion order.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::{KeyIntoIter, KeyIter};
use crate::error::ContainerResult;
use crate::tree::{Position, SearchTree};

/// An ordered collection that admits repeated elements.
///
/// # Examples
///
/// ```rust
/// use strata::ordered::TreeMultiset;
///
/// let mut bag = TreeMultiset::new();
/// for value in [2, 1, 2, 3, 2] {
///     bag.insert(value);
/// }
/// assert_eq!(bag.len(), 5);
/// assert_eq!(bag.count(&2), 3);
///
/// let (low, high) = bag.equal_range(&2);
/// assert_eq!(bag.get_at(low), Some(&2));
/// assert_eq!(bag.get_at(high), Some(&3));
/// ```
#[derive(Clone)]
pub struct TreeMultiset<T> {
    tree: SearchTree<T, ()>,
}

impl<T> TreeMultiset<T> {
    /// Creates a new empty multiset.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: SearchTree::new(),
        }
    }

    /// Returns the number of elements, counting repeats.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of stored elements that repeat an already present value.
    ///
    /// For `{1, 2, 2, 2}` this is `2`.
    #[must_use]
    pub const fn duplicate_count(&self) -> usize {
        self.tree.duplicate_count()
    }

    /// The largest number of elements a multiset of this type can hold.
    #[must_use]
    pub const fn max_size() -> usize {
        SearchTree::<T, ()>::max_size()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two multisets.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> KeyIter<'_, T> {
        KeyIter::new(self.tree.iter())
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

impl<T: Ord> TreeMultiset<T> {
    /// Inserts `value`, after any elements equal to it.
    pub fn insert(&mut self, value: T) -> Position {
        self.tree.insert_duplicate(value, ())
    }

    /// Inserts every value in order. Every entry reports `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::ordered::TreeMultiset;
    ///
    /// let mut bag = TreeMultiset::new();
    /// let positions = bag.insert_many([4, 4, 1]);
    /// assert_eq!(positions.len(), 3);
    /// assert!(positions.iter().all(|&(_, inserted)| inserted));
    /// assert_ne!(positions[0].0, positions[1].0);
    /// assert_eq!(bag.iter().copied().collect::<Vec<_>>(), vec![1, 4, 4]);
    /// ```
    pub fn insert_many<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .map(|value| (self.insert(value), true))
            .collect()
    }

    /// The number of elements equal to `value`.
    #[must_use]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.count(value)
    }

    /// Returns `true` if at least one element equals `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(value)
    }

    /// Position of the first element equal to `value`, or the end position.
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

    /// `(lower_bound(value), upper_bound(value))`.
    #[must_use]
    pub fn equal_range<Q>(&self, value: &Q) -> (Position, Position)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.equal_range(value)
    }

    /// Removes one element equal to `value`, the earliest inserted.
    pub fn remove_one<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree.lower_bound(value);
        let (element, ()) = self.tree.entry_at(position)?;
        if Borrow::<Q>::borrow(element) != value {
            return None;
        }
        self.tree.erase(position).ok().map(|(element, ())| element)
    }

    /// Removes every element equal to `value` and returns how many there were.
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut removed = 0;
        while self.remove_one(value).is_some() {
            removed += 1;
        }
        removed
    }

    /// Removes the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for the end position or a stale position.
    pub fn erase(&mut self, position: Position) -> ContainerResult<T> {
        self.tree.erase(position).map(|(element, ())| element)
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_duplicate(&mut other.tree);
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for TreeMultiset<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for TreeMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = Self::new();
        multiset.extend(iter);
        multiset
    }
}

impl<T: Ord> Extend<T> for TreeMultiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> IntoIterator for TreeMultiset<T> {
    type Item = T;
    type IntoIter = KeyIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        KeyIntoIter::new(self.tree.into_iter())
    }
}

impl<'a, T> IntoIterator for &'a TreeMultiset<T> {
    type Item = &'a T;
    type IntoIter = KeyIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for TreeMultiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq> Eq for TreeMultiset<T> {}

impl<T: Hash> Hash for TreeMultiset<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeMultiset<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for TreeMultiset<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_braced(formatter, self.iter())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for TreeMultiset<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::serde_support::serialize_elements(serializer, self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for TreeMultiset<T>
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
