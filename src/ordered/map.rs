//! Ordered map with unique keys.
//!
//! This module provides [`TreeMap`], a key/value container kept in key
//! order by a [`SearchTree`]. Each key appears at most once.
//!
//! # Examples
//!
//! ```rust
//! use strata::ordered::TreeMap;
//!
//! let mut map = TreeMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // `at` is the checked lookup, `get_or_insert_default` never fails
//! assert!(map.at(&4).is_err());
//! assert_eq!(*map.get_or_insert_default(4), "");
//! assert_eq!(map.len(), 4);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::error::ContainerResult;
use crate::tree::{Cursor, IntoIter, Iter, IterMut, Position, SearchTree};

// =============================================================================
// TreeMap Definition
// =============================================================================

/// An ordered map backed by an unbalanced search tree.
///
/// Keys must implement `Ord`. Lookups and insertions cost O(depth) of the
/// underlying [`SearchTree`].
///
/// | Operation                    | Complexity |
/// |------------------------------|------------|
/// | `insert` / `insert_or_assign`| O(depth)   |
/// | `get` / `at` / `find`        | O(depth)   |
/// | `remove` / `erase`           | O(depth)   |
/// | `lower_bound` / `upper_bound`| O(depth)   |
/// | `len` / `is_empty`           | O(1)       |
///
/// # Examples
///
/// ```rust
/// use strata::ordered::TreeMap;
///
/// let mut map: TreeMap<String, u32> = TreeMap::new();
/// *map.get_or_insert_default("apples".to_string()) += 3;
/// *map.get_or_insert_default("apples".to_string()) += 2;
/// assert_eq!(map.get("apples"), Some(&5));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone)]
pub struct TreeMap<K, V> {
    tree: SearchTree<K, V>,
}

impl<K, V> TreeMap<K, V> {
    /// Creates a new empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: SearchTree::new(),
        }
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The largest number of entries a map of this type can hold.
    #[must_use]
    pub const fn max_size() -> usize {
        SearchTree::<K, V>::max_size()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two maps.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns an iterator over the entries in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Returns an iterator over the entries with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.tree.iter_mut()
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.tree.keys()
    }

    /// Returns an iterator over the values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.tree.values()
    }

    /// Returns an iterator over mutable references to the values in key order.
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.tree.iter_mut().map(|(_, value)| value)
    }

    /// The entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    /// The entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    /// Position of the smallest entry (`begin`).
    #[must_use]
    pub fn first_position(&self) -> Position {
        self.tree.first_position()
    }

    /// The past-the-end position (`end`).
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

    /// The entry at `position`.
    #[must_use]
    pub fn entry_at(&self, position: Position) -> Option<(&K, &V)> {
        self.tree.entry_at(position)
    }

    /// The value at `position`, mutably.
    pub fn value_at_mut(&mut self, position: Position) -> Option<&mut V> {
        self.tree.value_at_mut(position)
    }

    /// A cursor starting at `position`.
    #[must_use]
    pub fn cursor(&self, position: Position) -> Cursor<'_, K, V> {
        self.tree.cursor(position)
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates a map containing a single entry.
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        let mut map = Self::new();
        map.insert(key, value);
        map
    }

    /// Inserts an entry unless the key is already present.
    ///
    /// Returns the position of the entry holding `key` and whether the map
    /// changed. An existing value is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::ordered::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert!(map.insert(1, "one").1);
    /// assert!(!map.insert(1, "uno").1);
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        self.tree.insert_unique(key, value)
    }

    /// Inserts an entry, replacing the value if the key is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::ordered::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "one");
    /// let (_, inserted) = map.insert_or_assign(1, "uno");
    /// assert!(!inserted);
    /// assert_eq!(map.get(&1), Some(&"uno"));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
        self.tree.insert_or_assign(key, value)
    }

    /// Inserts every entry of `entries` in order, one [`insert`](Self::insert)
    /// per entry.
    ///
    /// Returns one `(position, inserted)` pair per entry. Repeated keys among
    /// the entries resolve left to right: the first one wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::ordered::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// let results = map.insert_many([(1, 'a'), (2, 'b'), (1, 'c')]);
    /// let inserted: Vec<bool> = results.iter().map(|(_, inserted)| *inserted).collect();
    /// assert_eq!(inserted, vec![true, true, false]);
    /// assert_eq!(results[0].0, results[2].0);
    /// assert_eq!(map.get(&1), Some(&'a'));
    /// ```
    pub fn insert_many<I>(&mut self, entries: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        entries
            .into_iter()
            .map(|(key, value)| self.insert(key, value))
            .collect()
    }

    /// Returns the value for `key`, inserting `V::default()` if it is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.tree.get_or_insert_default(key)
    }

    /// Returns a reference to the value for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// Checked lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`](crate::error::ContainerError::KeyNotFound)
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::error::ContainerError;
    /// use strata::ordered::TreeMap;
    ///
    /// let map: TreeMap<i32, i32> = [(1, 10)].into_iter().collect();
    /// assert_eq!(map.at(&1), Ok(&10));
    /// assert_eq!(map.at(&2), Err(ContainerError::KeyNotFound));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> ContainerResult<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.at(key)
    }

    /// Checked mutable lookup.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the key is absent.
    pub fn at_mut<Q>(&mut self, key: &Q) -> ContainerResult<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.at_mut(key)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    /// Position of the entry with `key`, or the end position.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// `0` or `1`.
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        usize::from(self.contains_key(key))
    }

    /// Position of the first entry whose key is not less than `key`.
    #[must_use]
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound(key)
    }

    /// Position of the first entry whose key is greater than `key`.
    #[must_use]
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.upper_bound(key)
    }

    /// `(lower_bound(key), upper_bound(key))`.
    #[must_use]
    pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.equal_range(key)
    }

    /// Removes `key`, returning its value. A missing key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.erase_key(key)
    }

    /// Removes the first entry (in key order) whose value equals `value`.
    pub fn remove_by_value(&mut self, value: &V) -> Option<(K, V)>
    where
        V: PartialEq,
    {
        self.tree.erase_by_value(value)
    }

    /// Removes the entry at `position`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for the end position or a stale position.
    pub fn erase(&mut self, position: Position) -> ContainerResult<(K, V)> {
        self.tree.erase(position)
    }

    /// Moves every entry of `other` whose key is not in `self` into `self`.
    ///
    /// `other` is left empty; entries whose key was already present are
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::ordered::TreeMap;
    ///
    /// let mut left: TreeMap<i32, &str> = [(1, "a"), (2, "a")].into_iter().collect();
    /// let mut right: TreeMap<i32, &str> = [(2, "b"), (3, "b")].into_iter().collect();
    /// left.merge(&mut right);
    /// assert_eq!(left.get(&2), Some(&"a"));
    /// assert_eq!(left.get(&3), Some(&"b"));
    /// assert!(right.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_unique(&mut other.tree);
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for TreeMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K, V> IntoIterator for TreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut TreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq> Eq for TreeMap<K, V> {}

impl<K: Hash, V: Hash> Hash for TreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for TreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for TreeMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct TreeMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for TreeMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = TreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = TreeMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert_or_assign(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for TreeMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeMapVisitor {
            marker: std::marker::PhantomData,
        })
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
        let map: TreeMap<String, i32> = [("b".to_string(), 2), ("a".to_string(), 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
    }

    #[rstest]
    fn test_roundtrip() {
        let original: TreeMap<String, i32> = [("x".to_string(), 1), ("y".to_string(), 2)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&original).unwrap();
        let restored: TreeMap<String, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
