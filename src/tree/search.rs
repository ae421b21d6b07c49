//! The search tree itself: insertion, lookup, bound queries, erase and merge.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::cursor::{Cursor, IntoIter, Iter, IterMut, Position};
use super::node::{Node, Side};
use crate::arena::{Arena, SlotId};
use crate::error::{ContainerError, ContainerResult};

// =============================================================================
// SearchTree Definition
// =============================================================================

/// An unbalanced binary search tree with parent links.
///
/// `SearchTree` is the storage engine behind [`TreeMap`], [`TreeSet`] and
/// [`TreeMultiset`]. It stores key/value pairs in an arena and exposes both
/// Rust iterators and [`Position`] handles that stay valid until
/// the element they point at is erased.
///
/// The tree never rebalances. Every operation below costs O(depth), which is
/// O(log N) for random insertion orders and O(N) for sorted ones. All
/// algorithms are iterative, so a degenerate tree cannot overflow the stack.
///
/// # Duplicate Keys
///
/// [`insert_duplicate`](Self::insert_duplicate) places a repeated key right
/// after the last element with the same key. Equal keys therefore never appear
/// in a left subtree and iterate in insertion order.
///
/// # Time Complexity
///
/// | Operation                         | Complexity   |
/// |-----------------------------------|--------------|
/// | `insert_*`, `find`, `erase`       | O(depth)     |
/// | `lower_bound` / `upper_bound`     | O(depth)     |
/// | `count`                           | O(depth + k) |
/// | `merge_*`                         | O(M · depth) |
/// | `len` / `is_empty`                | O(1)         |
///
/// # Examples
///
/// ```rust
/// use strata::tree::SearchTree;
///
/// let mut tree = SearchTree::new();
/// for key in [10, 5, 15, 3, 7] {
///     tree.insert_unique(key, key * 10);
/// }
///
/// let keys: Vec<i32> = tree.keys().copied().collect();
/// assert_eq!(keys, vec![3, 5, 7, 10, 15]);
///
/// let position = tree.find(&7);
/// assert_eq!(tree.entry_at(position), Some((&7, &70)));
/// ```
///
/// [`TreeMap`]: crate::ordered::TreeMap
/// [`TreeSet`]: crate::ordered::TreeSet
/// [`TreeMultiset`]: crate::ordered::TreeMultiset
#[derive(Clone)]
pub struct SearchTree<K, V> {
    pub(super) arena: Arena<Node<K, V>>,
    pub(super) root: Option<usize>,
    /// Nodes that were inserted onto an already present key.
    duplicate_count: usize,
}

/// Outcome of a unique-key descent.
enum Probe {
    Found(usize),
    Vacant(Option<(usize, Side)>),
}

impl<K, V> SearchTree<K, V> {
    /// Creates an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::SearchTree;
    ///
    /// let tree: SearchTree<i32, &str> = SearchTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            duplicate_count: 0,
        }
    }

    /// Returns the number of elements in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns how many elements were inserted onto a key that was already
    /// present, summed over all keys.
    ///
    /// This is a tree-wide figure. Use [`count`](Self::count) for the number
    /// of elements sharing one particular key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::SearchTree;
    ///
    /// let mut tree = SearchTree::new();
    /// tree.insert_duplicate(1, ());
    /// tree.insert_duplicate(1, ());
    /// tree.insert_duplicate(2, ());
    /// tree.insert_duplicate(2, ());
    /// assert_eq!(tree.duplicate_count(), 2);
    /// assert_eq!(tree.count(&1), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn duplicate_count(&self) -> usize {
        self.duplicate_count
    }

    /// The largest number of elements a tree of this type can address.
    #[must_use]
    pub const fn max_size() -> usize {
        Arena::<Node<K, V>>::max_len()
    }

    /// Removes every element, invalidating all positions.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing search tree");
        self.arena.clear();
        self.root = None;
        self.duplicate_count = 0;
    }

    /// Swaps the contents of two trees.
    ///
    /// Positions travel with the elements they point at.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Moves the contents out, leaving an empty tree behind.
    ///
    /// Positions obtained before the call keep pointing at the same elements
    /// in the returned tree; in `self` they are stale.
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    /// Position of the smallest element, or [`Position::END`] when empty.
    #[must_use]
    pub fn first_position(&self) -> Position {
        self.position_of(self.first_index())
    }

    /// Position of the largest element, or [`Position::END`] when empty.
    #[must_use]
    pub fn last_position(&self) -> Position {
        self.position_of(self.last_index())
    }

    /// The past-the-end position.
    #[inline]
    #[must_use]
    pub const fn end_position(&self) -> Position {
        Position::END
    }

    /// Returns `true` if `position` refers to a live element of this tree.
    #[must_use]
    pub fn is_valid(&self, position: Position) -> bool {
        position
            .slot()
            .is_some_and(|slot| self.arena.resolve(slot).is_some())
    }

    /// The in-order successor of `position`.
    ///
    /// Positions form a ring: the successor of the last element is
    /// [`Position::END`] and the successor of `END` is the first element.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if `position` refers to an
    /// erased element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::{Position, SearchTree};
    ///
    /// let tree: SearchTree<i32, ()> = [(1, ()), (2, ())].into_iter().collect();
    /// let first = tree.first_position();
    /// let second = tree.next_position(first).unwrap();
    /// assert_eq!(tree.entry_at(second), Some((&2, &())));
    /// assert_eq!(tree.next_position(second), Ok(Position::END));
    /// ```
    pub fn next_position(&self, position: Position) -> ContainerResult<Position> {
        let next = match position.slot() {
            None => self.first_index(),
            Some(slot) => self.next_index(self.resolve_slot(slot)?),
        };
        Ok(self.position_of(next))
    }

    /// The in-order predecessor of `position`.
    ///
    /// The predecessor of [`Position::END`] is the largest element and the
    /// predecessor of the first element is `END`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] if `position` refers to an
    /// erased element.
    pub fn prev_position(&self, position: Position) -> ContainerResult<Position> {
        let previous = match position.slot() {
            None => self.last_index(),
            Some(slot) => self.prev_index(self.resolve_slot(slot)?),
        };
        Ok(self.position_of(previous))
    }

    /// The key/value pair at `position`, or `None` for `END` and stale positions.
    #[must_use]
    pub fn entry_at(&self, position: Position) -> Option<(&K, &V)> {
        self.live_index(position).map(|index| {
            let node = &self.arena[index];
            (&node.key, &node.value)
        })
    }

    /// Mutable access to the value at `position`.
    pub fn value_at_mut(&mut self, position: Position) -> Option<&mut V> {
        match self.live_index(position) {
            Some(index) => Some(&mut self.arena[index].value),
            None => None,
        }
    }

    /// A read-only cursor starting at `position`.
    ///
    /// A stale position yields a cursor at `END`.
    #[must_use]
    pub fn cursor(&self, position: Position) -> Cursor<'_, K, V> {
        Cursor::new(self, self.live_index(position))
    }

    /// A cursor at the smallest element.
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.first_index())
    }

    /// A cursor at the largest element.
    #[must_use]
    pub fn cursor_back(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.last_index())
    }

    // -------------------------------------------------------------------------
    // Iteration
    // -------------------------------------------------------------------------

    /// Returns an iterator over the entries in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Returns an iterator over the entries in key order with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let order = self.in_order_indices();
        IterMut::new(self.arena.values_mut(), order)
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// The smallest entry.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// The largest entry.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }

    // -------------------------------------------------------------------------
    // Structural helpers
    // -------------------------------------------------------------------------

    /// Leftmost descendant of `index`.
    pub(crate) fn min_index(&self, mut index: usize) -> usize {
        while let Some(left) = self.arena[index].left {
            index = left;
        }
        index
    }

    /// Rightmost descendant of `index`.
    pub(crate) fn max_index(&self, mut index: usize) -> usize {
        while let Some(right) = self.arena[index].right {
            index = right;
        }
        index
    }

    pub(crate) fn first_index(&self) -> Option<usize> {
        self.root.map(|root| self.min_index(root))
    }

    pub(crate) fn last_index(&self) -> Option<usize> {
        self.root.map(|root| self.max_index(root))
    }

    /// In-order successor: leftmost node of the right subtree, otherwise the
    /// first ancestor reached through a left edge.
    pub(crate) fn next_index(&self, index: usize) -> Option<usize> {
        if let Some(right) = self.arena[index].right {
            return Some(self.min_index(right));
        }
        let mut child = index;
        let mut parent = self.arena[index].parent;
        while let Some(ancestor) = parent {
            if self.arena[ancestor].left == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = self.arena[ancestor].parent;
        }
        None
    }

    /// Mirror image of [`next_index`](Self::next_index).
    pub(crate) fn prev_index(&self, index: usize) -> Option<usize> {
        if let Some(left) = self.arena[index].left {
            return Some(self.max_index(left));
        }
        let mut child = index;
        let mut parent = self.arena[index].parent;
        while let Some(ancestor) = parent {
            if self.arena[ancestor].right == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = self.arena[ancestor].parent;
        }
        None
    }

    pub(crate) fn in_order_indices(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first_index();
        while let Some(index) = current {
            order.push(index);
            current = self.next_index(index);
        }
        order
    }

    pub(crate) fn position_of(&self, index: Option<usize>) -> Position {
        index.map_or(Position::END, |index| {
            Position::from_slot(self.arena.id(index))
        })
    }

    pub(crate) fn live_index(&self, position: Position) -> Option<usize> {
        position.slot().and_then(|slot| self.arena.resolve(slot))
    }

    fn resolve_slot(&self, slot: SlotId) -> ContainerResult<usize> {
        self.arena.resolve(slot).ok_or_else(|| {
            debug!(index = slot.index, "stale search tree position");
            ContainerError::InvalidIterator
        })
    }

    /// Hangs a new leaf under `parent` (or makes it the root).
    fn attach(&mut self, parent: Option<(usize, Side)>, key: K, value: V) -> usize {
        let index = self
            .arena
            .insert(Node::leaf(key, value, parent.map(|(parent, _)| parent)));
        match parent {
            None => self.root = Some(index),
            Some((parent, Side::Left)) => self.arena[parent].left = Some(index),
            Some((parent, Side::Right)) => self.arena[parent].right = Some(index),
        }
        index
    }

    /// Replaces the subtree rooted at `replaced` with the one rooted at
    /// `replacement` in the eyes of `replaced`'s parent.
    fn transplant(&mut self, replaced: usize, replacement: Option<usize>) {
        let parent = self.arena[replaced].parent;
        match parent {
            None => self.root = replacement,
            Some(parent) if self.arena[parent].left == Some(replaced) => {
                self.arena[parent].left = replacement;
            }
            Some(parent) => self.arena[parent].right = replacement,
        }
        if let Some(replacement) = replacement {
            self.arena[replacement].parent = parent;
        }
    }

    /// Unlinks `target` and frees its slot.
    ///
    /// A node with two children is replaced by its in-order successor, which
    /// is relinked rather than copied so that positions to the successor
    /// stay valid.
    fn unlink(&mut self, target: usize) -> (K, V) {
        let left = self.arena[target].left;
        let right = self.arena[target].right;
        match (left, right) {
            (None, child) | (child, None) => self.transplant(target, child),
            (Some(left), Some(right)) => {
                let successor = self.min_index(right);
                if successor != right {
                    let successor_right = self.arena[successor].right;
                    self.transplant(successor, successor_right);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                }
                self.transplant(target, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);
            }
        }
        let node = self.arena.remove(target);
        (node.key, node.value)
    }
}

impl<K: Ord, V> SearchTree<K, V> {
    fn compare<Q>(&self, index: usize, key: &Q) -> Ordering
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let stored: &Q = self.arena[index].key.borrow();
        stored.cmp(key)
    }

    fn probe(&self, key: &K) -> Probe {
        let mut parent = None;
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.arena[index];
            match key.cmp(&node.key) {
                Ordering::Less => {
                    parent = Some((index, Side::Left));
                    current = node.left;
                }
                Ordering::Greater => {
                    parent = Some((index, Side::Right));
                    current = node.right;
                }
                Ordering::Equal => return Probe::Found(index),
            }
        }
        Probe::Vacant(parent)
    }

    pub(crate) fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(index) = current {
            match self.compare(index, key) {
                Ordering::Greater => current = self.arena[index].left,
                Ordering::Less => current = self.arena[index].right,
                Ordering::Equal => return Some(index),
            }
        }
        None
    }

    fn lower_bound_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(index) = current {
            if self.compare(index, key) == Ordering::Less {
                current = self.arena[index].right;
            } else {
                candidate = Some(index);
                current = self.arena[index].left;
            }
        }
        candidate
    }

    fn upper_bound_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(index) = current {
            if self.compare(index, key) == Ordering::Greater {
                candidate = Some(index);
                current = self.arena[index].left;
            } else {
                current = self.arena[index].right;
            }
        }
        candidate
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Finds the first element with `key`.
    ///
    /// Returns [`Position::END`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::{Position, SearchTree};
    ///
    /// let tree: SearchTree<i32, char> = [(1, 'a'), (2, 'b')].into_iter().collect();
    /// assert_eq!(tree.entry_at(tree.find(&2)), Some((&2, &'b')));
    /// assert_eq!(tree.find(&3), Position::END);
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position_of(self.find_index(key))
    }

    /// Returns a reference to the value of the first element with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).map(|index| &self.arena[index].value)
    }

    /// Returns a mutable reference to the value of the first element with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find_index(key) {
            Some(index) => Some(&mut self.arena[index].value),
            None => None,
        }
    }

    /// Checked lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if no element has `key`.
    pub fn at<Q>(&self, key: &Q) -> ContainerResult<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or_else(|| {
            debug!("search tree lookup missed");
            ContainerError::KeyNotFound
        })
    }

    /// Checked mutable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if no element has `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> ContainerResult<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find_index(key) {
            Some(index) => Ok(&mut self.arena[index].value),
            None => {
                debug!("search tree lookup missed");
                Err(ContainerError::KeyNotFound)
            }
        }
    }

    /// Returns `true` if some element has `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Position of the first element whose key is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::SearchTree;
    ///
    /// let tree: SearchTree<i32, ()> = [(10, ()), (20, ()), (30, ())].into_iter().collect();
    /// assert_eq!(tree.entry_at(tree.lower_bound(&20)), Some((&20, &())));
    /// assert_eq!(tree.entry_at(tree.lower_bound(&21)), Some((&30, &())));
    /// assert!(tree.lower_bound(&31).is_end());
    /// ```
    #[must_use]
    pub fn lower_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position_of(self.lower_bound_index(key))
    }

    /// Position of the first element whose key is greater than `key`.
    #[must_use]
    pub fn upper_bound<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position_of(self.upper_bound_index(key))
    }

    /// The half-open range of positions holding `key`: `(lower_bound, upper_bound)`.
    #[must_use]
    pub fn equal_range<Q>(&self, key: &Q) -> (Position, Position)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Number of elements whose key equals `key`.
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut count = 0;
        let mut current = self.lower_bound_index(key);
        while let Some(index) = current {
            if self.compare(index, key) != Ordering::Equal {
                break;
            }
            count += 1;
            current = self.next_index(index);
        }
        count
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Inserts `key` unless it is already present.
    ///
    /// Returns the position of the element with `key` and whether a new
    /// element was created. An existing element keeps its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::SearchTree;
    ///
    /// let mut tree = SearchTree::new();
    /// let (first, inserted) = tree.insert_unique(1, "one");
    /// assert!(inserted);
    ///
    /// let (again, inserted) = tree.insert_unique(1, "uno");
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// ```
    pub fn insert_unique(&mut self, key: K, value: V) -> (Position, bool) {
        match self.probe(&key) {
            Probe::Found(index) => (self.position_of(Some(index)), false),
            Probe::Vacant(parent) => {
                let index = self.attach(parent, key, value);
                (self.position_of(Some(index)), true)
            }
        }
    }

    /// Inserts `key`, overwriting the value in place if the key is present.
    ///
    /// The boolean is `true` when a new element was created.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
        match self.probe(&key) {
            Probe::Found(index) => {
                self.arena[index].value = value;
                (self.position_of(Some(index)), false)
            }
            Probe::Vacant(parent) => {
                let index = self.attach(parent, key, value);
                (self.position_of(Some(index)), true)
            }
        }
    }

    /// Inserts `key` even if it is already present.
    ///
    /// The new element lands after every element with an equal key, so equal
    /// keys iterate in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::SearchTree;
    ///
    /// let mut tree = SearchTree::new();
    /// tree.insert_duplicate(5, 'a');
    /// tree.insert_duplicate(7, 'x');
    /// tree.insert_duplicate(5, 'b');
    ///
    /// let values: Vec<char> = tree.values().copied().collect();
    /// assert_eq!(values, vec!['a', 'b', 'x']);
    /// ```
    pub fn insert_duplicate(&mut self, key: K, value: V) -> Position {
        let mut parent = None;
        let mut current = self.root;
        let mut duplicate = false;
        while let Some(index) = current {
            let node = &self.arena[index];
            match key.cmp(&node.key) {
                Ordering::Less => {
                    parent = Some((index, Side::Left));
                    current = node.left;
                }
                ordering => {
                    duplicate |= ordering == Ordering::Equal;
                    parent = Some((index, Side::Right));
                    current = node.right;
                }
            }
        }
        if duplicate {
            self.duplicate_count += 1;
        }
        let index = self.attach(parent, key, value);
        self.position_of(Some(index))
    }

    /// Returns the value for `key`, inserting `V::default()` first if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::SearchTree;
    ///
    /// let mut tree: SearchTree<&str, u32> = SearchTree::new();
    /// *tree.get_or_insert_default("hits") += 1;
    /// *tree.get_or_insert_default("hits") += 1;
    /// assert_eq!(tree.get("hits"), Some(&2));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = match self.probe(&key) {
            Probe::Found(index) => index,
            Probe::Vacant(parent) => self.attach(parent, key, V::default()),
        };
        &mut self.arena[index].value
    }

    // -------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------

    /// Removes the element at `position` and returns it.
    ///
    /// Only positions to the erased element become stale. A position taken
    /// from an unrelated tree is not detected: if its slot is live here, the
    /// element occupying that slot is erased.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidIterator`] for [`Position::END`] or a
    /// stale position; the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::error::ContainerError;
    /// use strata::tree::SearchTree;
    ///
    /// let mut tree: SearchTree<i32, ()> = [(1, ()), (2, ()), (3, ())].into_iter().collect();
    /// let position = tree.find(&2);
    /// assert_eq!(tree.erase(position), Ok((2, ())));
    /// assert_eq!(tree.erase(position), Err(ContainerError::InvalidIterator));
    /// assert_eq!(tree.erase(tree.end_position()), Err(ContainerError::InvalidIterator));
    /// ```
    pub fn erase(&mut self, position: Position) -> ContainerResult<(K, V)> {
        let Some(slot) = position.slot() else {
            debug!("attempted to erase the end position of a search tree");
            return Err(ContainerError::InvalidIterator);
        };
        let index = self.resolve_slot(slot)?;
        Ok(self.erase_index(index))
    }

    /// Removes the first element with `key`. A missing key is a no-op.
    pub fn erase_key<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).map(|index| self.erase_index(index))
    }

    /// Removes the first element (in key order) whose value equals `value`.
    ///
    /// Values are not ordered, so this scans the tree. A missing value is a
    /// no-op.
    pub fn erase_by_value(&mut self, value: &V) -> Option<(K, V)>
    where
        V: PartialEq,
    {
        let mut current = self.first_index();
        while let Some(index) = current {
            if self.arena[index].value == *value {
                return Some(self.erase_index(index));
            }
            current = self.next_index(index);
        }
        None
    }

    fn erase_index(&mut self, index: usize) -> (K, V) {
        let key = &self.arena[index].key;
        let shares_key = self
            .prev_index(index)
            .is_some_and(|previous| self.arena[previous].key == *key)
            || self
                .next_index(index)
                .is_some_and(|next| self.arena[next].key == *key);
        if shares_key {
            self.duplicate_count = self.duplicate_count.saturating_sub(1);
        }
        trace!(index, len = self.len(), "erasing search tree node");
        self.unlink(index)
    }

    // -------------------------------------------------------------------------
    // Merge
    // -------------------------------------------------------------------------

    /// Moves every element of `other` into `self` in ascending order, keeping
    /// only keys that `self` does not hold yet.
    ///
    /// `other` is always left empty; elements whose key was already present
    /// are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::tree::SearchTree;
    ///
    /// let mut left: SearchTree<i32, ()> = [1, 2, 3].map(|key| (key, ())).into_iter().collect();
    /// let mut right: SearchTree<i32, ()> = [3, 4, 5].map(|key| (key, ())).into_iter().collect();
    /// left.merge_unique(&mut right);
    ///
    /// assert_eq!(left.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// assert!(right.is_empty());
    /// ```
    pub fn merge_unique(&mut self, other: &mut Self) {
        let incoming = other.take();
        let incoming_len = incoming.len();
        let before = self.len();
        for (key, value) in incoming {
            self.insert_unique(key, value);
        }
        trace!(
            incoming = incoming_len,
            inserted = self.len() - before,
            "merged search tree (unique keys)"
        );
    }

    /// Moves every element of `other` into `self` in ascending order, keeping
    /// repeated keys. Elements of `other` land after equal keys of `self`.
    pub fn merge_duplicate(&mut self, other: &mut Self) {
        let incoming = other.take();
        let incoming_len = incoming.len();
        for (key, value) in incoming {
            self.insert_duplicate(key, value);
        }
        trace!(incoming = incoming_len, "merged search tree (duplicate keys)");
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    /// Verifies ordering, parent links and the element count.
    ///
    /// Intended for tests; runs in O(N · depth).
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    #[doc(hidden)]
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        let Some(root) = self.root else {
            return if self.arena.len() == 0 {
                Ok(())
            } else {
                Err("tree without root still owns nodes")
            };
        };
        if self.arena[root].parent.is_some() {
            return Err("root has a parent link");
        }

        let mut reachable = 0_usize;
        let mut pending: SmallVec<[usize; 32]> = SmallVec::new();
        pending.push(root);
        while let Some(index) = pending.pop() {
            reachable += 1;
            if reachable > self.arena.len() {
                return Err("child links form a cycle");
            }
            let node = &self.arena[index];
            for child in [node.left, node.right].into_iter().flatten() {
                if self.arena[child].parent != Some(index) {
                    return Err("child does not link back to its parent");
                }
                pending.push(child);
            }
            if let Some(left) = node.left {
                if self.arena[self.max_index(left)].key >= node.key {
                    return Err("left subtree holds a key that is not smaller");
                }
            }
            if let Some(right) = node.right {
                if self.arena[self.min_index(right)].key < node.key {
                    return Err("right subtree holds a smaller key");
                }
            }
        }
        if reachable == self.arena.len() {
            Ok(())
        } else {
            Err("length does not match the number of reachable nodes")
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for SearchTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SearchTree<K, V> {
    /// Builds a tree with unique keys; later pairs with a present key are ignored.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for SearchTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_unique(key, value);
        }
    }
}

impl<K, V> IntoIterator for SearchTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.in_order_indices();
        IntoIter::new(self.arena.into_values(), order)
    }
}

impl<'a, K, V> IntoIterator for &'a SearchTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut SearchTree<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for SearchTree<K, V> {
    /// Two trees are equal when they yield the same entries in order,
    /// regardless of their shape.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for SearchTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SearchTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// The five-node tree `10, 5, 15, 3, 7` with value = key.
    #[fixture]
    fn five_nodes() -> SearchTree<i32, i32> {
        let mut tree = SearchTree::new();
        for key in [10, 5, 15, 3, 7] {
            tree.insert_unique(key, key);
        }
        tree
    }

    fn keys_of<V>(tree: &SearchTree<i32, V>) -> Vec<i32> {
        tree.keys().copied().collect()
    }

    #[rstest]
    fn test_new_is_empty() {
        let tree: SearchTree<i32, i32> = SearchTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.first_position().is_end());
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_in_order_traversal(five_nodes: SearchTree<i32, i32>) {
        assert_eq!(keys_of(&five_nodes), vec![3, 5, 7, 10, 15]);
        assert_eq!(five_nodes.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_shape_follows_plain_descent(five_nodes: SearchTree<i32, i32>) {
        let root = five_nodes.root.unwrap();
        assert_eq!(five_nodes.arena[root].key, 10);
        let left = five_nodes.arena[root].left.unwrap();
        assert_eq!(five_nodes.arena[left].key, 5);
        let left_right = five_nodes.arena[left].right.unwrap();
        assert_eq!(five_nodes.arena[left_right].key, 7);
    }

    #[rstest]
    fn test_erase_root_with_two_children(mut five_nodes: SearchTree<i32, i32>) {
        let root = five_nodes.find(&10);
        assert_eq!(five_nodes.erase(root), Ok((10, 10)));
        assert_eq!(keys_of(&five_nodes), vec![3, 5, 7, 15]);
        assert_eq!(five_nodes.len(), 4);
        assert_eq!(five_nodes.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_erase_with_distant_successor_keeps_successor_position() {
        let mut tree = SearchTree::new();
        for key in [50, 30, 80, 70, 90, 60, 65] {
            tree.insert_unique(key, key);
        }
        let successor = tree.find(&60);
        tree.erase(tree.find(&50)).unwrap();

        assert_eq!(tree.entry_at(successor), Some((&60, &60)));
        assert_eq!(keys_of(&tree), vec![30, 60, 65, 70, 80, 90]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    #[case(3)]
    #[case(5)]
    #[case(7)]
    #[case(15)]
    fn test_erase_leaves_other_positions_valid(
        mut five_nodes: SearchTree<i32, i32>,
        #[case] erased: i32,
    ) {
        let positions: Vec<(i32, Position)> = [3, 5, 7, 10, 15]
            .into_iter()
            .map(|key| (key, five_nodes.find(&key)))
            .collect();
        five_nodes.erase(five_nodes.find(&erased)).unwrap();
        for (key, position) in positions {
            if key == erased {
                assert!(!five_nodes.is_valid(position));
            } else {
                assert_eq!(five_nodes.entry_at(position), Some((&key, &key)));
            }
        }
    }

    #[rstest]
    fn test_erase_end_is_invalid_iterator(mut five_nodes: SearchTree<i32, i32>) {
        assert_eq!(
            five_nodes.erase(Position::END),
            Err(ContainerError::InvalidIterator)
        );
        assert_eq!(five_nodes.len(), 5);
    }

    #[rstest]
    fn test_erase_missing_key_is_noop(mut five_nodes: SearchTree<i32, i32>) {
        assert_eq!(five_nodes.erase_key(&42), None);
        assert_eq!(five_nodes.len(), 5);
    }

    #[rstest]
    fn test_erase_by_value() {
        let mut tree: SearchTree<i32, &str> =
            [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
        assert_eq!(tree.erase_by_value(&"b"), Some((2, "b")));
        assert_eq!(tree.erase_by_value(&"z"), None);
        assert_eq!(keys_of(&tree), vec![1, 3]);
    }

    #[rstest]
    fn test_insert_unique_keeps_existing_value() {
        let mut tree = SearchTree::new();
        tree.insert_unique(1, "one");
        let (_, inserted) = tree.insert_unique(1, "uno");
        assert!(!inserted);
        assert_eq!(tree.get(&1), Some(&"one"));
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    fn test_insert_or_assign_overwrites_in_place() {
        let mut tree = SearchTree::new();
        let (position, _) = tree.insert_or_assign(1, "one");
        let (again, inserted) = tree.insert_or_assign(1, "uno");
        assert!(!inserted);
        assert_eq!(position, again);
        assert_eq!(tree.get(&1), Some(&"uno"));
    }

    #[rstest]
    fn test_duplicates_follow_insertion_order() {
        let mut tree = SearchTree::new();
        for (key, value) in [(5, 'a'), (7, 'x'), (5, 'b'), (3, 'y'), (5, 'c')] {
            tree.insert_duplicate(key, value);
        }
        let entries: Vec<(i32, char)> = tree.iter().map(|(key, value)| (*key, *value)).collect();
        assert_eq!(
            entries,
            vec![(3, 'y'), (5, 'a'), (5, 'b'), (5, 'c'), (7, 'x')]
        );
        assert_eq!(tree.count(&5), 3);
        assert_eq!(tree.duplicate_count(), 2);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_equal_range_spans_duplicates() {
        let mut tree = SearchTree::new();
        for _ in 0..3 {
            tree.insert_duplicate(10, ());
        }
        let (lower, upper) = tree.equal_range(&10);
        let mut steps = 0;
        let mut position = lower;
        while position != upper {
            steps += 1;
            position = tree.next_position(position).unwrap();
        }
        assert_eq!(steps, 3);
        assert_eq!(tree.count(&10), 3);
    }

    #[rstest]
    fn test_erasing_duplicate_decrements_duplicate_count() {
        let mut tree = SearchTree::new();
        tree.insert_duplicate(1, ());
        let second = tree.insert_duplicate(1, ());
        tree.insert_duplicate(2, ());
        assert_eq!(tree.duplicate_count(), 1);
        tree.erase(second).unwrap();
        assert_eq!(tree.duplicate_count(), 0);
        tree.erase_key(&2);
        assert_eq!(tree.duplicate_count(), 0);
    }

    #[rstest]
    fn test_bounds(five_nodes: SearchTree<i32, i32>) {
        assert_eq!(five_nodes.entry_at(five_nodes.lower_bound(&6)), Some((&7, &7)));
        assert_eq!(five_nodes.entry_at(five_nodes.lower_bound(&7)), Some((&7, &7)));
        assert_eq!(five_nodes.entry_at(five_nodes.upper_bound(&7)), Some((&10, &10)));
        assert!(five_nodes.upper_bound(&15).is_end());
        assert_eq!(five_nodes.entry_at(five_nodes.lower_bound(&0)), Some((&3, &3)));
    }

    #[rstest]
    fn test_navigation_is_a_ring(five_nodes: SearchTree<i32, i32>) {
        let last = five_nodes.prev_position(Position::END).unwrap();
        assert_eq!(five_nodes.entry_at(last), Some((&15, &15)));
        assert_eq!(five_nodes.next_position(last), Ok(Position::END));
        let first = five_nodes.next_position(Position::END).unwrap();
        assert_eq!(first, five_nodes.first_position());
        assert_eq!(five_nodes.prev_position(first), Ok(Position::END));
    }

    #[rstest]
    fn test_navigation_from_stale_position_fails(mut five_nodes: SearchTree<i32, i32>) {
        let position = five_nodes.find(&5);
        five_nodes.erase(position).unwrap();
        assert_eq!(
            five_nodes.next_position(position),
            Err(ContainerError::InvalidIterator)
        );
    }

    #[rstest]
    fn test_at_and_default_insert() {
        let mut tree: SearchTree<i32, String> = SearchTree::new();
        assert_eq!(tree.at(&1), Err(ContainerError::KeyNotFound));
        assert_eq!(tree.get_or_insert_default(1).as_str(), "");
        assert_eq!(tree.len(), 1);
        tree.at_mut(&1).unwrap().push('x');
        assert_eq!(tree.at(&1).map(String::as_str), Ok("x"));
    }

    #[rstest]
    fn test_merge_unique_drops_present_keys() {
        let mut left: SearchTree<i32, char> = [(1, 'a'), (2, 'a'), (3, 'a')].into_iter().collect();
        let mut right: SearchTree<i32, char> = [(3, 'b'), (4, 'b'), (5, 'b')].into_iter().collect();
        left.merge_unique(&mut right);
        assert_eq!(keys_of(&left), vec![1, 2, 3, 4, 5]);
        assert_eq!(left.get(&3), Some(&'a'));
        assert!(right.is_empty());
        assert_eq!(left.check_invariants(), Ok(()));
    }

    #[rstest]
    fn test_merge_duplicate_keeps_everything() {
        let mut left = SearchTree::new();
        left.insert_duplicate(1, 'a');
        left.insert_duplicate(2, 'a');
        let mut right = SearchTree::new();
        right.insert_duplicate(2, 'b');
        right.insert_duplicate(3, 'b');
        left.merge_duplicate(&mut right);
        let entries: Vec<(i32, char)> = left.iter().map(|(key, value)| (*key, *value)).collect();
        assert_eq!(entries, vec![(1, 'a'), (2, 'a'), (2, 'b'), (3, 'b')]);
        assert!(right.is_empty());
    }

    #[rstest]
    fn test_clone_is_deep_and_preserves_positions(five_nodes: SearchTree<i32, i32>) {
        let position = five_nodes.find(&7);
        let mut copy = five_nodes.clone();
        *copy.value_at_mut(position).unwrap() = 700;
        assert_eq!(five_nodes.get(&7), Some(&7));
        assert_eq!(copy.get(&7), Some(&700));
    }

    #[rstest]
    fn test_take_moves_positions_with_the_elements(mut five_nodes: SearchTree<i32, i32>) {
        let position = five_nodes.find(&15);
        let moved = five_nodes.take();
        assert!(five_nodes.is_empty());
        assert!(!five_nodes.is_valid(position));
        assert_eq!(moved.entry_at(position), Some((&15, &15)));
    }

    #[rstest]
    fn test_clear_invalidates_positions(mut five_nodes: SearchTree<i32, i32>) {
        let position = five_nodes.find(&3);
        five_nodes.clear();
        five_nodes.insert_unique(3, 3);
        assert!(!five_nodes.is_valid(position));
        assert_eq!(five_nodes.len(), 1);
    }

    #[rstest]
    fn test_sorted_insertion_does_not_overflow_the_stack() {
        let mut tree = SearchTree::new();
        for key in 0..5_000 {
            tree.insert_unique(key, ());
        }
        assert_eq!(tree.len(), 5_000);
        assert_eq!(tree.first(), Some((&0, &())));
        assert_eq!(tree.last(), Some((&4_999, &())));
        tree.erase_key(&0);
        assert_eq!(tree.iter().count(), 4_999);
    }

    #[rstest]
    fn test_iter_mut_updates_in_order(mut five_nodes: SearchTree<i32, i32>) {
        for (index, (_, value)) in five_nodes.iter_mut().enumerate() {
            *value = i32::try_from(index).unwrap();
        }
        let values: Vec<i32> = five_nodes.values().copied().collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[rstest]
    fn test_equality_ignores_shape() {
        let ascending: SearchTree<i32, ()> = (0..5).map(|key| (key, ())).collect();
        let shuffled: SearchTree<i32, ()> = [3, 1, 4, 0, 2].map(|key| (key, ())).into_iter().collect();
        assert_eq!(ascending, shuffled);
    }

    #[rstest]
    fn test_debug_format(five_nodes: SearchTree<i32, i32>) {
        assert_eq!(
            format!("{five_nodes:?}"),
            "{3: 3, 5: 5, 7: 7, 10: 10, 15: 15}"
        );
    }
}
