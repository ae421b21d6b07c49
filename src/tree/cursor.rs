//! Positions, cursors and iterators over a [`SearchTree`].
//!
//! A [`Position`] is a detached, `Copy` handle to one element (or to the
//! past-the-end slot). It does not borrow the tree, so it can be held across
//! insertions and erasures of *other* elements and resolved later through
//! the tree's methods. A [`Cursor`] is the borrowed counterpart: it pairs a
//! position with a shared reference to the tree and walks it in either
//! direction.

use std::fmt;
use std::iter::FusedIterator;

use super::node::Node;
use super::search::SearchTree;
use crate::arena::SlotId;

// =============================================================================
// Position
// =============================================================================

/// A handle to an element of a [`SearchTree`] or to its end.
///
/// Equality is element identity. A position stays valid until the element
/// it refers to is erased; insertions never invalidate it. Positions are only
/// meaningful for the tree that produced them (or a clone of it, or the tree
/// its contents were moved into).
///
/// # Examples
///
/// ```rust
/// use strata::tree::{Position, SearchTree};
///
/// let mut tree = SearchTree::new();
/// let (two, _) = tree.insert_unique(2, "two");
/// tree.insert_unique(1, "one");
/// tree.insert_unique(3, "three");
///
/// assert_eq!(tree.entry_at(two), Some((&2, &"two")));
/// assert!(!two.is_end());
/// assert!(Position::END.is_end());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Position {
    slot: Option<SlotId>,
}

impl Position {
    /// The past-the-end position shared by every tree.
    pub const END: Self = Self { slot: None };

    /// Returns `true` for the past-the-end position.
    #[inline]
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.slot.is_none()
    }

    pub(crate) const fn from_slot(slot: SlotId) -> Self {
        Self { slot: Some(slot) }
    }

    pub(crate) const fn slot(self) -> Option<SlotId> {
        self.slot
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A bidirectional cursor bound to a tree.
///
/// The cursor sits on an element or on the "end" slot between the last and
/// the first element. Moving forward from the last element reaches end, and
/// moving forward from end wraps to the first element; moving backward is the
/// mirror image.
///
/// # Examples
///
/// ```rust
/// use strata::tree::SearchTree;
///
/// let tree: SearchTree<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
/// let mut cursor = tree.cursor(tree.end_position());
///
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&3));
/// cursor.move_prev();
/// assert_eq!(cursor.value(), Some(&'b'));
/// cursor.move_next();
/// cursor.move_next();
/// assert!(cursor.is_end());
/// ```
pub struct Cursor<'a, K, V> {
    tree: &'a SearchTree<K, V>,
    current: Option<usize>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn new(tree: &'a SearchTree<K, V>, current: Option<usize>) -> Self {
        Self { tree, current }
    }

    /// The detached position of the current element.
    #[must_use]
    pub fn position(&self) -> Position {
        self.tree.position_of(self.current)
    }

    /// Returns `true` if the cursor is at the end slot.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The current key, or `None` at end.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(|(key, _)| key)
    }

    /// The current value, or `None` at end.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(|(_, value)| value)
    }

    /// The current key/value pair, or `None` at end.
    #[must_use]
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.current.map(|index| {
            let node = &tree.arena[index];
            (&node.key, &node.value)
        })
    }

    /// Steps to the in-order successor.
    pub fn move_next(&mut self) {
        self.current = match self.current {
            None => self.tree.first_index(),
            Some(index) => self.tree.next_index(index),
        };
    }

    /// Steps to the in-order predecessor.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            None => self.tree.last_index(),
            Some(index) => self.tree.prev_index(index),
        };
    }

    /// The entry `move_next` would land on.
    #[must_use]
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let mut next = self.clone();
        next.move_next();
        next.entry()
    }

    /// The entry `move_prev` would land on.
    #[must_use]
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let mut previous = self.clone();
        previous.move_prev();
        previous.entry()
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            current: self.current,
        }
    }
}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    /// Cursors are equal when they belong to the same tree and sit on the same element.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Cursor")
            .field(&self.entry())
            .finish()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An in-order iterator over the entries of a [`SearchTree`].
pub struct Iter<'a, K, V> {
    tree: &'a SearchTree<K, V>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a SearchTree<K, V>) -> Self {
        Self {
            tree,
            front: tree.first_index(),
            back: tree.last_index(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let index = self.front?;
        self.front = tree.next_index(index);
        self.remaining -= 1;
        let node = &tree.arena[index];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let index = self.back?;
        self.back = tree.prev_index(index);
        self.remaining -= 1;
        let node = &tree.arena[index];
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// An in-order iterator with mutable access to the values.
pub struct IterMut<'a, K, V> {
    nodes: Vec<Option<&'a mut Node<K, V>>>,
    order: std::vec::IntoIter<usize>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(nodes: Vec<Option<&'a mut Node<K, V>>>, order: Vec<usize>) -> Self {
        Self {
            nodes,
            order: order.into_iter(),
        }
    }

    fn entry(&mut self, index: usize) -> Option<(&'a K, &'a mut V)> {
        let node = self.nodes[index].take()?;
        let key: &'a K = &node.key;
        Some((key, &mut node.value))
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.order.next()?;
        self.entry(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.order.next_back()?;
        self.entry(index)
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning in-order iterator over the entries of a [`SearchTree`].
pub struct IntoIter<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    order: std::vec::IntoIter<usize>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(nodes: Vec<Option<Node<K, V>>>, order: Vec<usize>) -> Self {
        Self {
            nodes,
            order: order.into_iter(),
        }
    }

    fn entry(&mut self, index: usize) -> Option<(K, V)> {
        self.nodes[index]
            .take()
            .map(|node| (node.key, node.value))
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.order.next()?;
        self.entry(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.order.next_back()?;
        self.entry(index)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> SearchTree<i32, i32> {
        [10, 5, 15, 3, 7].map(|key| (key, key)).into_iter().collect()
    }

    #[rstest]
    fn test_iter_is_double_ended() {
        let tree = sample();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some((&3, &3)));
        assert_eq!(iter.next_back(), Some((&15, &15)));
        assert_eq!(iter.next(), Some((&5, &5)));
        assert_eq!(iter.next_back(), Some((&10, &10)));
        assert_eq!(iter.next(), Some((&7, &7)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    fn test_reverse_iteration() {
        let tree = sample();
        let keys: Vec<i32> = tree.keys().rev().copied().collect();
        assert_eq!(keys, vec![15, 10, 7, 5, 3]);
    }

    #[rstest]
    fn test_cursor_walks_the_ring() {
        let tree = sample();
        let mut cursor = tree.cursor_front();
        let mut visited = Vec::new();
        while let Some(key) = cursor.key() {
            visited.push(*key);
            cursor.move_next();
        }
        assert_eq!(visited, vec![3, 5, 7, 10, 15]);
        assert!(cursor.is_end());
        cursor.move_next();
        assert_eq!(cursor.key(), Some(&3));
    }

    #[rstest]
    fn test_cursor_from_end_steps_back_to_maximum() {
        let tree = sample();
        let mut cursor = tree.cursor(Position::END);
        assert_eq!(cursor.peek_prev(), Some((&15, &15)));
        cursor.move_prev();
        assert_eq!(cursor.position(), tree.last_position());
    }

    #[rstest]
    fn test_cursor_symmetry() {
        let tree = sample();
        let mut cursor = tree.cursor_front();
        cursor.move_next();
        let anchor = cursor.clone();
        cursor.move_prev();
        cursor.move_next();
        assert_eq!(cursor, anchor);
        cursor.move_next();
        cursor.move_prev();
        assert_eq!(cursor, anchor);
    }

    #[rstest]
    fn test_into_iter_drains_in_order() {
        let tree = sample();
        let entries: Vec<(i32, i32)> = tree.into_iter().rev().collect();
        assert_eq!(entries, vec![(15, 15), (10, 10), (7, 7), (5, 5), (3, 3)]);
    }

    #[rstest]
    fn test_empty_tree_iterators() {
        let tree: SearchTree<i32, i32> = SearchTree::new();
        assert_eq!(tree.iter().next(), None);
        assert!(tree.cursor_front().is_end());
        assert_eq!(tree.cursor_back().peek_next(), None);
    }

    #[rstest]
    fn test_position_default_is_end() {
        assert_eq!(Position::default(), Position::END);
    }
}
