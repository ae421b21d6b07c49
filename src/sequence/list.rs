//! Doubly linked list with stable positions.
//!
//! Nodes live in the crate's generational arena, the same storage that backs
//! the search tree, so a [`ListPosition`] behaves like a tree
//! [`Position`](crate::tree::Position): it survives every operation except
//! erasing its own element, and a stale one is detected rather than aliased.
//!
//! ```rust
//! use strata::sequence::List;
//!
//! let mut list: List<i32> = [1, 3].into_iter().collect();
//! let three = list.next_position(list.first_position()).unwrap();
//! list.insert(three, 2).unwrap();
//! list.push_front(0);
//!
//! assert_eq!(list.get(three), Some(&3));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::empty_access;
use crate::arena::{Arena, SlotId};
use crate::error::{ContainerError, ContainerResult};

// =============================================================================
// Links and positions
// =============================================================================

#[derive(Clone, Debug)]
struct Link<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A handle to an element of a [`List`] or to its end.
///
/// Inserting before [`ListPosition::END`] appends.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ListPosition {
    slot: Option<SlotId>,
}

impl ListPosition {
    /// The past-the-end position.
    pub const END: Self = Self { slot: None };

    /// Returns `true` for the past-the-end position.
    #[inline]
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.slot.is_none()
    }
}

// =============================================================================
// List Definition
// =============================================================================

/// A doubly linked list.
///
/// | Operation                       | Complexity     |
/// |---------------------------------|----------------|
/// | `push_*` / `pop_*` / `insert`   | O(1)           |
/// | `erase` (by position)           | O(1)           |
/// | `merge` / `splice` / `unique`   | O(N + M)       |
/// | `sort`                          | O(N log N)     |
///
/// `sort`, `reverse`, `unique` and `merge` relink nodes rather than moving
/// values, so positions into `self` stay valid across them (except positions
/// to elements that `unique` removes).
#[derive(Clone)]
pub struct List<T> {
    arena: Arena<Link<T>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> List<T> {
    /// Creates an empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
            tail: None,
        }
    }

    /// The number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// The largest number of elements a list of this type can hold.
    #[must_use]
    pub const fn max_size() -> usize {
        Arena::<Link<T>>::max_len()
    }

    /// Removes every element and invalidates all positions.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing list");
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Exchanges the contents (and positions) of two lists.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    // -------------------------------------------------------------------------
    // Ends
    // -------------------------------------------------------------------------

    /// The first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty list.
    pub fn front(&self) -> ContainerResult<&T> {
        match self.head {
            Some(index) => Ok(&self.arena[index].value),
            None => Err(empty_access("List", "front")),
        }
    }

    /// The last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty list.
    pub fn back(&self) -> ContainerResult<&T> {
        match self.tail {
            Some(index) => Ok(&self.arena[index].value),
            None => Err(empty_access("List", "back")),
        }
    }

    /// The first element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty list.
    pub fn front_mut(&mut self) -> ContainerResult<&mut T> {
        match self.head {
            Some(index) => Ok(&mut self.arena[index].value),
            None => Err(empty_access("List", "front")),
        }
    }

    /// The last element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty list.
    pub fn back_mut(&mut self) -> ContainerResult<&mut T> {
        match self.tail {
            Some(index) => Ok(&mut self.arena[index].value),
            None => Err(empty_access("List", "back")),
        }
    }

    /// Prepends `value` and returns its position.
    pub fn push_front(&mut self, value: T) -> ListPosition {
        let index = self.link_before(self.head, value);
        self.position_of(Some(index))
    }

    /// Appends `value` and returns its position.
    pub fn push_back(&mut self, value: T) -> ListPosition {
        let index = self.link_before(None, value);
        self.position_of(Some(index))
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty list.
    pub fn pop_front(&mut self) -> ContainerResult<T> {
        match self.head {
            Some(index) => Ok(self.unlink(index)),
            None => Err(empty_access("List", "pop_front")),
        }
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty list.
    pub fn pop_back(&mut self) -> ContainerResult<T> {
        match self.tail {
            Some(index) => Ok(self.unlink(index)),
            None => Err(empty_access("List", "pop_back")),
        }
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    /// Position of the first element, or `END` for an empty list.
    #[must_use]
    pub fn first_position(&self) -> ListPosition {
        self.position_of(self.head)
    }

    /// Position of the last element, or `END` for an empty list.
    #[must_use]
    pub fn last_position(&self) -> ListPosition {
        self.position_of(self.tail)
    }

    /// The past-the-end position.
    #[must_use]
    pub const fn end_position(&self) -> ListPosition {
        ListPosition::END
    }

    /// Returns `true` if `position` refers to a live element of this list.
    #[must_use]
    pub fn is_valid(&self, position: ListPosition) -> bool {
        self.live_index(position).is_some()
    }

    /// The position after `position`; the positions form a ring through `END`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for a stale position.
    pub fn next_position(&self, position: ListPosition) -> ContainerResult<ListPosition> {
        let next = match self.target(position)? {
            None => self.head,
            Some(index) => self.arena[index].next,
        };
        Ok(self.position_of(next))
    }

    /// The position before `position`; the positions form a ring through `END`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for a stale position.
    pub fn prev_position(&self, position: ListPosition) -> ContainerResult<ListPosition> {
        let previous = match self.target(position)? {
            None => self.tail,
            Some(index) => self.arena[index].prev,
        };
        Ok(self.position_of(previous))
    }

    /// The element at `position`.
    #[must_use]
    pub fn get(&self, position: ListPosition) -> Option<&T> {
        self.live_index(position)
            .map(|index| &self.arena[index].value)
    }

    /// The element at `position`, mutably.
    pub fn get_mut(&mut self, position: ListPosition) -> Option<&mut T> {
        match self.live_index(position) {
            Some(index) => Some(&mut self.arena[index].value),
            None => None,
        }
    }

    // -------------------------------------------------------------------------
    // Positional insertion and removal
    // -------------------------------------------------------------------------

    /// Inserts `value` before `position` and returns the new element's position.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for a stale position.
    pub fn insert(&mut self, position: ListPosition, value: T) -> ContainerResult<ListPosition> {
        let next = self.target(position)?;
        let index = self.link_before(next, value);
        Ok(self.position_of(Some(index)))
    }

    /// Removes the element at `position`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for `END` or a stale position; the list is
    /// left unchanged.
    pub fn erase(&mut self, position: ListPosition) -> ContainerResult<T> {
        match self.target(position)? {
            Some(index) => Ok(self.unlink(index)),
            None => {
                debug!("erase of the list end position");
                Err(ContainerError::InvalidIterator)
            }
        }
    }

    /// Inserts all `values` before `position`, in order.
    ///
    /// Returns the position of the first inserted element, or `position`
    /// itself when `values` is empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for a stale position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::sequence::List;
    ///
    /// let mut list: List<i32> = [1, 5].into_iter().collect();
    /// let five = list.last_position();
    /// let two = list.insert_many(five, [2, 3, 4]).unwrap();
    /// assert_eq!(list.get(two), Some(&2));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_many<I>(
        &mut self,
        position: ListPosition,
        values: I,
    ) -> ContainerResult<ListPosition>
    where
        I: IntoIterator<Item = T>,
    {
        let next = self.target(position)?;
        let mut first = None;
        for value in values {
            let index = self.link_before(next, value);
            first.get_or_insert(index);
        }
        Ok(first.map_or(position, |index| self.position_of(Some(index))))
    }

    /// Appends all `values` in order.
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.link_before(None, value);
        }
    }

    /// Prepends all `values`, keeping their order.
    pub fn insert_many_front<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let next = self.head;
        for value in values {
            self.link_before(next, value);
        }
    }

    /// Moves every element of `other` before `position`, leaving `other`
    /// empty.
    ///
    /// Positions into `other` become stale.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterator` for a stale position; neither list changes.
    pub fn splice(&mut self, position: ListPosition, other: &mut Self) -> ContainerResult<()> {
        let next = self.target(position)?;
        let incoming = std::mem::take(other);
        trace!(incoming = incoming.len(), "splicing list");
        for value in incoming {
            self.link_before(next, value);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Whole-list operations
    // -------------------------------------------------------------------------

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        let mut current = self.head;
        while let Some(index) = current {
            let link = &mut self.arena[index];
            std::mem::swap(&mut link.prev, &mut link.next);
            current = link.prev;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Removes consecutive duplicates, keeping the first of each run.
    ///
    /// Returns the number of removed elements.
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        let mut removed = 0;
        let mut current = self.head;
        while let Some(index) = current {
            let following = self.arena[index].next;
            match following {
                Some(next) if self.arena[next].value == self.arena[index].value => {
                    self.unlink(next);
                    removed += 1;
                }
                next => current = next,
            }
        }
        removed
    }

    /// Stable sort by relinking nodes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::sequence::List;
    ///
    /// let mut list: List<i32> = [3, 1, 2].into_iter().collect();
    /// let three = list.first_position();
    /// list.sort();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(list.last_position(), three);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        let mut order = self.indices();
        order.sort_by(|&left, &right| self.arena[left].value.cmp(&self.arena[right].value));
        self.relink(&order);
    }

    /// Merges a sorted `other` into sorted `self`, leaving `other` empty.
    ///
    /// Equal elements keep `self`'s copies first. Positions into `self` stay
    /// valid; positions into `other` become stale.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::sequence::List;
    ///
    /// let mut left: List<i32> = [1, 3, 5].into_iter().collect();
    /// let mut right: List<i32> = [2, 3, 6].into_iter().collect();
    /// left.merge(&mut right);
    /// assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 3, 5, 6]);
    /// assert!(right.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        let incoming = std::mem::take(other);
        trace!(incoming = incoming.len(), "merging sorted list");
        let mut cursor = self.head;
        for value in incoming {
            while let Some(index) = cursor {
                if self.arena[index].value > value {
                    break;
                }
                cursor = self.arena[index].next;
            }
            self.link_before(cursor, value);
        }
    }

    /// Returns `true` if some element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == value)
    }

    // -------------------------------------------------------------------------
    // Iteration
    // -------------------------------------------------------------------------

    /// Iterates front to back.
    #[must_use]
    pub fn iter(&self) -> ListIter<'_, T> {
        ListIter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Iterates front to back with mutable access.
    pub fn iter_mut(&mut self) -> ListIterMut<'_, T> {
        let order = self.indices();
        ListIterMut {
            links: self.arena.values_mut(),
            order: order.into_iter(),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn position_of(&self, index: Option<usize>) -> ListPosition {
        ListPosition {
            slot: index.map(|index| self.arena.id(index)),
        }
    }

    fn live_index(&self, position: ListPosition) -> Option<usize> {
        position.slot.and_then(|slot| self.arena.resolve(slot))
    }

    /// Resolves `position` to a slot, `None` standing for `END`.
    fn target(&self, position: ListPosition) -> ContainerResult<Option<usize>> {
        match position.slot {
            None => Ok(None),
            Some(slot) => self.arena.resolve(slot).map(Some).ok_or_else(|| {
                debug!(index = slot.index, "stale list position");
                ContainerError::InvalidIterator
            }),
        }
    }

    fn indices(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.head;
        while let Some(index) = current {
            order.push(index);
            current = self.arena[index].next;
        }
        order
    }

    /// Links a new node in front of `next` (`None` meaning the end).
    fn link_before(&mut self, next: Option<usize>, value: T) -> usize {
        let prev = match next {
            Some(next) => self.arena[next].prev,
            None => self.tail,
        };
        let index = self.arena.insert(Link { value, prev, next });
        match prev {
            Some(prev) => self.arena[prev].next = Some(index),
            None => self.head = Some(index),
        }
        match next {
            Some(next) => self.arena[next].prev = Some(index),
            None => self.tail = Some(index),
        }
        index
    }

    fn unlink(&mut self, index: usize) -> T {
        let Link { value, prev, next } = self.arena.remove(index);
        match prev {
            Some(prev) => self.arena[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.arena[next].prev = prev,
            None => self.tail = prev,
        }
        value
    }

    /// Rewrites every link so that the list follows `order`.
    fn relink(&mut self, order: &[usize]) {
        for (position, &index) in order.iter().enumerate() {
            let link = &mut self.arena[index];
            link.prev = position.checked_sub(1).map(|previous| order[previous]);
            link.next = order.get(position + 1).copied();
        }
        self.head = order.first().copied();
        self.tail = order.last().copied();
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`List`].
pub struct ListIter<'a, T> {
    list: &'a List<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let link = &list.arena[self.front?];
        self.front = link.next;
        self.remaining -= 1;
        Some(&link.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for ListIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let list = self.list;
        let link = &list.arena[self.back?];
        self.back = link.prev;
        self.remaining -= 1;
        Some(&link.value)
    }
}

impl<T> ExactSizeIterator for ListIter<'_, T> {}

impl<T> FusedIterator for ListIter<'_, T> {}

impl<T> Clone for ListIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Mutable iterator over a [`List`].
pub struct ListIterMut<'a, T> {
    links: Vec<Option<&'a mut Link<T>>>,
    order: std::vec::IntoIter<usize>,
}

impl<'a, T> Iterator for ListIterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.order.next()?;
        self.links[index].take().map(|link| &mut link.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> DoubleEndedIterator for ListIterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.order.next_back()?;
        self.links[index].take().map(|link| &mut link.value)
    }
}

impl<T> ExactSizeIterator for ListIterMut<'_, T> {}

impl<T> FusedIterator for ListIterMut<'_, T> {}

/// Owning iterator over a [`List`].
pub struct ListIntoIter<T> {
    links: Vec<Option<Link<T>>>,
    order: std::vec::IntoIter<usize>,
}

impl<T> Iterator for ListIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.order.next()?;
        self.links[index].take().map(|link| link.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> DoubleEndedIterator for ListIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.order.next_back()?;
        self.links[index].take().map(|link| link.value)
    }
}

impl<T> ExactSizeIterator for ListIntoIter<T> {}

impl<T> FusedIterator for ListIntoIter<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.insert_many_back(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = ListIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.indices();
        ListIntoIter {
            links: self.arena.into_values(),
            order: order.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = ListIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = ListIterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for List<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::serde_support::serialize_elements(serializer, self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for List<T> {
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
    fn test_roundtrip() {
        let list: List<i32> = [3, 1, 2].into_iter().collect();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, "[3,1,2]");
        let restored: List<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, list);
    }
}
