//! Double-ended queue built from two back-to-back stacks.
//!
//! The logical sequence is `front` reversed followed by `back`. Pushes go to
//! the top of the matching stack. A pop from an exhausted side moves half of
//! the other side across, so both ends stay amortized O(1).
//!
//! ```text
//! front: [2, 1, 0]   back: [3, 4]
//! logical:  0 1 2 3 4
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Chain, FusedIterator, Rev};

use super::empty_access;
use crate::error::ContainerResult;

/// A double-ended queue.
///
/// This is the default storage for [`Stack`](super::Stack) and
/// [`Queue`](super::Queue).
///
/// # Examples
///
/// ```rust
/// use strata::sequence::Deque;
///
/// let mut deque = Deque::new();
/// deque.push_back(2);
/// deque.push_front(1);
/// deque.push_back(3);
///
/// assert_eq!(deque.front(), Ok(&1));
/// assert_eq!(deque.back(), Ok(&3));
/// assert_eq!(deque.pop_front(), Ok(1));
/// assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
/// ```
#[derive(Clone)]
pub struct Deque<T> {
    front: Vec<T>,
    back: Vec<T>,
}

impl<T> Deque<T> {
    /// Creates an empty deque.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            front: Vec::new(),
            back: Vec::new(),
        }
    }

    /// The number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    /// Returns `true` if the deque is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }

    /// Prepends `value`.
    pub fn push_front(&mut self, value: T) {
        self.front.push(value);
    }

    /// Appends `value`.
    pub fn push_back(&mut self, value: T) {
        self.back.push(value);
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty deque.
    pub fn pop_front(&mut self) -> ContainerResult<T> {
        if self.front.is_empty() {
            // *][01234*  ->  *012][34*
            let mut moved = std::mem::take(&mut self.back);
            let keep = moved.split_off(moved.len().div_ceil(2));
            moved.reverse();
            self.front = moved;
            self.back = keep;
        }
        self.front
            .pop()
            .ok_or_else(|| empty_access("Deque", "pop_front"))
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty deque.
    pub fn pop_back(&mut self) -> ContainerResult<T> {
        if self.back.is_empty() {
            // *43210][*  ->  *10][234*
            let mut moved = std::mem::take(&mut self.front);
            let keep = moved.split_off(moved.len().div_ceil(2));
            moved.reverse();
            self.back = moved;
            self.front = keep;
        }
        self.back
            .pop()
            .ok_or_else(|| empty_access("Deque", "pop_back"))
    }

    /// The first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty deque.
    pub fn front(&self) -> ContainerResult<&T> {
        self.front
            .last()
            .or_else(|| self.back.first())
            .ok_or_else(|| empty_access("Deque", "front"))
    }

    /// The last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty deque.
    pub fn back(&self) -> ContainerResult<&T> {
        self.back
            .last()
            .or_else(|| self.front.first())
            .ok_or_else(|| empty_access("Deque", "back"))
    }

    /// The first element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty deque.
    pub fn front_mut(&mut self) -> ContainerResult<&mut T> {
        let element = if self.front.is_empty() {
            self.back.first_mut()
        } else {
            self.front.last_mut()
        };
        element.ok_or_else(|| empty_access("Deque", "front"))
    }

    /// The last element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty deque.
    pub fn back_mut(&mut self) -> ContainerResult<&mut T> {
        let element = if self.back.is_empty() {
            self.front.first_mut()
        } else {
            self.back.last_mut()
        };
        element.ok_or_else(|| empty_access("Deque", "back"))
    }

    /// The element `index` places from the front.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        let front_len = self.front.len();
        if index < front_len {
            self.front.get(front_len - 1 - index)
        } else {
            self.back.get(index - front_len)
        }
    }

    /// Appends all `values` in order.
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.back.extend(values);
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.front.clear();
        self.back.clear();
    }

    /// Exchanges the contents of two deques.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Iterates front to back.
    #[must_use]
    pub fn iter(&self) -> DequeIter<'_, T> {
        DequeIter {
            inner: self.front.iter().rev().chain(self.back.iter()),
            remaining: self.len(),
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`Deque`].
pub struct DequeIter<'a, T> {
    inner: Chain<Rev<std::slice::Iter<'a, T>>, std::slice::Iter<'a, T>>,
    remaining: usize,
}

impl<'a, T> Iterator for DequeIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.inner.next()?;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for DequeIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let element = self.inner.next_back()?;
        self.remaining -= 1;
        Some(element)
    }
}

impl<T> ExactSizeIterator for DequeIter<'_, T> {}

impl<T> FusedIterator for DequeIter<'_, T> {}

impl<T> Clone for DequeIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over a [`Deque`].
pub struct DequeIntoIter<T> {
    inner: Chain<Rev<std::vec::IntoIter<T>>, std::vec::IntoIter<T>>,
    remaining: usize,
}

impl<T> Iterator for DequeIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.inner.next()?;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for DequeIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let element = self.inner.next_back()?;
        self.remaining -= 1;
        Some(element)
    }
}

impl<T> ExactSizeIterator for DequeIntoIter<T> {}

impl<T> FusedIterator for DequeIntoIter<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            front: Vec::new(),
            back: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = DequeIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        DequeIntoIter {
            inner: self.front.into_iter().rev().chain(self.back),
            remaining,
        }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = DequeIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Deque<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::serde_support::serialize_elements(serializer, self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Deque<T> {
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
