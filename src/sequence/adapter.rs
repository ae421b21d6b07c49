//! Stack and queue adapters over pluggable storage.
//!
//! The adapters only need a handful of end operations from their storage.
//! [`BackStorage`] is what a LIFO [`Stack`] needs; [`DoubleEndedStorage`]
//! adds the front end that a FIFO [`Queue`] pops from. [`Deque`] implements
//! both and is the default.
//!
//! # Examples
//!
//! ```rust
//! use strata::sequence::{List, Queue, Stack, Vector};
//!
//! let mut stack: Stack<i32> = Stack::new();
//! stack.insert_many_back([1, 2, 3]);
//! assert_eq!(stack.pop(), Ok(3));
//!
//! let mut queue: Queue<&str, List<&str>> = Queue::new();
//! queue.push("first");
//! queue.push("second");
//! assert_eq!(queue.pop(), Ok("first"));
//!
//! let vector_stack: Stack<i32, Vector<i32>> = [1, 2].into_iter().collect();
//! assert_eq!(vector_stack.top(), Ok(&2));
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::{Deque, List, Vector, empty_access};
use crate::error::ContainerResult;

// =============================================================================
// Storage traits
// =============================================================================

/// Storage that can grow and shrink at its back end.
pub trait BackStorage<T>: Default {
    /// Appends `value`.
    fn push_back(&mut self, value: T);

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` when empty.
    fn pop_back(&mut self) -> ContainerResult<T>;

    /// The last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` when empty.
    fn back(&self) -> ContainerResult<&T>;

    /// The last element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` when empty.
    fn back_mut(&mut self) -> ContainerResult<&mut T>;

    /// The number of stored elements.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element.
    fn clear(&mut self);
}

/// Storage that can additionally shrink and be read at its front end.
pub trait DoubleEndedStorage<T>: BackStorage<T> {
    /// Removes the first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` when empty.
    fn pop_front(&mut self) -> ContainerResult<T>;

    /// The first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` when empty.
    fn front(&self) -> ContainerResult<&T>;

    /// The first element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` when empty.
    fn front_mut(&mut self) -> ContainerResult<&mut T>;
}

macro_rules! forward_back_storage {
    ($storage:ident) => {
        impl<T> BackStorage<T> for $storage<T> {
            fn push_back(&mut self, value: T) {
                $storage::push_back(self, value);
            }

            fn pop_back(&mut self) -> ContainerResult<T> {
                $storage::pop_back(self)
            }

            fn back(&self) -> ContainerResult<&T> {
                $storage::back(self)
            }

            fn back_mut(&mut self) -> ContainerResult<&mut T> {
                $storage::back_mut(self)
            }

            fn len(&self) -> usize {
                $storage::len(self)
            }

            fn clear(&mut self) {
                $storage::clear(self);
            }
        }
    };
}

forward_back_storage!(Deque);
forward_back_storage!(Vector);
forward_back_storage!(List);

impl<T> DoubleEndedStorage<T> for Deque<T> {
    fn pop_front(&mut self) -> ContainerResult<T> {
        Self::pop_front(self)
    }

    fn front(&self) -> ContainerResult<&T> {
        Self::front(self)
    }

    fn front_mut(&mut self) -> ContainerResult<&mut T> {
        Self::front_mut(self)
    }
}

impl<T> DoubleEndedStorage<T> for List<T> {
    fn pop_front(&mut self) -> ContainerResult<T> {
        Self::pop_front(self)
    }

    fn front(&self) -> ContainerResult<&T> {
        Self::front(self)
    }

    fn front_mut(&mut self) -> ContainerResult<&mut T> {
        Self::front_mut(self)
    }
}

// =============================================================================
// Stack
// =============================================================================

/// A last-in, first-out adapter.
///
/// Errors name the stack rather than its storage, e.g.
/// `Stack::top: container is empty`.
pub struct Stack<T, C = Deque<T>> {
    storage: C,
    marker: PhantomData<T>,
}

impl<T, C: BackStorage<T>> Stack<T, C> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::from_storage(C::default())
    }

    /// Wraps existing storage; its back becomes the top.
    pub const fn from_storage(storage: C) -> Self {
        Self {
            storage,
            marker: PhantomData,
        }
    }

    /// Unwraps the storage.
    pub fn into_storage(self) -> C {
        self.storage
    }

    /// The number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Pushes `value` on top.
    pub fn push(&mut self, value: T) {
        self.storage.push_back(value);
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty stack.
    pub fn pop(&mut self) -> ContainerResult<T> {
        if self.storage.is_empty() {
            return Err(empty_access("Stack", "pop"));
        }
        self.storage.pop_back()
    }

    /// The top element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty stack.
    pub fn top(&self) -> ContainerResult<&T> {
        if self.storage.is_empty() {
            return Err(empty_access("Stack", "top"));
        }
        self.storage.back()
    }

    /// The top element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty stack.
    pub fn top_mut(&mut self) -> ContainerResult<&mut T> {
        if self.storage.is_empty() {
            return Err(empty_access("Stack", "top"));
        }
        self.storage.back_mut()
    }

    /// Pushes every value in order; the last one ends up on top.
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push(value);
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Exchanges the contents of two stacks.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.storage, &mut other.storage);
    }
}

// =============================================================================
// Queue
// =============================================================================

/// A first-in, first-out adapter.
pub struct Queue<T, C = Deque<T>> {
    storage: C,
    marker: PhantomData<T>,
}

impl<T, C: DoubleEndedStorage<T>> Queue<T, C> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::from_storage(C::default())
    }

    /// Wraps existing storage; its front is the next element out.
    pub const fn from_storage(storage: C) -> Self {
        Self {
            storage,
            marker: PhantomData,
        }
    }

    /// Unwraps the storage.
    pub fn into_storage(self) -> C {
        self.storage
    }

    /// The number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Enqueues `value` at the back.
    pub fn push(&mut self, value: T) {
        self.storage.push_back(value);
    }

    /// Dequeues the front element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty queue.
    pub fn pop(&mut self) -> ContainerResult<T> {
        if self.storage.is_empty() {
            return Err(empty_access("Queue", "pop"));
        }
        self.storage.pop_front()
    }

    /// The next element to be dequeued.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty queue.
    pub fn front(&self) -> ContainerResult<&T> {
        if self.storage.is_empty() {
            return Err(empty_access("Queue", "front"));
        }
        self.storage.front()
    }

    /// The most recently enqueued element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty queue.
    pub fn back(&self) -> ContainerResult<&T> {
        if self.storage.is_empty() {
            return Err(empty_access("Queue", "back"));
        }
        self.storage.back()
    }

    /// The next element to be dequeued, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty queue.
    pub fn front_mut(&mut self) -> ContainerResult<&mut T> {
        if self.storage.is_empty() {
            return Err(empty_access("Queue", "front"));
        }
        self.storage.front_mut()
    }

    /// Enqueues every value in order.
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push(value);
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Exchanges the contents of two queues.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.storage, &mut other.storage);
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

macro_rules! adapter_traits {
    ($adapter:ident, $bound:ident) => {
        impl<T, C: $bound<T>> Default for $adapter<T, C> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T, C: Clone> Clone for $adapter<T, C> {
            fn clone(&self) -> Self {
                Self {
                    storage: self.storage.clone(),
                    marker: PhantomData,
                }
            }
        }

        impl<T, C: PartialEq> PartialEq for $adapter<T, C> {
            fn eq(&self, other: &Self) -> bool {
                self.storage == other.storage
            }
        }

        impl<T, C: Eq> Eq for $adapter<T, C> {}

        impl<T, C: fmt::Debug> fmt::Debug for $adapter<T, C> {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter
                    .debug_tuple(stringify!($adapter))
                    .field(&self.storage)
                    .finish()
            }
        }

        impl<T, C: $bound<T>> FromIterator<T> for $adapter<T, C> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut adapter = Self::new();
                adapter.insert_many_back(iter);
                adapter
            }
        }

        impl<T, C: $bound<T>> Extend<T> for $adapter<T, C> {
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                self.insert_many_back(iter);
            }
        }

        #[cfg(feature = "serde")]
        impl<T, C: serde::Serialize> serde::Serialize for $adapter<T, C> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.storage, serializer)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de, T, C> serde::Deserialize<'de> for $adapter<T, C>
        where
            C: serde::Deserialize<'de> + $bound<T>,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                C::deserialize(deserializer).map(Self::from_storage)
            }
        }
    };
}

adapter_traits!(Stack, BackStorage);
adapter_traits!(Queue, DoubleEndedStorage);

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_stack_serializes_bottom_to_top() {
        let stack: Stack<i32> = [1, 2, 3].into_iter().collect();
        let json = serde_json::to_string(&stack).unwrap();
        assert_eq!(json, "[1,2,3]");
        let mut restored: Stack<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.pop(), Ok(3));
    }
}
