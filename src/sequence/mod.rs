//! Linear containers and the stack/queue adapters.
//!
//! | Type                | Storage                         | Fast ends |
//! |---------------------|---------------------------------|-----------|
//! | [`FixedArray`]      | inline `[T; N]`                 | n/a       |
//! | [`Vector`]          | contiguous, growable            | back      |
//! | [`List`]            | doubly linked, arena nodes      | both      |
//! | [`Deque`]           | two back-to-back stacks         | both      |
//! | [`Stack`]/[`Queue`] | any [`BackStorage`] / [`DoubleEndedStorage`] | |
//!
//! Accessing the ends of an empty container is reported as
//! [`ContainerError::EmptyContainerAccess`] rather than a panic.

use tracing::debug;

use crate::error::ContainerError;

mod adapter;
mod array;
mod deque;
mod list;
mod vector;

pub use adapter::{BackStorage, DoubleEndedStorage, Queue, Stack};
pub use array::FixedArray;
pub use deque::{Deque, DequeIntoIter, DequeIter};
pub use list::{List, ListIntoIter, ListIter, ListIterMut, ListPosition};
pub use vector::Vector;

fn empty_access(container: &'static str, operation: &'static str) -> ContainerError {
    debug!(container, operation, "access to an empty container");
    ContainerError::EmptyContainerAccess {
        container,
        operation,
    }
}

fn index_out_of_range(index: usize, length: usize) -> ContainerError {
    debug!(index, length, "positional access out of range");
    ContainerError::IndexOutOfRange { index, length }
}
