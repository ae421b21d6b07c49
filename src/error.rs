//! Error types shared by every container in the crate.
//!
//! All fallible operations return [`ContainerError`] synchronously from the
//! call that detected the problem. Nothing is retried internally, and a
//! failed operation leaves the container exactly as it was before the call.

use std::fmt;

/// Errors raised by the ordered and sequential containers.
///
/// # Examples
///
/// ```rust
/// use strata::error::ContainerError;
///
/// let error = ContainerError::EmptyContainerAccess {
///     container: "Stack",
///     operation: "top",
/// };
/// assert_eq!(format!("{error}"), "Stack::top: container is empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// A keyed lookup (`at`) did not find the key.
    KeyNotFound,
    /// The end position, or a position whose element was already erased,
    /// was passed to an operation that needs a live element.
    InvalidIterator,
    /// `front`/`back`/`top`/`pop` style access on an empty container.
    EmptyContainerAccess {
        /// The container type that was accessed.
        container: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// A requested size or capacity is larger than the container can represent.
    CapacityExceeded {
        /// The requested element count.
        requested: usize,
        /// The container's `max_size()`.
        maximum: usize,
    },
    /// A positional access fell outside `0..length` (or `0..=length` for
    /// insertion).
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length of the container at the time of the call.
        length: usize,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => write!(formatter, "key not found"),
            Self::InvalidIterator => {
                write!(formatter, "position does not refer to a live element")
            }
            Self::EmptyContainerAccess {
                container,
                operation,
            } => write!(formatter, "{container}::{operation}: container is empty"),
            Self::CapacityExceeded { requested, maximum } => write!(
                formatter,
                "requested size {requested} exceeds the maximum of {maximum}"
            ),
            Self::IndexOutOfRange { index, length } => write!(
                formatter,
                "index {index} is out of range for length {length}"
            ),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Shorthand for results produced by this crate.
pub type ContainerResult<T> = Result<T, ContainerError>;
