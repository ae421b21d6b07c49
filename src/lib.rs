//! # strata
//!
//! Generic in-memory containers built around an unbalanced binary search
//! tree, plus the usual linear containers.
//!
//! ## Overview
//!
//! - **Tree core**: [`tree::SearchTree`], a parent-linked search tree whose
//!   nodes live in a generational arena, with `Copy` position handles that
//!   survive unrelated insertions and erasures
//! - **Ordered containers**: [`ordered::TreeMap`], [`ordered::TreeSet`] and
//!   [`ordered::TreeMultiset`]
//! - **Sequences**: [`sequence::Vector`], [`sequence::List`],
//!   [`sequence::Deque`], [`sequence::FixedArray`] and the
//!   [`sequence::Stack`]/[`sequence::Queue`] adapters
//!
//! Misuse (missing keys, stale positions, access to an empty container,
//! oversize requests) is reported through [`error::ContainerError`].
//!
//! ## Feature Flags
//!
//! - `ordered` (default): the tree core and the map/set/multiset adapters
//! - `sequence` (default): the linear containers and adapters
//! - `serde`: `Serialize`/`Deserialize` for every container
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let mut scores: TreeMap<&str, u32> = TreeMap::new();
//! scores.insert("carol", 7);
//! scores.insert("alice", 9);
//! *scores.get_or_insert_default("bob") += 4;
//!
//! let names: Vec<&str> = scores.keys().copied().collect();
//! assert_eq!(names, vec!["alice", "bob", "carol"]);
//! assert_eq!(scores.at(&"dave"), Err(ContainerError::KeyNotFound));
//!
//! let mut pending: Queue<&str> = Queue::new();
//! pending.push("alice");
//! assert_eq!(pending.pop(), Ok("alice"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ContainerError, ContainerResult};

    #[cfg(feature = "ordered")]
    pub use crate::ordered::*;

    #[cfg(feature = "ordered")]
    pub use crate::tree::{Cursor, Position, SearchTree};

    #[cfg(feature = "sequence")]
    pub use crate::sequence::*;
}

pub mod error;

#[cfg(any(feature = "ordered", feature = "sequence"))]
mod arena;

#[cfg(feature = "serde")]
mod serde_support;

#[cfg(feature = "ordered")]
pub mod tree;

#[cfg(feature = "ordered")]
pub mod ordered;

#[cfg(feature = "sequence")]
pub mod sequence;

#[cfg(feature = "ordered")]
mod ordered_assertions {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use crate::ordered::{TreeMap, TreeMultiset, TreeSet};
    use crate::tree::{Position, SearchTree};

    assert_impl_all!(Position: Copy, Send, Sync, Eq, std::hash::Hash);
    assert_impl_all!(SearchTree<String, u64>: Send, Sync, Clone);
    assert_impl_all!(TreeMap<String, u64>: Send, Sync, Clone);
    assert_impl_all!(TreeSet<String>: Send, Sync, Clone);
    assert_impl_all!(TreeMultiset<String>: Send, Sync, Clone);
    assert_not_impl_any!(TreeMap<std::rc::Rc<u8>, u8>: Send, Sync);
}

#[cfg(feature = "sequence")]
mod sequence_assertions {
    use static_assertions::assert_impl_all;

    use crate::sequence::{Deque, FixedArray, List, ListPosition, Queue, Stack, Vector};

    assert_impl_all!(ListPosition: Copy, Send, Sync);
    assert_impl_all!(FixedArray<u8, 4>: Copy, Send, Sync);
    assert_impl_all!(Vector<String>: Send, Sync, Clone);
    assert_impl_all!(List<String>: Send, Sync, Clone);
    assert_impl_all!(Deque<String>: Send, Sync, Clone);
    assert_impl_all!(Stack<String>: Send, Sync, Clone);
    assert_impl_all!(Queue<String, List<String>>: Send, Sync, Clone);
}
