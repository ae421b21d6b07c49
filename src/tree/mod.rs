//! The ordered associative container core.
//!
//! [`SearchTree`] is a binary search tree with parent links whose nodes live
//! in a generational arena. It backs the map, set and multiset adapters in
//! [`crate::ordered`], which add their own value shape and duplicate policy
//! on top of the primitives here:
//!
//! - [`SearchTree::insert_unique`]: reject a present key
//! - [`SearchTree::insert_or_assign`]: overwrite a present key's value
//! - [`SearchTree::insert_duplicate`]: always insert, after equal keys
//!
//! # Positions
//!
//! Lookups return [`Position`] handles rather than borrowed iterators, so a
//! caller can look something up, mutate the tree elsewhere, and still erase
//! or read the element later. Erasing an element invalidates only the
//! positions that point at it; using a stale position is reported as
//! [`ContainerError::InvalidIterator`](crate::error::ContainerError::InvalidIterator).
//!
//! ```rust
//! use strata::tree::SearchTree;
//!
//! let mut tree = SearchTree::new();
//! let (seven, _) = tree.insert_unique(7, "seven");
//! for key in [3, 9, 1] {
//!     tree.insert_unique(key, "other");
//! }
//! tree.erase(tree.find(&3)).unwrap();
//!
//! assert_eq!(tree.entry_at(seven), Some((&7, &"seven")));
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 7, 9]);
//! ```
//!
//! # Balancing
//!
//! None. The tree keeps the shape produced by plain BST descent, so sorted
//! input degrades it to a list. Traversal is iterative throughout, which
//! keeps deep trees safe, but lookups on such input cost O(N).

mod cursor;
mod node;
mod search;

pub use cursor::{Cursor, IntoIter, Iter, IterMut, Position};
pub use search::SearchTree;
