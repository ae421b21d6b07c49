//! Arena node layout for the search tree.

/// A key/value pair plus its links.
///
/// `left` and `right` are owning links in the sense that every slot is
/// reachable from exactly one parent slot; `parent` is a plain back-reference
/// used for upward traversal only. All links are arena slot indices.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) parent: Option<usize>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<K, V> Node<K, V> {
    /// Creates a childless node hanging off `parent`.
    pub(crate) const fn leaf(key: K, value: V, parent: Option<usize>) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
        }
    }
}

/// Which child slot of a parent a new node is attached to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}
