//! Ordered associative containers.
//!
//! Three adapters over [`SearchTree`](crate::tree::SearchTree):
//!
//! - [`TreeMap`]: unique keys, each with a value
//! - [`TreeSet`]: unique elements
//! - [`TreeMultiset`]: repeated elements allowed
//!
//! All three hand out [`Position`](crate::tree::Position) handles for
//! lookups and bound queries, and Rust iterators for traversal.

use std::fmt;
use std::iter::FusedIterator;

use crate::tree::{IntoIter, Iter};

mod map;
mod multiset;
mod set;

pub use map::TreeMap;
pub use multiset::TreeMultiset;
pub use set::TreeSet;

/// Borrowing iterator over the elements of a [`TreeSet`] or [`TreeMultiset`].
#[derive(Clone)]
pub struct KeyIter<'a, T> {
    inner: Iter<'a, T, ()>,
}

impl<'a, T> KeyIter<'a, T> {
    const fn new(inner: Iter<'a, T, ()>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for KeyIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for KeyIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(element, ())| element)
    }
}

impl<T> ExactSizeIterator for KeyIter<'_, T> {}

impl<T> FusedIterator for KeyIter<'_, T> {}

/// Owning iterator over the elements of a [`TreeSet`] or [`TreeMultiset`].
pub struct KeyIntoIter<T> {
    inner: IntoIter<T, ()>,
}

impl<T> KeyIntoIter<T> {
    const fn new(inner: IntoIter<T, ()>) -> Self {
        Self { inner }
    }
}

impl<T> Iterator for KeyIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for KeyIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(element, ())| element)
    }
}

impl<T> ExactSizeIterator for KeyIntoIter<T> {}

impl<T> FusedIterator for KeyIntoIter<T> {}

/// Writes `{a, b, c}`.
fn write_braced<'a, T, I>(formatter: &mut fmt::Formatter<'_>, elements: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: Iterator<Item = &'a T>,
{
    write!(formatter, "{{")?;
    for (index, element) in elements.enumerate() {
        if index > 0 {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{element}")?;
    }
    write!(formatter, "}}")
}
