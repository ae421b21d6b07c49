//! Fixed-size array wrapper.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::{empty_access, index_out_of_range};
use crate::error::ContainerResult;

/// An array of exactly `N` elements with checked accessors.
///
/// # Examples
///
/// ```rust
/// use strata::sequence::FixedArray;
///
/// let mut array = FixedArray::from_array([1, 2, 3]);
/// assert_eq!(array.at(1), Ok(&2));
/// assert!(array.at(3).is_err());
///
/// array.fill(7);
/// assert_eq!(array.as_slice(), &[7, 7, 7]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedArray<T, const N: usize> {
    elements: [T; N],
}

impl<T, const N: usize> FixedArray<T, N> {
    /// Wraps an existing array.
    #[inline]
    pub const fn from_array(elements: [T; N]) -> Self {
        Self { elements }
    }

    /// Returns an array of `N` default values.
    #[must_use]
    pub fn new() -> Self
    where
        T: Default,
    {
        Self {
            elements: std::array::from_fn(|_| T::default()),
        }
    }

    /// Always `N`.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` only for `N == 0`.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Always `N`.
    #[must_use]
    pub const fn max_size() -> usize {
        N
    }

    /// Checked element access.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= N`.
    pub fn at(&self, index: usize) -> ContainerResult<&T> {
        self.elements
            .get(index)
            .ok_or_else(|| index_out_of_range(index, N))
    }

    /// Checked mutable element access.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= N`.
    pub fn at_mut(&mut self, index: usize) -> ContainerResult<&mut T> {
        self.elements
            .get_mut(index)
            .ok_or_else(|| index_out_of_range(index, N))
    }

    /// The first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` for `N == 0`.
    pub fn front(&self) -> ContainerResult<&T> {
        self.elements
            .first()
            .ok_or_else(|| empty_access("FixedArray", "front"))
    }

    /// The last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` for `N == 0`.
    pub fn back(&self) -> ContainerResult<&T> {
        self.elements
            .last()
            .ok_or_else(|| empty_access("FixedArray", "back"))
    }

    /// Overwrites every element with a clone of `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.elements.fill(value);
    }

    /// Exchanges the contents of two arrays.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.elements, &mut other.elements);
    }

    /// The elements as a slice.
    #[must_use]
    pub const fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Iterates over the elements mutably.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }

    /// Unwraps the inner array.
    pub fn into_inner(self) -> [T; N] {
        self.elements
    }
}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    fn from(elements: [T; N]) -> Self {
        Self::from_array(elements)
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.elements[index]
    }
}

impl<T, const N: usize> IntoIterator for FixedArray<T, N> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedArray<T, N> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, const N: usize> serde::Serialize for FixedArray<T, N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::serde_support::serialize_elements(serializer, self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, const N: usize> serde::Deserialize<'de> for FixedArray<T, N>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Vec::<T>::deserialize(deserializer)?;
        let length = elements.len();
        <[T; N]>::try_from(elements)
            .map(Self::from_array)
            .map_err(|_| {
                serde::de::Error::invalid_length(length, &"a sequence of the array's length")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContainerError;
    use rstest::rstest;

    #[rstest]
    fn test_default_is_filled_with_default() {
        let array: FixedArray<i32, 4> = FixedArray::new();
        assert_eq!(array.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(array.len(), 4);
    }

    #[rstest]
    #[case(0, Ok(&10))]
    #[case(2, Ok(&30))]
    #[case(3, Err(ContainerError::IndexOutOfRange { index: 3, length: 3 }))]
    fn test_at(#[case] index: usize, #[case] expected: Result<&i32, ContainerError>) {
        let array = FixedArray::from_array([10, 20, 30]);
        assert_eq!(array.at(index), expected);
    }

    #[rstest]
    fn test_front_back_on_zero_length() {
        let array: FixedArray<i32, 0> = FixedArray::new();
        assert!(array.is_empty());
        assert!(matches!(
            array.front(),
            Err(ContainerError::EmptyContainerAccess { operation: "front", .. })
        ));
        assert!(array.back().is_err());
    }

    #[rstest]
    fn test_swap_and_mutation() {
        let mut left = FixedArray::from_array([1, 2]);
        let mut right = FixedArray::from_array([3, 4]);
        left.swap(&mut right);
        *left.at_mut(0).unwrap() = 9;
        left[1] += 1;
        assert_eq!(left.into_inner(), [9, 5]);
        assert_eq!(right.front(), Ok(&1));
        assert_eq!(right.back(), Ok(&2));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_roundtrip() {
        let array = FixedArray::from_array([1, 2, 3]);
        let json = serde_json::to_string(&array).unwrap();
        assert_eq!(json, "[1,2,3]");
        let restored: FixedArray<i32, 3> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, array);
    }

    #[rstest]
    fn test_wrong_length_is_rejected() {
        let result: Result<FixedArray<i32, 3>, _> = serde_json::from_str("[1,2]");
        assert!(result.is_err());
    }
}
