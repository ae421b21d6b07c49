//! Growable contiguous sequence with checked access.

use std::fmt;
use std::ops::{Index, IndexMut};

use tracing::debug;

use super::{empty_access, index_out_of_range};
use crate::error::{ContainerError, ContainerResult};

/// A contiguous growable array.
///
/// `Vector` wraps a `Vec` and reports misuse through [`ContainerError`]
/// instead of panicking: out-of-range positions, access to an empty vector
/// and capacity requests beyond [`max_size`](Self::max_size).
///
/// | Operation                 | Complexity     |
/// |---------------------------|----------------|
/// | `at` / `front` / `back`   | O(1)           |
/// | `push_back` / `pop_back`  | O(1) amortized |
/// | `insert` / `erase`        | O(N)           |
///
/// # Examples
///
/// ```rust
/// use strata::sequence::Vector;
///
/// let mut vector: Vector<i32> = [1, 2, 4].into_iter().collect();
/// vector.insert(2, 3).unwrap();
/// assert_eq!(vector.as_slice(), &[1, 2, 3, 4]);
/// assert_eq!(vector.erase(0), Ok(1));
/// assert!(vector.at(10).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vector<T> {
    elements: Vec<T>,
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Vector<T> {
    /// Creates an empty vector without allocating.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates a vector of `length` default values.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if `length` is larger than
    /// [`max_size`](Self::max_size) or the allocation fails.
    pub fn with_len(length: usize) -> ContainerResult<Self>
    where
        T: Default,
    {
        Self::check_capacity(length)?;
        let mut elements = Vec::new();
        Self::try_grow(&mut elements, length)?;
        elements.extend(std::iter::repeat_with(T::default).take(length));
        Ok(Self { elements })
    }

    /// The number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The number of elements the vector can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// The largest element count an allocation of `T` can describe.
    #[must_use]
    pub const fn max_size() -> usize {
        let element_size = std::mem::size_of::<T>();
        if element_size == 0 {
            usize::MAX
        } else {
            isize::MAX.unsigned_abs() / element_size
        }
    }

    fn check_capacity(requested: usize) -> ContainerResult<()> {
        let maximum = Self::max_size();
        if requested > maximum {
            debug!(requested, maximum, "vector capacity request refused");
            return Err(ContainerError::CapacityExceeded { requested, maximum });
        }
        Ok(())
    }

    fn try_grow(elements: &mut Vec<T>, capacity: usize) -> ContainerResult<()> {
        let additional = capacity.saturating_sub(elements.len());
        elements.try_reserve_exact(additional).map_err(|error| {
            let maximum = Self::max_size();
            debug!(requested = capacity, maximum, %error, "vector allocation refused");
            ContainerError::CapacityExceeded {
                requested: capacity,
                maximum,
            }
        })
    }

    /// Grows the capacity to at least `capacity` elements.
    ///
    /// A request below the current capacity is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if `capacity > max_size()` or the
    /// allocator cannot provide it; the vector is left unchanged.
    pub fn reserve(&mut self, capacity: usize) -> ContainerResult<()> {
        Self::check_capacity(capacity)?;
        if capacity > self.elements.capacity() {
            Self::try_grow(&mut self.elements, capacity)?;
        }
        Ok(())
    }

    /// Releases unused capacity.
    pub fn shrink_to_fit(&mut self) {
        self.elements.shrink_to_fit();
    }

    /// Checked element access.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> ContainerResult<&T> {
        let length = self.len();
        self.elements
            .get(index)
            .ok_or_else(|| index_out_of_range(index, length))
    }

    /// Checked mutable element access.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> ContainerResult<&mut T> {
        let length = self.len();
        self.elements
            .get_mut(index)
            .ok_or_else(|| index_out_of_range(index, length))
    }

    /// The first element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty vector.
    pub fn front(&self) -> ContainerResult<&T> {
        self.elements
            .first()
            .ok_or_else(|| empty_access("Vector", "front"))
    }

    /// The last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty vector.
    pub fn back(&self) -> ContainerResult<&T> {
        self.elements
            .last()
            .ok_or_else(|| empty_access("Vector", "back"))
    }

    /// The last element, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty vector.
    pub fn back_mut(&mut self) -> ContainerResult<&mut T> {
        self.elements
            .last_mut()
            .ok_or_else(|| empty_access("Vector", "back"))
    }

    /// Appends `value`.
    pub fn push_back(&mut self, value: T) {
        self.elements.push(value);
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `EmptyContainerAccess` on an empty vector.
    pub fn pop_back(&mut self) -> ContainerResult<T> {
        self.elements
            .pop()
            .ok_or_else(|| empty_access("Vector", "pop_back"))
    }

    /// Inserts `value` before `index`; `index == len()` appends.
    ///
    /// Returns the index of the new element.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> ContainerResult<usize> {
        if index > self.len() {
            return Err(index_out_of_range(index, self.len()));
        }
        self.elements.insert(index, value);
        Ok(index)
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> ContainerResult<T> {
        if index >= self.len() {
            return Err(index_out_of_range(index, self.len()));
        }
        Ok(self.elements.remove(index))
    }

    /// Inserts all `values` before `index`, keeping their order.
    ///
    /// Returns the index of the first inserted element.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strata::sequence::Vector;
    ///
    /// let mut vector: Vector<char> = "ad".chars().collect();
    /// assert_eq!(vector.insert_many(1, ['b', 'c']), Ok(1));
    /// assert_eq!(vector.as_slice(), &['a', 'b', 'c', 'd']);
    /// ```
    pub fn insert_many<I>(&mut self, index: usize, values: I) -> ContainerResult<usize>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len() {
            return Err(index_out_of_range(index, self.len()));
        }
        self.elements.splice(index..index, values).for_each(drop);
        Ok(index)
    }

    /// Appends all `values` in order.
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.elements.extend(values);
    }

    /// Removes every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Exchanges the contents of two vectors.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.elements, &mut other.elements);
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
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

    /// Unwraps the underlying `Vec`.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> From<Vec<T>> for Vector<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.elements[index]
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Vector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::serde_support::serialize_elements(serializer, self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Vector<T> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_with_len_defaults() {
        let vector: Vector<String> = Vector::with_len(3).unwrap();
        assert_eq!(vector.len(), 3);
        assert!(vector.iter().all(String::is_empty));
    }

    #[rstest]
    fn test_reserve_beyond_max_size_fails() {
        let mut vector: Vector<u64> = Vector::new();
        let requested = Vector::<u64>::max_size() + 1;
        assert_eq!(
            vector.reserve(requested),
            Err(ContainerError::CapacityExceeded {
                requested,
                maximum: Vector::<u64>::max_size(),
            })
        );
        assert_eq!(vector.capacity(), 0);
    }

    #[rstest]
    fn test_reserve_and_shrink() {
        let mut vector: Vector<i32> = [1, 2].into_iter().collect();
        vector.reserve(64).unwrap();
        assert!(vector.capacity() >= 64);
        vector.shrink_to_fit();
        assert_eq!(vector.as_slice(), &[1, 2]);
    }

    #[rstest]
    fn test_empty_access() {
        let mut vector: Vector<i32> = Vector::new();
        assert_eq!(
            vector.front(),
            Err(ContainerError::EmptyContainerAccess {
                container: "Vector",
                operation: "front",
            })
        );
        assert!(vector.back().is_err());
        assert!(vector.pop_back().is_err());
    }

    #[rstest]
    #[case(0, &[9, 1, 2, 3])]
    #[case(3, &[1, 2, 3, 9])]
    fn test_insert_positions(#[case] index: usize, #[case] expected: &[i32]) {
        let mut vector: Vector<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(vector.insert(index, 9), Ok(index));
        assert_eq!(vector.as_slice(), expected);
    }

    #[rstest]
    fn test_out_of_range_insert_and_erase_leave_vector_unchanged() {
        let mut vector: Vector<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(
            vector.insert(4, 0),
            Err(ContainerError::IndexOutOfRange { index: 4, length: 3 })
        );
        assert_eq!(
            vector.erase(3),
            Err(ContainerError::IndexOutOfRange { index: 3, length: 3 })
        );
        assert!(vector.insert_many(5, [0]).is_err());
        assert_eq!(vector.as_slice(), &[1, 2, 3]);
    }

    #[rstest]
    fn test_insert_many_back_and_swap() {
        let mut left: Vector<i32> = Vector::new();
        left.insert_many_back([1, 2, 3]);
        let mut right: Vector<i32> = [7].into_iter().collect();
        left.swap(&mut right);
        assert_eq!(left.as_slice(), &[7]);
        assert_eq!(right.into_vec(), vec![1, 2, 3]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_roundtrip() {
        let vector: Vector<i32> = [3, 1, 2].into_iter().collect();
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, "[3,1,2]");
        let restored: Vector<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, vector);
    }
}
