//! Backing store for both map variants

use crate::error::{MapError, Result};

/// A contiguous, resizable sequence with O(1) indexed access.
///
/// Maps treat it as fixed-length storage: a table is allocated once at its
/// capacity and replaced wholesale on resize. Access is bounds-checked and
/// never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicArray<T> {
    /// The stored elements
    items: Vec<T>,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    /// Largest length an allocation of `T`s can have
    pub const MAX_LENGTH: usize = match isize::MAX.unsigned_abs().checked_div(size_of::<T>()) {
        Some(length) => length,
        None => usize::MAX,
    };

    /// Creates an empty array
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an array of `length` elements, each a clone of `fill`
    #[must_use]
    pub fn filled(length: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self { items: vec![fill; length] }
    }

    /// Creates an array of `length` elements produced by `fill`
    #[must_use]
    pub fn filled_with<F>(length: usize, fill: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut items = Vec::with_capacity(length);
        items.resize_with(length, fill);
        Self { items }
    }

    /// Like [`DynamicArray::filled_with`], but reports allocation failure
    /// instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AllocationFailed`] when the allocator cannot provide
    /// `length` elements.
    pub fn try_filled_with<F>(length: usize, fill: F) -> Result<Self>
    where
        F: FnMut() -> T,
    {
        let mut items = Vec::new();
        items.try_reserve_exact(length).map_err(|_| MapError::AllocationFailed { length })?;
        items.resize_with(length, fill);
        Ok(Self { items })
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the array holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns a mutable reference to the element at `index`, if any
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if `index >= len()`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let length = self.items.len();
        self.items
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
            .ok_or(MapError::OutOfBounds { index, length })
    }

    /// Appends an element at the end
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Grows or truncates to `length`, filling new positions with clones of `fill`
    pub fn resize(&mut self, length: usize, fill: T)
    where
        T: Clone,
    {
        self.items.resize(length, fill);
    }

    /// Iterates over the elements in index order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates mutably over the elements in index order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Views the elements as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
