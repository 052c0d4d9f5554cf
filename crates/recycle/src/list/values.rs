//! List of plain values with a clearing resize

use core::ops::{Deref, DerefMut};

/// Growable list of values that keeps its backing storage across resets
///
/// [`reset`](Self::reset) truncates without shrinking. The one operation
/// that guarantees clean data is
/// [`hard_reset_and_resize_to`](Self::hard_reset_and_resize_to), which
/// writes `T::default()` into every slot it exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReusableValues<T> {
    elems: Vec<T>,
}

impl<T> Default for ReusableValues<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReusableValues<T> {
    /// Create an empty list
    pub const fn new() -> Self {
        Self { elems: Vec::new() }
    }

    /// Create an empty list with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elems: Vec::with_capacity(capacity),
        }
    }

    /// Number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Whether the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// Backing storage capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.elems.capacity()
    }

    /// Truncate to zero length, keeping backing storage
    #[inline]
    pub fn reset(&mut self) {
        self.elems.clear();
    }

    /// Append a value
    #[inline]
    pub fn push(&mut self, value: T) {
        self.elems.push(value);
    }
}

impl<T: Default> ReusableValues<T> {
    /// Resize to `final_size` and overwrite every slot with `T::default()`
    ///
    /// Storage is reallocated, to exactly `final_size`, only when it does not
    /// fit in the current capacity.
    pub fn hard_reset_and_resize_to(&mut self, final_size: usize) {
        self.elems.clear();
        if final_size > self.elems.capacity() {
            self.elems = Vec::with_capacity(final_size);
        }
        self.elems.resize_with(final_size, T::default);
    }
}

impl<T> Deref for ReusableValues<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elems
    }
}

impl<T> DerefMut for ReusableValues<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elems
    }
}

impl<'a, T> IntoIterator for &'a ReusableValues<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}

impl<T> From<Vec<T>> for ReusableValues<T> {
    fn from(elems: Vec<T>) -> Self {
        Self { elems }
    }
}
