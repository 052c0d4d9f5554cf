//! List of boxed elements that survive resets

use core::ops::Deref;

/// Growable list whose element objects are reused across resets
///
/// Every slot owns a boxed `E`. [`reset`](Self::reset) only truncates the
/// logical length, so the boxes stay allocated and the next
/// [`append_dirty_slot`](Self::append_dirty_slot) hands back the object left
/// over from the previous cycle instead of allocating a new one.
///
/// # Example
/// ```
/// use nebula_recycle::list::ReusableList;
///
/// #[derive(Default)]
/// struct Row {
///     id: u64,
/// }
///
/// let mut rows = ReusableList::<Row>::new();
/// rows.append_dirty_slot().id = 7;
///
/// rows.reset();
/// let row = rows.append_dirty_slot();
/// // Dirty: the previous cycle's value is still there.
/// assert_eq!(row.id, 7);
/// row.id = 0;
/// ```
#[derive(Debug)]
pub struct ReusableList<E> {
    slots: Vec<Box<E>>,
    len: usize,
}

impl<E> Default for ReusableList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ReusableList<E> {
    /// Create an empty list
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no live elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots, live or not
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Truncate to zero length, keeping every allocated slot
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }
}

impl<E: Default> ReusableList<E> {
    /// Create an empty list with `capacity` slots already allocated
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Box::<E>::default);
        Self { slots, len: 0 }
    }

    /// Append a slot and return its element
    ///
    /// The element is dirty when an existing slot is reused: it holds
    /// whatever the previous cycle left in it. Callers must reset every
    /// field they read.
    pub fn append_dirty_slot(&mut self) -> &mut E {
        if self.len == self.slots.len() {
            self.slots.push(Box::default());
        }

        let index = self.len;
        self.len += 1;
        &mut *self.slots[index]
    }
}

impl<E> Deref for ReusableList<E> {
    type Target = [Box<E>];

    fn deref(&self) -> &Self::Target {
        &self.slots[..self.len]
    }
}

impl<'a, E> IntoIterator for &'a ReusableList<E> {
    type Item = &'a Box<E>;
    type IntoIter = core::slice::Iter<'a, Box<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
