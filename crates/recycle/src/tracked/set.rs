//! Borrow set that releases everything it handed out in one call
//!
//! # Safety
//!
//! Borrowed objects leave the pool as boxes and are leaked into raw
//! pointers:
//! - `borrow` records the pointer under the lock, then hands out a
//!   `TrackedRef` that borrows the set, so no object reference outlives the
//!   set
//! - each pointer is handed to exactly one `TrackedRef`, so `&mut T` access
//!   never aliases
//! - `Drop` rebuilds every box exactly once and returns it to the pool;
//!   it runs only after every `TrackedRef` is gone

use core::fmt;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;

use parking_lot::Mutex;
use tracing::trace;

use super::{TrackedHandle, TrackedRef};
use crate::list::ReusableValues;
use crate::pool::ObjectPool;

/// Pool of tracking lists shared by every [`TrackedBorrowSet`], whatever
/// object type the set borrows
pub type TrackingListPool = ObjectPool<ReusableValues<TrackedHandle>>;

/// Tracks objects borrowed from an [`ObjectPool`] during one logical
/// operation so they can be released together
///
/// Any number of threads may call [`borrow`](Self::borrow) at once. Only the
/// bookkeeping list is locked; each borrowed object is exclusively owned by
/// its caller until the set releases it.
///
/// # Example
/// ```
/// use nebula_recycle::pool::ObjectPool;
/// use nebula_recycle::tracked::{TrackedBorrowSet, TrackingListPool};
///
/// let lists = TrackingListPool::new();
/// let buffers = ObjectPool::<String>::new();
///
/// let set = TrackedBorrowSet::new(&buffers, &lists);
/// let mut greeting = set.borrow();
/// greeting.clear();
/// greeting.push_str("hello");
///
/// std::thread::scope(|s| {
///     s.spawn(|| {
///         let mut scratch = set.borrow();
///         scratch.clear();
///     });
/// });
///
/// assert_eq!(*greeting, "hello");
/// assert_eq!(set.release_all(), 2);
/// assert_eq!(buffers.idle(), 2);
/// ```
pub struct TrackedBorrowSet<'p, T: Send + 'static> {
    pool: &'p ObjectPool<T>,
    lists: &'p TrackingListPool,
    tracked: ManuallyDrop<Mutex<Box<ReusableValues<TrackedHandle>>>>,
}

impl<'p, T: Send + 'static> TrackedBorrowSet<'p, T> {
    /// Create a set borrowing from `pool`, with its tracking list drawn from
    /// `lists`
    pub fn new(pool: &'p ObjectPool<T>, lists: &'p TrackingListPool) -> Self {
        let mut list = lists.borrow();
        list.reset();

        Self {
            pool,
            lists,
            tracked: ManuallyDrop::new(Mutex::new(list)),
        }
    }

    /// Borrow an object from the pool and track it
    ///
    /// The object may be dirty; reset it before relying on its contents.
    /// Safe to call from many threads at once.
    pub fn borrow(&self) -> TrackedRef<'_, T> {
        let ptr = NonNull::from(Box::leak(self.pool.borrow()));
        self.tracked.lock().push(TrackedHandle::new(ptr, self.pool.id()));
        TrackedRef::new(ptr)
    }

    /// Number of tracked objects
    pub fn len(&self) -> usize {
        self.tracked.lock().len()
    }

    /// Whether nothing has been borrowed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live view of the tracking list, without holding the lock
    ///
    /// The view is not a copy: concurrent [`borrow`](Self::borrow) calls
    /// would append to it while it is being read.
    ///
    /// # Safety
    ///
    /// No `borrow` on this set may run while the returned reference is
    /// alive. Typically called once all borrowing work has completed.
    pub unsafe fn snapshot_unchecked(&self) -> &ReusableValues<TrackedHandle> {
        // Locking once synchronizes with every borrow that completed before
        // this call.
        let list: *const ReusableValues<TrackedHandle> = &**self.tracked.lock();

        // SAFETY: the list lives in a box owned by self, so the address is
        // stable for the lifetime of &self; the caller guarantees no writer
        // runs while the reference is alive.
        unsafe { &*list }
    }

    /// Mutable access to every tracked object
    ///
    /// `&mut self` guarantees no borrow is in flight and no `TrackedRef` is
    /// alive.
    pub fn tracked_mut(&mut self) -> impl ExactSizeIterator<Item = &mut T> + '_ {
        self.tracked.get_mut().iter().map(|handle| {
            // SAFETY: each handle points to a distinct live Box<T> owned by
            // this set; exclusive access follows from &mut self.
            unsafe { &mut *handle.as_ptr().cast::<T>().as_ptr() }
        })
    }

    /// Release every tracked object to the pool and recycle the tracking
    /// list
    ///
    /// Returns how many objects were released. Consuming the set rules out
    /// concurrent borrows and reuse after release.
    pub fn release_all(self) -> usize {
        let released = self.len();
        drop(self);
        released
    }

    /// Pool this set borrows from
    pub fn pool(&self) -> &'p ObjectPool<T> {
        self.pool
    }
}

impl<T: Send + 'static> Drop for TrackedBorrowSet<'_, T> {
    fn drop(&mut self) {
        // SAFETY: tracked is initialized in `new` and taken only here.
        let list = unsafe { ManuallyDrop::take(&mut self.tracked) }.into_inner();

        for handle in list.iter() {
            // Holds by construction: `borrow` stamps every handle with this
            // set's pool id. Checked in debug builds only.
            debug_assert_eq!(
                handle.origin(),
                self.pool.id(),
                "tracked object released to a pool it was not borrowed from"
            );

            // SAFETY: every handle was recorded by `borrow` from a Box<T> of
            // self.pool and is rebuilt once; TrackedRefs borrow the set, so
            // none is alive while it drops.
            let obj = unsafe { handle.into_box::<T>() };
            self.pool.release(obj);
        }

        trace!(pool = %self.pool.name(), released = list.len(), "tracked set released");

        self.lists.release(list);
    }
}

impl<T: Send + 'static> fmt::Debug for TrackedBorrowSet<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedBorrowSet")
            .field("pool", &self.pool.id())
            .field("tracked", &self.len())
            .finish_non_exhaustive()
    }
}
