//! Type-erased handles and typed borrow guards

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;

use crate::pool::PoolId;

/// Erased pointer to an object a tracked set borrowed
///
/// Erasure lets one tracking-list pool serve sets of every object type. The
/// handle is inert: only the set that created it turns it back into a box.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TrackedHandle {
    ptr: NonNull<()>,
    origin: PoolId,
}

// SAFETY: TrackedHandle is a plain address plus an id. Moving it between
// threads does not touch the pointee; dereferencing requires `unsafe` and
// the owning set's guarantees.
unsafe impl Send for TrackedHandle {}

// SAFETY: shared access exposes only the address and id, see Send above.
unsafe impl Sync for TrackedHandle {}

impl TrackedHandle {
    pub(crate) fn new<T>(ptr: NonNull<T>, origin: PoolId) -> Self {
        Self {
            ptr: ptr.cast(),
            origin,
        }
    }

    /// Pool the object was borrowed from
    pub fn origin(&self) -> PoolId {
        self.origin
    }

    /// Untyped address of the object
    pub fn as_ptr(&self) -> NonNull<()> {
        self.ptr
    }

    /// View the object as `T`
    ///
    /// # Safety
    ///
    /// `T` must be the object type of the pool identified by
    /// [`origin`](Self::origin), the owning set must not have released the
    /// object yet, and no `&mut T` to it may be in use for `'a`.
    pub unsafe fn cast_ref<'a, T>(&self) -> &'a T {
        // SAFETY: upheld by the caller per the contract above.
        unsafe { self.ptr.cast::<T>().as_ref() }
    }

    /// Rebuild the owning box
    ///
    /// # Safety
    ///
    /// `T` must match the origin pool, and this must be the only
    /// reconstruction of the box.
    pub(crate) unsafe fn into_box<T>(self) -> Box<T> {
        // SAFETY: the pointer came from Box::leak of a Box<T> and is
        // reconstructed once, as the caller guarantees.
        unsafe { Box::from_raw(self.ptr.cast::<T>().as_ptr()) }
    }
}

impl fmt::Debug for TrackedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedHandle")
            .field("ptr", &self.ptr)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Exclusive access to an object borrowed through a tracked set
///
/// Dropping the guard does not release the object; the set releases every
/// object it tracks at once. The guard borrows the set, so it cannot outlive
/// that release.
pub struct TrackedRef<'a, T> {
    ptr: NonNull<T>,
    _set: PhantomData<&'a mut T>,
}

impl<'a, T> TrackedRef<'a, T> {
    pub(crate) fn new(ptr: NonNull<T>) -> Self {
        Self {
            ptr,
            _set: PhantomData,
        }
    }

    /// Turn the guard into a plain mutable reference
    pub fn into_mut(self) -> &'a mut T {
        // SAFETY: ptr points to a live boxed T owned by the set for 'a and
        // handed out to exactly one guard.
        unsafe { &mut *self.ptr.as_ptr() }
    }
}

impl<T> Deref for TrackedRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        // SAFETY: see into_mut; shared access through a unique guard.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T> DerefMut for TrackedRef<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: see into_mut; &mut self proves the guard is not aliased.
        unsafe { self.ptr.as_mut() }
    }
}

// SAFETY: TrackedRef behaves like &'a mut T, which is Send when T: Send.
unsafe impl<T: Send> Send for TrackedRef<'_, T> {}

// SAFETY: TrackedRef behaves like &'a mut T, which is Sync when T: Sync.
unsafe impl<T: Sync> Sync for TrackedRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for TrackedRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
