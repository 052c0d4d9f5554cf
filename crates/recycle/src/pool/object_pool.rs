//! Thread-safe recycling pool
//!
//! Objects live in boxes so their addresses stay stable while they move
//! between the pool and borrowers. The idle store is a lock-free
//! `SegQueue`; borrowing and releasing never take a lock.
//!
//! Objects come back dirty. The pool never resets them: callers clear
//! whatever state they are about to rely on.

use core::fmt;
use core::mem::ManuallyDrop;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU64, Ordering};

use crossbeam_queue::SegQueue;
use tracing::debug;

use super::PoolStats;
use crate::config::PoolConfig;
use crate::error::RecycleResult;

/// Builds a fresh object when the pool has no idle one
pub type Constructor<T> = Box<dyn Fn() -> T + Send + Sync>;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an [`ObjectPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(u64);

impl PoolId {
    fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

/// Type-safe pool of recyclable objects
///
/// # Example
/// ```
/// use nebula_recycle::pool::ObjectPool;
///
/// let pool = ObjectPool::with_constructor(|| Vec::<u8>::with_capacity(1024));
///
/// let mut buf = pool.borrow();
/// buf.clear();
/// buf.extend_from_slice(b"hello");
/// pool.release(buf);
///
/// // Same allocation comes back, still holding the old bytes.
/// let buf = pool.borrow();
/// assert_eq!(&buf[..], b"hello");
/// assert_eq!(buf.capacity(), 1024);
/// ```
pub struct ObjectPool<T> {
    id: PoolId,
    idle: SegQueue<Box<T>>,
    constructor: Constructor<T>,
    config: PoolConfig,
    stats: PoolStats,
}

impl<T: Default + Send + 'static> ObjectPool<T> {
    /// Create a pool that builds new objects with `T::default()`
    pub fn new() -> Self {
        Self::with_constructor(T::default)
    }
}

impl<T: Default + Send + 'static> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> ObjectPool<T> {
    /// Create a pool that builds new objects with `constructor`
    pub fn with_constructor<F>(constructor: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::build(PoolConfig::default(), Box::new(constructor))
    }

    /// Create a pool with custom configuration
    ///
    /// Pass `T::default` as `constructor` to keep default construction.
    pub fn with_config<F>(config: PoolConfig, constructor: F) -> RecycleResult<Self>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self::build(config, Box::new(constructor)))
    }

    fn build(config: PoolConfig, constructor: Constructor<T>) -> Self {
        let pool = Self {
            id: PoolId::next(),
            idle: SegQueue::new(),
            constructor,
            config,
            stats: PoolStats::default(),
        };

        for _ in 0..pool.config.pre_warm {
            let obj = pool.construct();
            pool.idle.push(obj);
        }

        debug!(
            pool = %pool.config.name,
            id = %pool.id,
            pre_warm = pool.config.pre_warm,
            "object pool created"
        );

        pool
    }

    fn construct(&self) -> Box<T> {
        self.stats.record_creation();
        Box::new((self.constructor)())
    }

    /// Get an object, possibly dirty
    ///
    /// Pops an idle object when one is available and constructs a new one
    /// otherwise. Never fails.
    pub fn borrow(&self) -> Box<T> {
        self.stats.record_borrow();

        match self.idle.pop() {
            Some(obj) => {
                self.stats.record_hit();
                obj
            }
            None => self.construct(),
        }
    }

    /// Get an idle object without constructing a new one
    pub fn try_borrow(&self) -> Option<Box<T>> {
        self.stats.record_borrow();

        let obj = self.idle.pop()?;
        self.stats.record_hit();
        Some(obj)
    }

    /// Get an object wrapped in a guard that releases it on drop
    pub fn borrow_guarded(&self) -> Pooled<'_, T> {
        Pooled {
            value: ManuallyDrop::new(self.borrow()),
            pool: self,
        }
    }

    /// Return an object for future reuse
    ///
    /// The object is stored as-is; nothing is cleared.
    pub fn release(&self, obj: Box<T>) {
        self.stats.record_release();
        self.idle.push(obj);
    }

    /// Drop every idle object, returning how many were dropped
    pub fn clear(&self) -> usize {
        let mut dropped = 0;
        while self.idle.pop().is_some() {
            dropped += 1;
        }

        self.stats.record_discards(dropped);
        debug!(pool = %self.config.name, dropped, "object pool cleared");

        dropped
    }
}

impl<T> ObjectPool<T> {
    /// Pool identity
    #[inline]
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Pool name from its configuration
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Number of idle objects
    ///
    /// Racy under concurrent use; exact once borrowers are quiescent.
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    /// Pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("id", &self.id)
            .field("name", &self.config.name)
            .field("idle", &self.idle.len())
            .finish_non_exhaustive()
    }
}

/// RAII guard for a pooled object
///
/// Releases the object back to its pool when dropped.
pub struct Pooled<'a, T: Send + 'static> {
    value: ManuallyDrop<Box<T>>,
    pool: &'a ObjectPool<T>,
}

impl<'a, T: Send + 'static> Pooled<'a, T> {
    /// Detach the object from the pool (won't be returned)
    pub fn detach(self) -> Box<T> {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: value is initialized in `borrow_guarded`; `this` is never
        // dropped, so Drop cannot take it a second time.
        unsafe { ManuallyDrop::take(&mut this.value) }
    }

    /// Pool the object came from
    pub fn pool(&self) -> &'a ObjectPool<T> {
        self.pool
    }
}

impl<T: Send + 'static> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: Send + 'static> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}

impl<T: Send + 'static> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        // SAFETY: value is initialized and Drop runs once; a detached guard
        // is wrapped in ManuallyDrop and never reaches this point.
        let obj = unsafe { ManuallyDrop::take(&mut self.value) };
        self.pool.release(obj);
    }
}

impl<T: Send + fmt::Debug + 'static> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("value", &**self)
            .field("pool", &self.pool.id)
            .finish()
    }
}
