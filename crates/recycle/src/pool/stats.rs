//! Statistics tracking for object pools

use core::sync::atomic::{AtomicU64, Ordering};

/// Counters for pool operations
///
/// All counters use relaxed ordering; they are observational and never used
/// for synchronization.
#[derive(Debug, Default)]
pub struct PoolStats {
    borrows: AtomicU64,
    hits: AtomicU64,
    creations: AtomicU64,
    releases: AtomicU64,
    discards: AtomicU64,
}

impl PoolStats {
    /// Record a borrow request
    pub(crate) fn record_borrow(&self) {
        self.borrows.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a borrow served from idle objects
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record object construction
    pub(crate) fn record_creation(&self) {
        self.creations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record object return
    pub(crate) fn record_release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }

    /// Record idle objects dropped by `clear`
    pub(crate) fn record_discards(&self, count: usize) {
        self.discards.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> PoolStatsSnapshot {
        PoolStatsSnapshot {
            borrows: self.borrows.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            creations: self.creations.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            discards: self.discards.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`PoolStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStatsSnapshot {
    /// Total borrow requests, including `try_borrow` misses
    pub borrows: u64,
    /// Borrows served by a recycled object
    pub hits: u64,
    /// Objects built by the constructor, pre-warming included
    pub creations: u64,
    /// Objects handed back to the pool
    pub releases: u64,
    /// Idle objects dropped by `clear`
    pub discards: u64,
}

impl PoolStatsSnapshot {
    /// Fraction of borrows served by recycled objects
    pub fn hit_rate(&self) -> f64 {
        if self.borrows == 0 {
            0.0
        } else {
            self.hits as f64 / self.borrows as f64
        }
    }
}
