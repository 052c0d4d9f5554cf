//! Tracked borrowing for bulk release
//!
//! A `TrackedBorrowSet` borrows objects from one `ObjectPool` on behalf of a
//! single logical operation, possibly from many threads, and returns all of
//! them in one `release_all` call. Its bookkeeping list is itself recycled
//! through a `TrackingListPool` shared by sets of every object type.

mod handle;
mod set;

pub use handle::{TrackedHandle, TrackedRef};
pub use set::{TrackedBorrowSet, TrackingListPool};
