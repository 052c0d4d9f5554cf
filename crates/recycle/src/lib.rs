//! # nebula-recycle
//!
//! Object recycling for Nebula hot paths.
//!
//! This crate reduces allocator pressure by reusing heap objects and
//! backing storage instead of reallocating them:
//! - Type-safe, lock-free object pools
//! - Lists that keep their storage (and element objects) across resets
//! - Tracked borrow sets that release everything one operation borrowed in
//!   a single call
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_recycle::prelude::*;
//!
//! let lists = TrackingListPool::new();
//! let buffers = ObjectPool::with_constructor(|| Vec::<u8>::with_capacity(4096));
//!
//! let set = TrackedBorrowSet::new(&buffers, &lists);
//! let mut buf = set.borrow();
//! buf.clear(); // recycled objects may be dirty
//! buf.extend_from_slice(b"payload");
//! drop(buf);
//!
//! set.release_all();
//! assert_eq!(buffers.idle(), 1);
//! ```
//!
//! ## Dirty reuse
//!
//! Nothing here clears objects implicitly. A borrowed object may hold data
//! from its previous use; callers reset the fields they rely on. The one
//! clearing operation is [`ReusableValues::hard_reset_and_resize_to`].
//!
//! ## Architecture
//!
//! nebula-recycle follows the Nebula ecosystem patterns:
//! - Standalone error handling via [`error`] module
//! - Structured logging via `tracing`
//! - Shared pools are passed by reference, never held in globals
//!
//! [`ReusableValues::hard_reset_and_resize_to`]: list::ReusableValues::hard_reset_and_resize_to

#![cfg_attr(docsrs, feature(doc_cfg))]
// Pools and tracked sets hand out raw-pointer-backed guards; every unsafe
// block carries a SAFETY note.
#![allow(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod list;
pub mod pool;
pub mod tracked;

pub use crate::config::PoolConfig;
pub use crate::error::{RecycleError, RecycleResult};

pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::config::PoolConfig;
    pub use crate::error::{RecycleError, RecycleResult};
    pub use crate::list::{ReusableList, ReusableValues};
    pub use crate::pool::{ObjectPool, PoolId, PoolStatsSnapshot, Pooled};
    pub use crate::tracked::{TrackedBorrowSet, TrackedHandle, TrackedRef, TrackingListPool};
}
