//! Object pooling for memory reuse
//!
//! - `ObjectPool`: thread-safe, lock-free pool of boxed objects
//! - `Pooled`: RAII guard returning its object on drop
//! - `PoolStats`: relaxed counters recorded by every pool

mod object_pool;
mod stats;

pub use object_pool::{Constructor, ObjectPool, PoolId, Pooled};
pub use stats::{PoolStats, PoolStatsSnapshot};
