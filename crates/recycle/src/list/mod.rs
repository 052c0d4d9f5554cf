//! Lists that keep their storage between use cycles
//!
//! - `ReusableList`: boxed elements; the element objects themselves are
//!   reused after a reset (dirty)
//! - `ReusableValues`: plain values; supports a hard reset that clears every
//!   slot

mod reusable;
mod values;

pub use reusable::ReusableList;
pub use values::ReusableValues;
