#![forbid(unsafe_code)]
//! seqflow-mem: the low-level storage primitives behind terminal
//! materialization.
//!
//! - [`GrowableBuffer`] collects an unknown number of items with O(log N)
//!   allocations and at most one final copy.
//! - [`Set`] is the dedup store used by `Distinct`.
//! - [`BufferPool`] hands out reusable `Vec` storage; both primitives can
//!   borrow their bookkeeping storage from a pool and return it on drop.
//!
//! All types here are single-owner and scoped to one terminal operation,
//! except the pool itself, which may be shared.

pub mod builder;
pub mod pool;
pub mod set;
pub mod tracking;

pub use builder::GrowableBuffer;
pub use pool::{BufferPool, PooledBuf};
pub use set::Set;
pub use tracking::PoolTracker;
