#![forbid(unsafe_code)]
//! seqflow-core: capability contracts and shared vocabulary for seqflow.
//!
//! Everything else in the workspace is written against the two traits defined
//! in [`sequence`]: a [`Sequence`] is an immutable description of an
//! iteration, a [`Cursor`] is the single-use traversal state it produces.
//! Combinators (`seqflow-operators`) wrap sequences by value; terminal
//! reducers (`seqflow-exec`) drive cursors to a result.
//!
//! This crate does no allocation on the iteration path and has no async
//! runtime dependency.

pub mod comparer;
pub mod config;
pub mod error;
pub mod prelude;
pub mod sequence;
pub mod source;
pub mod window;

pub use comparer::{by_key, from_fns, ByKey, DefaultComparer, EqualityComparer, FnComparer};
pub use config::BufferConfig;
pub use error::{Error, Result};
pub use sequence::{check_index, Cursor, IndexedSequence, IntoCursor, Sequence, NOT_POSITIONED};
pub use source::{empty, from_iterable, once, range, repeat, try_range};
pub use window::Window;
