#![forbid(unsafe_code)]
//! seqflow: allocation-minimizing sequence combinators.
//!
//! Pipelines are built from a host container with [`SequenceExt`] (or
//! [`AsyncSequenceExt`] after [`as_async`]) and finished by exactly one
//! reducer from [`Reduce`] or [`AsyncReduce`]. Each combinator is a concrete
//! generic type, so a pipeline is a single monomorphized value with no boxing.
//!
//! ```
//! use seqflow::prelude::*;
//!
//! let data = [1, 2, 3, 4];
//! let big_squares = (&data).select(|x| x * x).filter(|x| *x > 5);
//! assert_eq!(big_squares.to_vec(), Ok(vec![9, 16]));
//! ```

pub use seqflow_async;
pub use seqflow_core;
pub use seqflow_exec;
pub use seqflow_mem;
pub use seqflow_operators;

pub use seqflow_async::{as_async, from_stream, AsyncReduce, AsyncSequenceExt, IntoAsync};
pub use seqflow_core::{Error, Result};
pub use seqflow_exec::Reduce;
pub use seqflow_operators::SequenceExt;

pub mod prelude {
    pub use seqflow_async::{
        as_async, from_stream, AsyncCursor, AsyncReduce, AsyncSequence, AsyncSequenceExt,
        CancellationToken, IntoAsync,
    };
    pub use seqflow_core::prelude::*;
    pub use seqflow_exec::Reduce;
    pub use seqflow_mem::{BufferPool, GrowableBuffer, PooledBuf, Set};
    pub use seqflow_operators::SequenceExt;
}
