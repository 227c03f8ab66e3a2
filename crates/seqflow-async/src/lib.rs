#![forbid(unsafe_code)]
//! seqflow-async: the sequence/cursor contracts with a suspension point per
//! advance.
//!
//! - [`AsyncCursor::advance`] is an `.await` point and fails `Cancelled` once
//!   the traversal's [`CancellationToken`](tokio_util::sync::CancellationToken)
//!   fires. The token is checked for every produced element.
//! - [`AsyncCursor::release`] is awaitable. Every reducer in [`reduce`]
//!   awaits it exactly once on every exit path: exhaustion, short-circuit,
//!   error and cancellation.
//! - Synchronous sequences join in through [`as_async`]; `futures` streams
//!   through [`from_stream`].

pub mod bridge;
pub mod combinators;
pub mod reduce;
pub mod sequence;

pub use bridge::{as_async, from_stream, AsAsync, FromStream, IntoAsync};
pub use combinators::{AsyncFilter, AsyncSelect, AsyncSelectAsync, AsyncSequenceExt};
pub use reduce::AsyncReduce;
pub use sequence::{AsyncCursor, AsyncSequence};
pub use tokio_util::sync::CancellationToken;
