#![forbid(unsafe_code)]
//! seqflow-operators: combinators over [`Sequence`](seqflow_core::Sequence).
//!
//! Design intent:
//! - Every combinator is a plain value wrapping its upstream sequence and its
//!   function by value; the composed type is known statically, so nothing is
//!   boxed or dispatched dynamically.
//! - Cursors borrow the combinator's function when created from `&self` and
//!   own it when created through `IntoCursor`.
//! - Adjacent compatible combinators fuse at construction
//!   (`filter.filter`, `select.select`, `distinct.distinct`, `skip`/`take`
//!   chains), keeping the nested evaluation order.
//! - Only `Distinct` allocates per traversal (its dedup [`Set`](seqflow_mem::Set)).

pub mod distinct;
pub mod ext;
pub mod filter;
pub mod partition;
pub mod select;
pub mod select_many;

pub use distinct::{Distinct, DistinctCursor};
pub use ext::SequenceExt;
pub use filter::{Filter, FilterAt, FilterAtCursor, FilterCursor};
pub use partition::{SkipTake, SkipTakeCursor};
pub use select::{Select, SelectAt, SelectAtCursor, SelectCursor};
pub use select_many::{SelectMany, SelectManyCursor};
