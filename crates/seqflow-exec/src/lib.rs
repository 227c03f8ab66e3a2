#![forbid(unsafe_code)]
//! seqflow-exec: terminal reducers.
//!
//! A reducer obtains one cursor, drives it to a result and drops it, so the
//! cursor is released on every exit path: exhaustion, short-circuit, error or
//! unwinding. Reducers prefer a sequence's optional capabilities
//! (`exact_count`, `native_contains`, `copy_into`) over traversal.
//!
//! The free functions in each module are the implementation; [`Reduce`]
//! exposes them as methods on every sequence.

pub mod aggregate;
pub mod conversion;
pub mod element;
pub mod metrics;
pub mod quantifier;
pub mod reduce;

pub use reduce::Reduce;
