//! Convenient re-exports for downstream crates.

pub use crate::comparer::{by_key, from_fns, ByKey, DefaultComparer, EqualityComparer, FnComparer};
pub use crate::config::BufferConfig;
pub use crate::error::{Error, Result};
pub use crate::sequence::{Cursor, IndexedSequence, IntoCursor, Sequence};
pub use crate::source::{empty, from_iterable, once, range, repeat, try_range};
pub use crate::window::Window;
