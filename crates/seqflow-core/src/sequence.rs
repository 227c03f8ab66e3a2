//! The Sequence / Cursor capability pair.
//!
//! A [`Sequence`] holds no iteration state; `cursor(&self)` may be called any
//! number of times and each call starts an independent traversal. A
//! [`Cursor`] is mutable, single-use, and owns whatever upstream cursors it
//! wraps. Releasing a cursor is dropping it, so every exit path (exhaustion,
//! early return, unwinding) releases exactly once.

use crate::error::{Error, Result};

/// Panic message for reading `current()` without a successful `advance()`.
pub const NOT_POSITIONED: &str = "Cursor::current called without a successful advance";

/// Mutable traversal state produced by a [`Sequence`].
///
/// Invariants:
/// - `current()` is only valid after `advance()` returned `true`, and only
///   until the next `advance()` or drop. Calling it otherwise is a logic error
///   and may panic.
/// - Once `advance()` returns `false` it keeps returning `false`.
pub trait Cursor {
    type Item;

    /// Move to the next item. Returns `true` if `current()` is now valid.
    fn advance(&mut self) -> bool;

    /// The item at the current position.
    fn current(&self) -> &Self::Item;

    /// Advance past up to `n` items without observing them, returning how
    /// many were actually skipped. Cursors with random access override this
    /// to seek in O(1). Callers must not rely on `current()` until the next
    /// successful `advance()`.
    fn advance_by(&mut self, n: usize) -> usize {
        let mut skipped = 0;
        while skipped < n && self.advance() {
            skipped += 1;
        }
        skipped
    }
}

/// Immutable description of an iteration.
///
/// The cursor type is a generic associated type so that cursors may borrow
/// the sequence (and the functions stored in it) instead of cloning them.
pub trait Sequence {
    type Item;
    type Cursor<'s>: Cursor<Item = Self::Item>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_>;

    /// Exact number of items, when known without traversal. Used for
    /// pre-sizing and for constant-time `count`.
    fn exact_count(&self) -> Option<usize> {
        None
    }

    /// Native membership test under natural equality, if the underlying
    /// container has one faster than a scan. `None` means "not available".
    fn native_contains(&self, _value: &Self::Item) -> Option<bool>
    where
        Self::Item: PartialEq,
    {
        None
    }

    /// Bulk-append every item to `out`. Returns `false` (and leaves `out`
    /// untouched) when the sequence has no bulk copy capability.
    fn copy_into(&self, _out: &mut Vec<Self::Item>) -> bool
    where
        Self::Item: Clone,
    {
        false
    }
}

/// Consume a value into an owning cursor.
///
/// `SelectMany` selectors return `IntoCursor` values: the produced inner
/// sequence lives inside the outer cursor, so it must be turned into a cursor
/// that does not borrow from a temporary.
pub trait IntoCursor {
    type Item;
    type IntoCursor: Cursor<Item = Self::Item>;

    fn into_cursor(self) -> Self::IntoCursor;
}

/// A sequence with a known length and random access.
pub trait IndexedSequence: Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produce the item at `index`, failing `ArgumentOutOfRange` past the end.
    fn get_item(&self, index: usize) -> Result<Self::Item>;

    /// Replace the item at `index`. Read-only views (projections, windows,
    /// generators) keep the default and fail `NotSupported`.
    fn set_item(&mut self, _index: usize, _item: Self::Item) -> Result<()> {
        Err(Error::NotSupported("set on a read-only sequence"))
    }
}

/// Fail `ArgumentOutOfRange` unless `index < len`.
pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::ArgumentOutOfRange { index, len })
    }
}

// ----- blanket impls -----

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Cursor<'s> = S::Cursor<'s> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }

    fn exact_count(&self) -> Option<usize> {
        (**self).exact_count()
    }

    fn native_contains(&self, value: &Self::Item) -> Option<bool>
    where
        Self::Item: PartialEq,
    {
        (**self).native_contains(value)
    }

    fn copy_into(&self, out: &mut Vec<Self::Item>) -> bool
    where
        Self::Item: Clone,
    {
        (**self).copy_into(out)
    }
}

impl<S: IndexedSequence + ?Sized> IndexedSequence for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get_item(&self, index: usize) -> Result<Self::Item> {
        (**self).get_item(index)
    }
}

impl<'s, S: Sequence + ?Sized> IntoCursor for &'s S {
    type Item = S::Item;
    type IntoCursor = S::Cursor<'s>;

    fn into_cursor(self) -> Self::IntoCursor {
        self.cursor()
    }
}
