//! `SkipTake`: the `skip`/`take` partition of a sequence.
//!
//! A chain of `skip` and `take` calls collapses into a single [`Window`] over
//! the underlying source, so `x.skip(a).take(b).skip(c)` walks `x` once. Negative
//! counts clamp to zero. Skipped items are passed over with
//! [`Cursor::advance_by`], which sources with random access answer in O(1).

use seqflow_core::{check_index, Cursor, IndexedSequence, IntoCursor, Result, Sequence, Window};

#[derive(Debug, Clone)]
pub struct SkipTake<S> {
    source: S,
    window: Window,
}

impl<S> SkipTake<S> {
    /// The whole of `source`; narrow it with [`skip`](Self::skip) and
    /// [`take`](Self::take).
    pub fn new(source: S) -> Self {
        Self {
            source,
            window: Window::full(None),
        }
    }

    pub fn skip(self, count: isize) -> Self {
        Self {
            source: self.source,
            window: self.window.skip(count),
        }
    }

    pub fn take(self, count: isize) -> Self {
        Self {
            source: self.source,
            window: self.window.take(count),
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    fn start_cursor<C>(&self, inner: C) -> SkipTakeCursor<C> {
        SkipTakeCursor {
            inner,
            pending_skip: self.window.start,
            remaining: self.window.len,
        }
    }
}

pub struct SkipTakeCursor<C> {
    inner: C,
    pending_skip: usize,
    // `None` means "until the source ends".
    remaining: Option<usize>,
}

impl<C: Cursor> SkipTakeCursor<C> {
    /// Returns `false` if the source ran out while skipping.
    fn skip_prefix(&mut self) -> bool {
        if self.pending_skip == 0 {
            return true;
        }
        let wanted = self.pending_skip;
        self.pending_skip = 0;
        if self.inner.advance_by(wanted) < wanted {
            self.remaining = Some(0);
            return false;
        }
        true
    }
}

impl<C: Cursor> Cursor for SkipTakeCursor<C> {
    type Item = C::Item;

    fn advance(&mut self) -> bool {
        if !self.skip_prefix() {
            return false;
        }
        match self.remaining {
            // Never pull past the window.
            Some(0) => false,
            Some(n) => {
                if self.inner.advance() {
                    self.remaining = Some(n - 1);
                    true
                } else {
                    self.remaining = Some(0);
                    false
                }
            }
            None => self.inner.advance(),
        }
    }

    fn current(&self) -> &C::Item {
        self.inner.current()
    }

    fn advance_by(&mut self, n: usize) -> usize {
        if !self.skip_prefix() {
            return 0;
        }
        let wanted = self.remaining.map_or(n, |r| r.min(n));
        let skipped = self.inner.advance_by(wanted);
        if let Some(r) = self.remaining.as_mut() {
            *r = if skipped < wanted { 0 } else { *r - skipped };
        }
        skipped
    }
}

impl<S: Sequence> Sequence for SkipTake<S> {
    type Item = S::Item;
    type Cursor<'s> = SkipTakeCursor<S::Cursor<'s>> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.start_cursor(self.source.cursor())
    }

    fn exact_count(&self) -> Option<usize> {
        let available = self.source.exact_count()?.saturating_sub(self.window.start);
        Some(self.window.len.map_or(available, |len| len.min(available)))
    }
}

impl<S: IndexedSequence> IndexedSequence for SkipTake<S> {
    fn len(&self) -> usize {
        let available = self.source.len().saturating_sub(self.window.start);
        self.window.len.map_or(available, |len| len.min(available))
    }

    fn get_item(&self, index: usize) -> Result<S::Item> {
        check_index(index, IndexedSequence::len(self))?;
        self.source.get_item(self.window.source_index(index))
    }
}

impl<S: IntoCursor> IntoCursor for SkipTake<S> {
    type Item = S::Item;
    type IntoCursor = SkipTakeCursor<S::IntoCursor>;

    fn into_cursor(self) -> Self::IntoCursor {
        let window = self.window;
        SkipTakeCursor {
            inner: self.source.into_cursor(),
            pending_skip: window.start,
            remaining: window.len,
        }
    }
}
