//! `Filter` keeps the items a predicate accepts; `FilterAt` also passes the
//! item's position in the upstream sequence.

use seqflow_core::{Cursor, IntoCursor, Sequence};

#[derive(Debug, Clone)]
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S: Sequence, P: Fn(&S::Item) -> bool> Filter<S, P> {
    /// `filter(a).filter(b)` becomes a single `filter(a && b)`. `b` is only
    /// consulted for items `a` accepted.
    pub fn filter<Q>(self, next: Q) -> Filter<S, impl Fn(&S::Item) -> bool>
    where
        Q: Fn(&S::Item) -> bool,
    {
        let first = self.predicate;
        Filter::new(self.source, move |item: &S::Item| first(item) && next(item))
    }
}

pub struct FilterCursor<C, P> {
    inner: C,
    predicate: P,
}

impl<C: Cursor, P: Fn(&C::Item) -> bool> Cursor for FilterCursor<C, P> {
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        while self.inner.advance() {
            if (self.predicate)(self.inner.current()) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn current(&self) -> &C::Item {
        self.inner.current()
    }
}

impl<S: Sequence, P: Fn(&S::Item) -> bool> Sequence for Filter<S, P> {
    type Item = S::Item;
    type Cursor<'s> = FilterCursor<S::Cursor<'s>, &'s P> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        FilterCursor {
            inner: self.source.cursor(),
            predicate: &self.predicate,
        }
    }
}

impl<S: IntoCursor, P: Fn(&S::Item) -> bool> IntoCursor for Filter<S, P> {
    type Item = S::Item;
    type IntoCursor = FilterCursor<S::IntoCursor, P>;

    fn into_cursor(self) -> Self::IntoCursor {
        FilterCursor {
            inner: self.source.into_cursor(),
            predicate: self.predicate,
        }
    }
}

// ----- index-aware -----

#[derive(Debug, Clone)]
pub struct FilterAt<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> FilterAt<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

pub struct FilterAtCursor<C, P> {
    inner: C,
    predicate: P,
    // Upstream position of the next item to test.
    index: usize,
}

impl<C: Cursor, P: Fn(&C::Item, usize) -> bool> Cursor for FilterAtCursor<C, P> {
    type Item = C::Item;

    fn advance(&mut self) -> bool {
        while self.inner.advance() {
            let index = self.index;
            self.index += 1;
            if (self.predicate)(self.inner.current(), index) {
                return true;
            }
        }
        false
    }

    fn current(&self) -> &C::Item {
        self.inner.current()
    }
}

impl<S: Sequence, P: Fn(&S::Item, usize) -> bool> Sequence for FilterAt<S, P> {
    type Item = S::Item;
    type Cursor<'s> = FilterAtCursor<S::Cursor<'s>, &'s P> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        FilterAtCursor {
            inner: self.source.cursor(),
            predicate: &self.predicate,
            index: 0,
        }
    }
}

impl<S: IntoCursor, P: Fn(&S::Item, usize) -> bool> IntoCursor for FilterAt<S, P> {
    type Item = S::Item;
    type IntoCursor = FilterAtCursor<S::IntoCursor, P>;

    fn into_cursor(self) -> Self::IntoCursor {
        FilterAtCursor {
            inner: self.source.into_cursor(),
            predicate: self.predicate,
            index: 0,
        }
    }
}
