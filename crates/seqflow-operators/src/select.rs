//! `Select` projects each item through a selector; `SelectAt` also passes the
//! item's position.
//!
//! Projections preserve the upstream count and random access, so `Select`
//! forwards `exact_count` and is indexed whenever its source is. Items skipped
//! with `advance_by` are never projected.

use seqflow_core::{Cursor, IndexedSequence, IntoCursor, Result, Sequence, NOT_POSITIONED};

#[derive(Debug, Clone)]
pub struct Select<S, F> {
    source: S,
    selector: F,
}

impl<S, F> Select<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

impl<S, F, U> Select<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> U,
{
    /// `select(f).select(g)` becomes a single `select(g(f(x)))`.
    pub fn select<G, V>(self, next: G) -> Select<S, impl Fn(&S::Item) -> V>
    where
        G: Fn(&U) -> V,
    {
        let first = self.selector;
        Select::new(self.source, move |item: &S::Item| next(&first(item)))
    }
}

pub struct SelectCursor<C, F, U> {
    inner: C,
    selector: F,
    current: Option<U>,
}

impl<C, F, U> Cursor for SelectCursor<C, F, U>
where
    C: Cursor,
    F: Fn(&C::Item) -> U,
{
    type Item = U;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.inner.advance() {
            self.current = Some((self.selector)(self.inner.current()));
            true
        } else {
            self.current = None;
            false
        }
    }

    #[inline]
    fn current(&self) -> &U {
        self.current.as_ref().expect(NOT_POSITIONED)
    }

    fn advance_by(&mut self, n: usize) -> usize {
        self.current = None;
        self.inner.advance_by(n)
    }
}

impl<S, F, U> Sequence for Select<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> U,
{
    type Item = U;
    type Cursor<'s> = SelectCursor<S::Cursor<'s>, &'s F, U> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SelectCursor {
            inner: self.source.cursor(),
            selector: &self.selector,
            current: None,
        }
    }

    fn exact_count(&self) -> Option<usize> {
        self.source.exact_count()
    }
}

impl<S, F, U> IndexedSequence for Select<S, F>
where
    S: IndexedSequence,
    F: Fn(&S::Item) -> U,
{
    fn len(&self) -> usize {
        self.source.len()
    }

    fn get_item(&self, index: usize) -> Result<U> {
        let item = self.source.get_item(index)?;
        Ok((self.selector)(&item))
    }
}

impl<S, F, U> IntoCursor for Select<S, F>
where
    S: IntoCursor,
    F: Fn(&S::Item) -> U,
{
    type Item = U;
    type IntoCursor = SelectCursor<S::IntoCursor, F, U>;

    fn into_cursor(self) -> Self::IntoCursor {
        SelectCursor {
            inner: self.source.into_cursor(),
            selector: self.selector,
            current: None,
        }
    }
}

// ----- index-aware -----

#[derive(Debug, Clone)]
pub struct SelectAt<S, F> {
    source: S,
    selector: F,
}

impl<S, F> SelectAt<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

pub struct SelectAtCursor<C, F, U> {
    inner: C,
    selector: F,
    index: usize,
    current: Option<U>,
}

impl<C, F, U> Cursor for SelectAtCursor<C, F, U>
where
    C: Cursor,
    F: Fn(&C::Item, usize) -> U,
{
    type Item = U;

    fn advance(&mut self) -> bool {
        if self.inner.advance() {
            self.current = Some((self.selector)(self.inner.current(), self.index));
            self.index += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn current(&self) -> &U {
        self.current.as_ref().expect(NOT_POSITIONED)
    }

    fn advance_by(&mut self, n: usize) -> usize {
        self.current = None;
        let skipped = self.inner.advance_by(n);
        self.index += skipped;
        skipped
    }
}

impl<S, F, U> Sequence for SelectAt<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize) -> U,
{
    type Item = U;
    type Cursor<'s> = SelectAtCursor<S::Cursor<'s>, &'s F, U> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SelectAtCursor {
            inner: self.source.cursor(),
            selector: &self.selector,
            index: 0,
            current: None,
        }
    }

    fn exact_count(&self) -> Option<usize> {
        self.source.exact_count()
    }
}

impl<S, F, U> IndexedSequence for SelectAt<S, F>
where
    S: IndexedSequence,
    F: Fn(&S::Item, usize) -> U,
{
    fn len(&self) -> usize {
        self.source.len()
    }

    fn get_item(&self, index: usize) -> Result<U> {
        let item = self.source.get_item(index)?;
        Ok((self.selector)(&item, index))
    }
}

impl<S, F, U> IntoCursor for SelectAt<S, F>
where
    S: IntoCursor,
    F: Fn(&S::Item, usize) -> U,
{
    type Item = U;
    type IntoCursor = SelectAtCursor<S::IntoCursor, F, U>;

    fn into_cursor(self) -> Self::IntoCursor {
        SelectAtCursor {
            inner: self.source.into_cursor(),
            selector: self.selector,
            index: 0,
            current: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use seqflow_core::Error;

    use super::*;
    use crate::test_util::{drain, drain_cursor};

    #[test]
    fn projects_and_keeps_count() {
        let data = vec![1, 2, 3];
        let squares = Select::new(&data, |x: &i32| x * x);
        assert_eq!(drain(&squares), vec![1, 4, 9]);
        assert_eq!(squares.exact_count(), Some(3));
    }

    #[test]
    fn fused_select_composes_in_order() {
        let log = RefCell::new(Vec::new());
        let data = [1, 2];
        let fused = Select::new(&data, |x: &i32| {
            log.borrow_mut().push(format!("f{x}"));
            x + 1
        })
        .select(|x: &i32| {
            log.borrow_mut().push(format!("g{x}"));
            x.to_string()
        });

        assert_eq!(drain(&fused), vec!["2".to_string(), "3".to_string()]);
        assert_eq!(*log.borrow(), vec!["f1", "g2", "f2", "g3"]);
    }

    #[test]
    fn skipped_items_are_not_projected() {
        let calls = Cell::new(0);
        let data: Vec<i32> = (0..10).collect();
        let s = Select::new(&data, |x: &i32| {
            calls.set(calls.get() + 1);
            *x
        });
        let mut c = s.cursor();
        assert_eq!(c.advance_by(7), 7);
        assert!(c.advance());
        assert_eq!(*c.current(), 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn indexed_projection_is_read_only() {
        let data = vec![10, 20, 30];
        let mut s = Select::new(&data, |x: &i32| x / 10);
        assert_eq!(s.len(), 3);
        assert_eq!(s.get_item(2), Ok(3));
        assert_eq!(
            s.get_item(3),
            Err(Error::ArgumentOutOfRange { index: 3, len: 3 })
        );
        assert!(matches!(s.set_item(0, 1), Err(Error::NotSupported(_))));
    }

    #[test]
    fn select_at_passes_positions() {
        let data = ["x", "y", "z"];
        let s = SelectAt::new(&data, |v: &&str, i: usize| format!("{i}{v}"));
        assert_eq!(drain(&s), vec!["0x", "1y", "2z"]);
        assert_eq!(s.get_item(1), Ok("1y".to_string()));

        let mut c = s.cursor();
        c.advance_by(2);
        assert!(c.advance());
        assert_eq!(c.current(), "2z");
    }

    #[test]
    fn owned_select_cursor() {
        let s = Select::new(vec![1, 2, 3], |x: &i32| x * 10);
        assert_eq!(drain_cursor(s.into_cursor()), vec![10, 20, 30]);
    }
}
