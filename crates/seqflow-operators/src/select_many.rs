//! `SelectMany` flattens: each outer item is mapped to an inner sequence
//! which is drained before the next outer item is requested.
//!
//! The selector returns an [`IntoCursor`] value, so the inner cursor owns its
//! data (or borrows from something that outlives the traversal) and at most
//! one inner cursor is live at a time. It is released as soon as it is
//! exhausted, before the outer cursor advances.

use seqflow_core::{Cursor, IntoCursor, Sequence, NOT_POSITIONED};

#[derive(Debug, Clone)]
pub struct SelectMany<S, F> {
    source: S,
    selector: F,
}

impl<S, F> SelectMany<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

enum State<IC> {
    NeedOuter,
    Draining(IC),
    Exhausted,
}

pub struct SelectManyCursor<C, F, I: IntoCursor> {
    outer: C,
    selector: F,
    state: State<I::IntoCursor>,
}

impl<C, F, I> Cursor for SelectManyCursor<C, F, I>
where
    C: Cursor,
    F: Fn(&C::Item) -> I,
    I: IntoCursor,
{
    type Item = I::Item;

    fn advance(&mut self) -> bool {
        loop {
            match &mut self.state {
                State::Draining(inner) => {
                    if inner.advance() {
                        return true;
                    }
                    self.state = State::NeedOuter;
                }
                State::NeedOuter => {
                    if !self.outer.advance() {
                        self.state = State::Exhausted;
                        return false;
                    }
                    let inner = (self.selector)(self.outer.current()).into_cursor();
                    self.state = State::Draining(inner);
                }
                State::Exhausted => return false,
            }
        }
    }

    fn current(&self) -> &I::Item {
        match &self.state {
            State::Draining(inner) => inner.current(),
            _ => panic!("{}", NOT_POSITIONED),
        }
    }
}

impl<S, F, I> Sequence for SelectMany<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> I,
    I: IntoCursor,
{
    type Item = I::Item;
    type Cursor<'s> = SelectManyCursor<S::Cursor<'s>, &'s F, I> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SelectManyCursor {
            outer: self.source.cursor(),
            selector: &self.selector,
            state: State::NeedOuter,
        }
    }
}

impl<S, F, I> IntoCursor for SelectMany<S, F>
where
    S: IntoCursor,
    F: Fn(&S::Item) -> I,
    I: IntoCursor,
{
    type Item = I::Item;
    type IntoCursor = SelectManyCursor<S::IntoCursor, F, I>;

    fn into_cursor(self) -> Self::IntoCursor {
        SelectManyCursor {
            outer: self.source.into_cursor(),
            selector: self.selector,
            state: State::NeedOuter,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use seqflow_core::source::{empty, range, repeat};

    use super::*;
    use crate::filter::Filter;
    use crate::test_util::{drain, drain_cursor};

    #[test]
    fn flattens_in_outer_then_inner_order() {
        let data = [1, 2, 3];
        let s = SelectMany::new(&data, |x: &i32| vec![*x; *x as usize]);
        assert_eq!(drain(&s), vec![1, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn skips_empty_inner_sequences() {
        let data = [0, 2, 0, 0, 1, 0];
        let s = SelectMany::new(&data, |x: &i32| repeat(*x, *x as usize));
        assert_eq!(drain(&s), vec![2, 2, 1]);

        let none = SelectMany::new(&data, |_: &i32| empty::<i32>());
        assert!(drain(&none).is_empty());
    }

    #[test]
    fn inner_is_drained_before_outer_advances() {
        let log = RefCell::new(Vec::new());
        let outer = [10, 20];
        let s = SelectMany::new(&outer, |base: &i32| {
            log.borrow_mut().push(format!("outer{base}"));
            range(*base, 2)
        });
        let mut c = s.cursor();
        while c.advance() {
            log.borrow_mut().push(format!("inner{}", c.current()));
        }
        assert_eq!(
            *log.borrow(),
            vec!["outer10", "inner10", "inner11", "outer20", "inner20", "inner21"]
        );
    }

    #[test]
    fn inner_can_be_a_combinator() {
        let data = [3, 5];
        let s = SelectMany::new(&data, |n: &i32| Filter::new(range(0, *n as usize), |x: &i32| x % 2 == 1));
        assert_eq!(drain(&s), vec![1, 1, 3]);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let data = [1];
        let s = SelectMany::new(&data, |x: &i32| vec![*x]);
        let mut c = s.cursor();
        assert!(c.advance());
        assert!(!c.advance());
        assert!(!c.advance());
    }

    #[test]
    fn owned_select_many() {
        let s = SelectMany::new(vec!["ab", "c"], |w: &&str| w.chars().collect::<Vec<_>>());
        assert_eq!(drain_cursor(s.into_cursor()), vec!['a', 'b', 'c']);
    }
}
