//! Counting and pairwise comparison.

use seqflow_core::{Cursor, EqualityComparer, Error, Result, Sequence};

use crate::metrics::emit_event;

/// Number of items. Answers from `exact_count` when the sequence knows it.
pub fn count<S: Sequence + ?Sized>(seq: &S) -> Result<usize> {
    if let Some(n) = seq.exact_count() {
        emit_event("count", &[("count", n), ("traversed", 0)]);
        return Ok(n);
    }
    let n = count_where(seq, |_| true)?;
    emit_event("count", &[("count", n), ("traversed", 1)]);
    Ok(n)
}

/// Number of items `predicate` accepts. Fails `ArithmeticOverflow` if the
/// count does not fit a `usize`.
pub fn count_where<S, P>(seq: &S, predicate: P) -> Result<usize>
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool,
{
    let mut cursor = seq.cursor();
    let mut n: usize = 0;
    while cursor.advance() {
        if predicate(cursor.current()) {
            n = n.checked_add(1).ok_or(Error::ArithmeticOverflow("count"))?;
        }
    }
    Ok(n)
}

/// Same length and pairwise equal items, in order.
pub fn sequence_equal<A, B>(a: &A, b: &B) -> bool
where
    A: Sequence + ?Sized,
    B: Sequence + ?Sized,
    A::Item: PartialEq<B::Item>,
{
    zip_all(a, b, |x, y| x == y)
}

pub fn sequence_equal_by<A, B, C>(a: &A, b: &B, comparer: C) -> bool
where
    A: Sequence + ?Sized,
    B: Sequence<Item = A::Item> + ?Sized,
    C: EqualityComparer<A::Item>,
{
    zip_all(a, b, |x, y| comparer.equals(x, y))
}

fn zip_all<A, B, E>(a: &A, b: &B, eq: E) -> bool
where
    A: Sequence + ?Sized,
    B: Sequence + ?Sized,
    E: Fn(&A::Item, &B::Item) -> bool,
{
    if let (Some(n), Some(m)) = (a.exact_count(), b.exact_count()) {
        if n != m {
            return false;
        }
    }
    let mut left = a.cursor();
    let mut right = b.cursor();
    loop {
        match (left.advance(), right.advance()) {
            (true, true) => {
                if !eq(left.current(), right.current()) {
                    return false;
                }
            }
            (false, false) => return true,
            _ => return false,
        }
    }
}
