//! Short-circuiting predicates over a sequence.

use seqflow_core::{Cursor, EqualityComparer, Sequence};

/// `true` if the sequence has at least one item. Pulls at most one.
pub fn any<S: Sequence + ?Sized>(seq: &S) -> bool {
    match seq.exact_count() {
        Some(n) => n > 0,
        None => seq.cursor().advance(),
    }
}

/// Stops at the first item `predicate` accepts.
pub fn any_where<S, P>(seq: &S, predicate: P) -> bool
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool,
{
    let mut cursor = seq.cursor();
    while cursor.advance() {
        if predicate(cursor.current()) {
            return true;
        }
    }
    false
}

/// Stops at the first item `predicate` rejects. `true` for an empty sequence.
pub fn all<S, P>(seq: &S, predicate: P) -> bool
where
    S: Sequence + ?Sized,
    P: Fn(&S::Item) -> bool,
{
    !any_where(seq, |item| !predicate(item))
}

/// Membership under natural equality. Uses the sequence's native lookup when
/// it has one.
pub fn contains<S>(seq: &S, value: &S::Item) -> bool
where
    S: Sequence + ?Sized,
    S::Item: PartialEq,
{
    match seq.native_contains(value) {
        Some(found) => found,
        None => any_where(seq, |item| item == value),
    }
}

/// Membership under `comparer`. Always scans.
pub fn contains_by<S, C>(seq: &S, value: &S::Item, comparer: C) -> bool
where
    S: Sequence + ?Sized,
    C: EqualityComparer<S::Item>,
{
    any_where(seq, |item| comparer.equals(item, value))
}
