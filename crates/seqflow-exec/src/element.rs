//! Element access: first, single and positional lookup.
//!
//! Results are clones of the cursor's current item; the cursor is dropped
//! before returning.

use seqflow_core::{Cursor, Error, Result, Sequence};

pub fn try_first<S>(seq: &S) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    let mut cursor = seq.cursor();
    if cursor.advance() {
        Some(cursor.current().clone())
    } else {
        None
    }
}

pub fn try_first_where<S, P>(seq: &S, predicate: P) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    P: Fn(&S::Item) -> bool,
{
    let mut cursor = seq.cursor();
    while cursor.advance() {
        if predicate(cursor.current()) {
            return Some(cursor.current().clone());
        }
    }
    None
}

/// Fails `EmptySequence` if there is no item.
pub fn first<S>(seq: &S) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    try_first(seq).ok_or(Error::EmptySequence)
}

pub fn first_where<S, P>(seq: &S, predicate: P) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    P: Fn(&S::Item) -> bool,
{
    try_first_where(seq, predicate).ok_or(Error::EmptySequence)
}

pub fn first_or_default<S>(seq: &S) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Clone + Default,
{
    try_first(seq).unwrap_or_default()
}

pub fn first_or_default_where<S, P>(seq: &S, predicate: P) -> S::Item
where
    S: Sequence + ?Sized,
    S::Item: Clone + Default,
    P: Fn(&S::Item) -> bool,
{
    try_first_where(seq, predicate).unwrap_or_default()
}

/// The only item accepted by `predicate`, or `None` if there is none.
/// Fails `MoreThanOneElement` on a second match without reading further.
fn find_single<S, P>(seq: &S, predicate: P) -> Result<Option<S::Item>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    P: Fn(&S::Item) -> bool,
{
    let mut cursor = seq.cursor();
    let mut found = None;
    while cursor.advance() {
        if predicate(cursor.current()) {
            if found.is_some() {
                return Err(Error::MoreThanOneElement);
            }
            found = Some(cursor.current().clone());
        }
    }
    Ok(found)
}

/// The only item. Fails `EmptySequence` on none, `MoreThanOneElement` on
/// more than one.
pub fn single<S>(seq: &S) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    match seq.exact_count() {
        Some(0) => Err(Error::EmptySequence),
        Some(n) if n > 1 => Err(Error::MoreThanOneElement),
        _ => find_single(seq, |_| true)?.ok_or(Error::EmptySequence),
    }
}

pub fn single_where<S, P>(seq: &S, predicate: P) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    P: Fn(&S::Item) -> bool,
{
    find_single(seq, predicate)?.ok_or(Error::EmptySequence)
}

/// Like [`single`], but an empty sequence yields `Item::default()`. More
/// than one item is still an error.
pub fn single_or_default<S>(seq: &S) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone + Default,
{
    Ok(find_single(seq, |_| true)?.unwrap_or_default())
}

pub fn single_or_default_where<S, P>(seq: &S, predicate: P) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone + Default,
    P: Fn(&S::Item) -> bool,
{
    Ok(find_single(seq, predicate)?.unwrap_or_default())
}

/// Item at `index`, or `None` past the end. Skips with `advance_by`, so
/// random-access sources (and projections of them) seek directly.
pub fn element_at<S>(seq: &S, index: usize) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    element_at_or_err(seq, index).ok()
}

/// Like [`element_at`], failing `ArgumentOutOfRange` past the end.
pub fn element_at_or_err<S>(seq: &S, index: usize) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    if let Some(len) = seq.exact_count() {
        if index >= len {
            return Err(Error::ArgumentOutOfRange { index, len });
        }
    }
    let mut cursor = seq.cursor();
    let skipped = cursor.advance_by(index);
    if skipped == index && cursor.advance() {
        Ok(cursor.current().clone())
    } else {
        Err(Error::ArgumentOutOfRange {
            index,
            len: skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use seqflow_core::source::{from_iterable, range};
    use seqflow_operators::SequenceExt;

    use super::*;

    #[test]
    fn first_variants() {
        let empty: [i32; 0] = [];
        let data = [5, 7, 9];
        assert_eq!(first(&empty), Err(Error::EmptySequence));
        assert_eq!(first(&data), Ok(5));
        assert_eq!(first_where(&data, |x| *x > 6), Ok(7));
        assert_eq!(first_where(&data, |x| *x > 9), Err(Error::EmptySequence));
        assert_eq!(first_or_default(&empty), 0);
        assert_eq!(first_or_default_where(&data, |x| *x > 100), 0);
        assert_eq!(try_first(&data), Some(5));
        assert_eq!(try_first_where(&data, |x| *x == 9), Some(9));
    }

    #[test]
    fn single_variants() {
        let empty: [i32; 0] = [];
        assert_eq!(single(&[4]), Ok(4));
        assert_eq!(single(&[4, 5]), Err(Error::MoreThanOneElement));
        assert_eq!(single(&empty), Err(Error::EmptySequence));

        let data = [1, 2, 3];
        assert_eq!(single_where(&data, |x| *x == 2), Ok(2));
        assert_eq!(single_where(&data, |x| *x > 1), Err(Error::MoreThanOneElement));
        assert_eq!(single_where(&data, |x| *x > 3), Err(Error::EmptySequence));

        // The default only stands in for "no match", never for "too many".
        assert_eq!(single_or_default(&empty), Ok(0));
        assert_eq!(single_or_default_where(&data, |x| *x > 3), Ok(0));
        assert_eq!(
            single_or_default_where(&data, |x| *x > 1),
            Err(Error::MoreThanOneElement)
        );
    }

    #[test]
    fn single_over_unknown_length_stops_at_second_match() {
        let pulled = Cell::new(0);
        let seq = from_iterable(0..100).select(|x| {
            pulled.set(pulled.get() + 1);
            *x
        });
        assert_eq!(single(&seq), Err(Error::MoreThanOneElement));
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn element_at_is_optional() {
        let data = vec![10, 20, 30];
        assert_eq!(element_at(&data, 0), Some(10));
        assert_eq!(element_at(&data, 2), Some(30));
        assert_eq!(element_at(&data, 3), None);
        assert_eq!(element_at(&from_iterable(0..3), 5), None);
        assert_eq!(
            element_at_or_err(&from_iterable(0..3), 5),
            Err(Error::ArgumentOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(
            element_at_or_err(&data, 7),
            Err(Error::ArgumentOutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn element_at_seeks_without_projecting() {
        let calls = Cell::new(0);
        let projected = range(0, 1000).select(|x| {
            calls.set(calls.get() + 1);
            x * 2
        });
        assert_eq!(element_at(&projected, 500), Some(1000));
        assert_eq!(calls.get(), 1);
    }
}
