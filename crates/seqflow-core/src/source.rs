//! Sequence implementations for host containers and generators.
//!
//! Only the containers needed to feed the engine live here: slices, arrays,
//! `Vec`, the standard sets (which carry a native membership test), any
//! cloneable `IntoIterator`, and the generators `empty`, `once`, `repeat`
//! and `range`.

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::sequence::{check_index, Cursor, IndexedSequence, IntoCursor, Sequence, NOT_POSITIONED};

// ----- slices -----

/// Cursor over a borrowed slice. Seeks in O(1).
#[derive(Debug, Clone)]
pub struct SliceCursor<'a, T> {
    items: &'a [T],
    // One past the current position; 0 before the first advance.
    next: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items, next: 0 }
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.next < self.items.len() {
            self.next += 1;
            true
        } else {
            false
        }
    }

    #[inline]
    fn current(&self) -> &T {
        match self.next.checked_sub(1) {
            Some(index) => &self.items[index],
            None => panic!("{}", NOT_POSITIONED),
        }
    }

    fn advance_by(&mut self, n: usize) -> usize {
        let skipped = n.min(self.items.len() - self.next);
        self.next += skipped;
        skipped
    }
}

impl<T> Sequence for [T] {
    type Item = T;
    type Cursor<'s> = SliceCursor<'s, T> where Self: 's;

    fn cursor(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(self)
    }

    fn exact_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn copy_into(&self, out: &mut Vec<T>) -> bool
    where
        T: Clone,
    {
        out.extend_from_slice(self);
        true
    }
}

impl<T: Clone> IndexedSequence for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get_item(&self, index: usize) -> Result<T> {
        check_index(index, <[T]>::len(self))?;
        Ok(self[index].clone())
    }

    fn set_item(&mut self, index: usize, item: T) -> Result<()> {
        check_index(index, <[T]>::len(self))?;
        self[index] = item;
        Ok(())
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;
    type Cursor<'s> = SliceCursor<'s, T> where Self: 's;

    fn cursor(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(self.as_slice())
    }

    fn exact_count(&self) -> Option<usize> {
        Some(N)
    }

    fn copy_into(&self, out: &mut Vec<T>) -> bool
    where
        T: Clone,
    {
        out.extend_from_slice(self.as_slice());
        true
    }
}

impl<T: Clone, const N: usize> IndexedSequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get_item(&self, index: usize) -> Result<T> {
        self.as_slice().get(index).cloned().ok_or(crate::Error::ArgumentOutOfRange { index, len: N })
    }

    fn set_item(&mut self, index: usize, item: T) -> Result<()> {
        IndexedSequence::set_item(self.as_mut_slice(), index, item)
    }
}

impl<T, const N: usize> IntoCursor for [T; N] {
    type Item = T;
    type IntoCursor = IterCursor<std::array::IntoIter<T, N>>;

    fn into_cursor(self) -> Self::IntoCursor {
        IterCursor::new(self.into_iter())
    }
}

// ----- Vec -----

impl<T> Sequence for Vec<T> {
    type Item = T;
    type Cursor<'s> = SliceCursor<'s, T> where Self: 's;

    fn cursor(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(self.as_slice())
    }

    fn exact_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn copy_into(&self, out: &mut Vec<T>) -> bool
    where
        T: Clone,
    {
        out.extend_from_slice(self);
        true
    }
}

impl<T: Clone> IndexedSequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get_item(&self, index: usize) -> Result<T> {
        IndexedSequence::get_item(self.as_slice(), index)
    }

    fn set_item(&mut self, index: usize, item: T) -> Result<()> {
        IndexedSequence::set_item(self.as_mut_slice(), index, item)
    }
}

impl<T> IntoCursor for Vec<T> {
    type Item = T;
    type IntoCursor = IterCursor<std::vec::IntoIter<T>>;

    fn into_cursor(self) -> Self::IntoCursor {
        IterCursor::new(self.into_iter())
    }
}

// ----- std sets (native membership) -----

/// Cursor over an iterator of references, exposing the referents.
pub struct RefIterCursor<'a, T, I> {
    iter: I,
    current: Option<&'a T>,
}

impl<'a, T, I> RefIterCursor<'a, T, I> {
    pub fn new(iter: I) -> Self {
        Self { iter, current: None }
    }
}

impl<'a, T: 'a, I: Iterator<Item = &'a T>> Cursor for RefIterCursor<'a, T, I> {
    type Item = T;

    fn advance(&mut self) -> bool {
        self.current = self.iter.next();
        self.current.is_some()
    }

    fn current(&self) -> &T {
        self.current.expect(NOT_POSITIONED)
    }
}

impl<T: Eq + Hash, H: BuildHasher> Sequence for HashSet<T, H> {
    type Item = T;
    type Cursor<'s> = RefIterCursor<'s, T, std::collections::hash_set::Iter<'s, T>> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        RefIterCursor::new(self.iter())
    }

    fn exact_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn native_contains(&self, value: &T) -> Option<bool>
    where
        T: PartialEq,
    {
        Some(self.contains(value))
    }
}

impl<T: Ord> Sequence for BTreeSet<T> {
    type Item = T;
    type Cursor<'s> = RefIterCursor<'s, T, std::collections::btree_set::Iter<'s, T>> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        RefIterCursor::new(self.iter())
    }

    fn exact_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn native_contains(&self, value: &T) -> Option<bool>
    where
        T: PartialEq,
    {
        Some(self.contains(value))
    }
}

// ----- arbitrary iterables -----

/// Cursor that buffers the last item of an owning iterator.
#[derive(Debug, Clone)]
pub struct IterCursor<I: Iterator> {
    iter: I,
    current: Option<I::Item>,
}

impl<I: Iterator> IterCursor<I> {
    pub fn new(iter: I) -> Self {
        Self { iter, current: None }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        self.current = self.iter.next();
        self.current.is_some()
    }

    #[inline]
    fn current(&self) -> &I::Item {
        self.current.as_ref().expect(NOT_POSITIONED)
    }
}

/// Adapts any cloneable `IntoIterator` (a range, a chained iterator, ...) into
/// a sequence of unknown length. Each cursor clones the source.
#[derive(Debug, Clone)]
pub struct IterSequence<I> {
    source: I,
}

pub fn from_iterable<I: IntoIterator + Clone>(source: I) -> IterSequence<I> {
    IterSequence { source }
}

impl<I: IntoIterator + Clone> Sequence for IterSequence<I> {
    type Item = I::Item;
    type Cursor<'s> = IterCursor<I::IntoIter> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        IterCursor::new(self.source.clone().into_iter())
    }
}

impl<I: IntoIterator> IntoCursor for IterSequence<I> {
    type Item = I::Item;
    type IntoCursor = IterCursor<I::IntoIter>;

    fn into_cursor(self) -> Self::IntoCursor {
        IterCursor::new(self.source.into_iter())
    }
}

// ----- generators -----

/// A sequence with no items.
#[derive(Debug)]
pub struct Empty<T>(PhantomData<fn() -> T>);

pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Empty<T> {}

#[derive(Debug)]
pub struct EmptyCursor<T>(PhantomData<fn() -> T>);

impl<T> Cursor for EmptyCursor<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        false
    }

    fn current(&self) -> &T {
        panic!("{}", NOT_POSITIONED)
    }
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Cursor<'s> = EmptyCursor<T> where Self: 's;

    fn cursor(&self) -> EmptyCursor<T> {
        EmptyCursor(PhantomData)
    }

    fn exact_count(&self) -> Option<usize> {
        Some(0)
    }

    fn native_contains(&self, _value: &T) -> Option<bool>
    where
        T: PartialEq,
    {
        Some(false)
    }
}

impl<T: Clone> IndexedSequence for Empty<T> {
    fn len(&self) -> usize {
        0
    }

    fn get_item(&self, index: usize) -> Result<T> {
        Err(crate::Error::ArgumentOutOfRange { index, len: 0 })
    }
}

impl<T> IntoCursor for Empty<T> {
    type Item = T;
    type IntoCursor = EmptyCursor<T>;

    fn into_cursor(self) -> EmptyCursor<T> {
        EmptyCursor(PhantomData)
    }
}

/// `value` repeated `count` times. `once(v)` is `repeat(v, 1)`.
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
    count: usize,
}

pub fn repeat<T: Clone>(value: T, count: usize) -> Repeat<T> {
    Repeat { value, count }
}

pub fn once<T: Clone>(value: T) -> Repeat<T> {
    repeat(value, 1)
}

/// Cursor yielding a single value a fixed number of times. The value is
/// owned so the cursor serves both borrowed and owned pipelines.
#[derive(Debug, Clone)]
pub struct RepeatCursor<T> {
    value: T,
    remaining: usize,
    positioned: bool,
}

impl<T> Cursor for RepeatCursor<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.remaining == 0 {
            self.positioned = false;
            return false;
        }
        self.remaining -= 1;
        self.positioned = true;
        true
    }

    fn current(&self) -> &T {
        assert!(self.positioned, "{}", NOT_POSITIONED);
        &self.value
    }

    fn advance_by(&mut self, n: usize) -> usize {
        let skipped = n.min(self.remaining);
        self.remaining -= skipped;
        if skipped > 0 {
            self.positioned = true;
        }
        skipped
    }
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;
    type Cursor<'s> = RepeatCursor<T> where Self: 's;

    fn cursor(&self) -> RepeatCursor<T> {
        RepeatCursor {
            value: self.value.clone(),
            remaining: self.count,
            positioned: false,
        }
    }

    fn exact_count(&self) -> Option<usize> {
        Some(self.count)
    }

    fn native_contains(&self, value: &T) -> Option<bool>
    where
        T: PartialEq,
    {
        Some(self.count != 0 && self.value == *value)
    }
}

impl<T: Clone> IndexedSequence for Repeat<T> {
    fn len(&self) -> usize {
        self.count
    }

    fn get_item(&self, index: usize) -> Result<T> {
        check_index(index, self.count)?;
        Ok(self.value.clone())
    }
}

impl<T> IntoCursor for Repeat<T> {
    type Item = T;
    type IntoCursor = RepeatCursor<T>;

    fn into_cursor(self) -> RepeatCursor<T> {
        RepeatCursor {
            value: self.value,
            remaining: self.count,
            positioned: false,
        }
    }
}

/// `count` consecutive integers starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: i32,
    count: usize,
}

/// Panics if the range would run past `i32::MAX`; see [`try_range`].
pub fn range(start: i32, count: usize) -> Range {
    match try_range(start, count) {
        Ok(range) => range,
        Err(err) => panic!("range({start}, {count}): {err}"),
    }
}

/// Fails `ArgumentOutOfRange` when `start + count - 1` does not fit in an
/// `i32`. `len` in the error is the largest count `start` allows.
pub fn try_range(start: i32, count: usize) -> Result<Range> {
    // i32::MAX - start + 1 is at most 2^32, so it fits in usize on 64-bit
    // targets and saturates elsewhere.
    let max_count = usize::try_from(i32::MAX as i64 - start as i64 + 1).unwrap_or(usize::MAX);
    let fits = i64::try_from(count)
        .ok()
        .and_then(|count| (start as i64).checked_add(count - 1))
        .is_some_and(|last| last <= i32::MAX as i64);
    if count == 0 || fits {
        Ok(Range { start, count })
    } else {
        Err(Error::ArgumentOutOfRange {
            index: count,
            len: max_count,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RangeCursor {
    next: i32,
    remaining: usize,
    current: Option<i32>,
}

impl Cursor for RangeCursor {
    type Item = i32;

    fn advance(&mut self) -> bool {
        if self.remaining == 0 {
            self.current = None;
            return false;
        }
        self.current = Some(self.next);
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next += 1;
        }
        true
    }

    fn current(&self) -> &i32 {
        self.current.as_ref().expect(NOT_POSITIONED)
    }

    fn advance_by(&mut self, n: usize) -> usize {
        let skipped = n.min(self.remaining);
        if skipped == 0 {
            return 0;
        }
        // Position on the last skipped item, as `advance` would have.
        // The range was bounded at construction, so `last` fits in i32.
        let last = (self.next as i64 + skipped as i64 - 1) as i32;
        self.current = Some(last);
        self.remaining -= skipped;
        if self.remaining > 0 {
            self.next = last + 1;
        }
        skipped
    }
}

impl Range {
    fn start_cursor(&self) -> RangeCursor {
        RangeCursor {
            next: self.start,
            remaining: self.count,
            current: None,
        }
    }
}

impl Sequence for Range {
    type Item = i32;
    type Cursor<'s> = RangeCursor;

    fn cursor(&self) -> RangeCursor {
        self.start_cursor()
    }

    fn exact_count(&self) -> Option<usize> {
        Some(self.count)
    }

    fn native_contains(&self, value: &i32) -> Option<bool> {
        let offset = (*value as i64) - (self.start as i64);
        Some(offset >= 0 && (offset as u64) < self.count as u64)
    }
}

impl IndexedSequence for Range {
    fn len(&self) -> usize {
        self.count
    }

    fn get_item(&self, index: usize) -> Result<i32> {
        check_index(index, self.count)?;
        Ok((self.start as i64 + index as i64) as i32)
    }
}

impl IntoCursor for Range {
    type Item = i32;
    type IntoCursor = RangeCursor;

    fn into_cursor(self) -> RangeCursor {
        self.start_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<C: Cursor>(mut cursor: C) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        let mut out = Vec::new();
        while cursor.advance() {
            out.push(cursor.current().clone());
        }
        out
    }

    #[test]
    fn slice_cursor_is_repeatable() {
        let data = [1, 2, 3];
        assert_eq!(drain(data.cursor()), vec![1, 2, 3]);
        assert_eq!(drain(data.cursor()), vec![1, 2, 3]);
    }

    #[test]
    fn slice_cursor_stays_exhausted() {
        let data = vec![7];
        let mut c = data.cursor();
        assert!(c.advance());
        assert!(!c.advance());
        assert!(!c.advance());
    }

    #[test]
    fn slice_advance_by_seeks() {
        let data: Vec<i32> = (0..10).collect();
        let mut c = data.cursor();
        assert_eq!(c.advance_by(4), 4);
        assert_eq!(*c.current(), 3);
        assert!(c.advance());
        assert_eq!(*c.current(), 4);
        assert_eq!(c.advance_by(100), 5);
        assert!(!c.advance());
    }

    #[test]
    fn indexed_access_checks_bounds() {
        let mut data = vec![1, 2, 3];
        assert_eq!(IndexedSequence::get_item(&data, 2), Ok(3));
        assert_eq!(
            IndexedSequence::get_item(&data, 3),
            Err(crate::Error::ArgumentOutOfRange { index: 3, len: 3 })
        );
        IndexedSequence::set_item(&mut data, 0, 10).unwrap();
        assert_eq!(data, vec![10, 2, 3]);
    }

    #[test]
    fn generators() {
        assert_eq!(drain(empty::<i32>().cursor()), Vec::<i32>::new());
        assert_eq!(drain(once(5).cursor()), vec![5]);
        assert_eq!(drain(repeat(0, 5).cursor()), vec![0; 5]);
        assert_eq!(drain(repeat(5, 0).cursor()), Vec::<i32>::new());
        assert_eq!(drain(range(3, 4).cursor()), vec![3, 4, 5, 6]);
        assert_eq!(drain(range(i32::MAX, 1).cursor()), vec![i32::MAX]);
    }

    #[test]
    fn generators_are_read_only() {
        let mut r = range(0, 3);
        assert_eq!(
            r.set_item(0, 1),
            Err(crate::Error::NotSupported("set on a read-only sequence"))
        );
        assert_eq!(r.get_item(2), Ok(2));
    }

    #[test]
    fn range_advance_by_positions_on_last_skipped() {
        let mut c = range(10, 5).cursor();
        assert_eq!(c.advance_by(2), 2);
        assert_eq!(*c.current(), 11);
        assert!(c.advance());
        assert_eq!(*c.current(), 12);
        assert_eq!(c.advance_by(9), 2);
        assert_eq!(*c.current(), 14);
        assert!(!c.advance());
    }

    #[test]
    fn range_rejects_counts_past_i32_max() {
        assert_eq!(
            try_range(i32::MAX - 1, usize::MAX),
            Err(crate::Error::ArgumentOutOfRange { index: usize::MAX, len: 2 })
        );
        assert_eq!(
            try_range(i32::MAX, 2),
            Err(crate::Error::ArgumentOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(try_range(i32::MAX, 1), Ok(range(i32::MAX, 1)));
        assert_eq!(try_range(i32::MAX, 0).map(|r| r.len()), Ok(0));
    }

    #[test]
    #[should_panic(expected = "range(2147483647, 2)")]
    fn range_panics_on_overflow() {
        let _ = range(i32::MAX, 2);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn full_i32_span_seeks_and_indexes() {
        let r = try_range(i32::MIN, 1 << 32).unwrap();
        assert_eq!(r.len(), 1 << 32);
        assert_eq!(r.get_item((1 << 32) - 1), Ok(i32::MAX));
        assert_eq!(r.get_item(1 << 31), Ok(0));

        let mut c = r.cursor();
        assert_eq!(c.advance_by((1 << 31) + 5), (1 << 31) + 5);
        assert_eq!(*c.current(), 4);
        assert!(c.advance());
        assert_eq!(*c.current(), 5);
    }

    #[test]
    fn native_contains_on_sets_and_ranges() {
        let set: HashSet<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(set.native_contains(&2), Some(true));
        assert_eq!(range(5, 3).native_contains(&7), Some(true));
        assert_eq!(range(5, 3).native_contains(&8), Some(false));
        assert_eq!([1, 2].native_contains(&1), None);
    }

    #[test]
    fn iterable_adapter_has_no_count() {
        let s = from_iterable((1..4).map(|x| x * 2));
        assert_eq!(s.exact_count(), None);
        assert_eq!(drain(s.cursor()), vec![2, 4, 6]);
        assert_eq!(drain(s.into_cursor()), vec![2, 4, 6]);
    }
}
