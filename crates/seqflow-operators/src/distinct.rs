//! `Distinct` yields the first occurrence of each equivalence class, in
//! upstream order. Each traversal owns a fresh dedup [`Set`], released with
//! the cursor.

use seqflow_core::{Cursor, DefaultComparer, EqualityComparer, IntoCursor, Sequence};
use seqflow_mem::Set;

#[derive(Debug, Clone)]
pub struct Distinct<S, C = DefaultComparer> {
    source: S,
    comparer: C,
}

impl<S, C> Distinct<S, C> {
    pub fn new(source: S, comparer: C) -> Self {
        Self { source, comparer }
    }
}

impl<S> Distinct<S, DefaultComparer> {
    /// Deduplicating twice under natural equality is the same as once.
    pub fn distinct(self) -> Self {
        self
    }
}

pub struct DistinctCursor<IC: Cursor, C> {
    inner: IC,
    seen: Set<'static, IC::Item, C>,
}

impl<IC, C> Cursor for DistinctCursor<IC, C>
where
    IC: Cursor,
    IC::Item: Clone,
    C: EqualityComparer<IC::Item>,
{
    type Item = IC::Item;

    fn advance(&mut self) -> bool {
        while self.inner.advance() {
            if self.seen.add(self.inner.current().clone()) {
                return true;
            }
        }
        false
    }

    fn current(&self) -> &IC::Item {
        self.inner.current()
    }
}

impl<S, C> Sequence for Distinct<S, C>
where
    S: Sequence,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;
    type Cursor<'s> = DistinctCursor<S::Cursor<'s>, &'s C> where Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        DistinctCursor {
            inner: self.source.cursor(),
            seen: Set::with_comparer(&self.comparer),
        }
    }

    fn exact_count(&self) -> Option<usize> {
        // Zero or one item is trivially distinct.
        self.source.exact_count().filter(|&n| n <= 1)
    }
}

impl<S, C> IntoCursor for Distinct<S, C>
where
    S: IntoCursor,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;
    type IntoCursor = DistinctCursor<S::IntoCursor, C>;

    fn into_cursor(self) -> Self::IntoCursor {
        DistinctCursor {
            inner: self.source.into_cursor(),
            seen: Set::with_comparer(self.comparer),
        }
    }
}

#[cfg(test)]
mod tests {
    use seqflow_core::comparer::{by_key, from_fns};

    use super::*;
    use crate::test_util::{drain, drain_cursor};

    #[test]
    fn keeps_first_occurrences_in_order() {
        let data = [1, 2, 2, 3, 1, 4, 3];
        let d = Distinct::new(&data, DefaultComparer::new());
        assert_eq!(drain(&d), vec![1, 2, 3, 4]);
        // Every traversal starts with an empty set.
        assert_eq!(drain(&d), vec![1, 2, 3, 4]);
    }

    #[test]
    fn custom_comparer() {
        let words = ["Apple", "apple", "Pear", "APPLE", "pear", "fig"];
        let d = Distinct::new(&words, by_key(|w: &&str| w.to_lowercase()));
        assert_eq!(drain(&d), vec!["Apple", "Pear", "fig"]);

        let mod3 = Distinct::new([1, 4, 2, 7, 5, 3], from_fns(|a: &i32, b: &i32| a % 3 == b % 3, |a: &i32| (a % 3) as u64));
        assert_eq!(drain(&mod3), vec![1, 2, 3]);
    }

    #[test]
    fn distinct_distinct_is_idempotent() {
        let data = vec![5, 5, 6];
        let d = Distinct::new(&data, DefaultComparer::new()).distinct();
        assert_eq!(drain(&d), vec![5, 6]);
    }

    #[test]
    fn count_is_known_only_for_trivial_sources() {
        let one = [9];
        assert_eq!(Distinct::new(&one, DefaultComparer::new()).exact_count(), Some(1));
        let many = [9, 9];
        assert_eq!(Distinct::new(&many, DefaultComparer::new()).exact_count(), None);
    }

    #[test]
    fn owned_distinct_cursor() {
        let d = Distinct::new(vec!["a", "b", "a"], DefaultComparer::new());
        assert_eq!(drain_cursor(d.into_cursor()), vec!["a", "b"]);
    }
}
