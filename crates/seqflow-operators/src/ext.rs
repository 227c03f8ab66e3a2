//! Method-call factories for every combinator.
//!
//! `SequenceExt` is implemented for every [`Sequence`], so pipelines read
//! left to right: `data.as_slice().filter(p).select(f).take(3)`. Combinators
//! that fuse (`Filter::filter`, `Select::select`, `Distinct::distinct`,
//! `SkipTake::skip`/`take`) provide inherent methods of the same name, which
//! take precedence over these.
//!
//! The `try_*` forms accept an optional function and fail
//! `InvalidArgument` when it is absent, for callers that assemble pipelines
//! from optional parts.

use std::hash::Hash;

use seqflow_core::{DefaultComparer, EqualityComparer, Error, IntoCursor, Result, Sequence};

use crate::distinct::Distinct;
use crate::filter::{Filter, FilterAt};
use crate::partition::SkipTake;
use crate::select::{Select, SelectAt};
use crate::select_many::SelectMany;

pub trait SequenceExt: Sequence + Sized {
    /// Items for which `predicate` returns `true`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Like [`filter`](Self::filter), with each item's upstream position.
    fn filter_at<P>(self, predicate: P) -> FilterAt<Self, P>
    where
        P: Fn(&Self::Item, usize) -> bool,
    {
        FilterAt::new(self, predicate)
    }

    fn select<F, U>(self, selector: F) -> Select<Self, F>
    where
        F: Fn(&Self::Item) -> U,
    {
        Select::new(self, selector)
    }

    fn select_at<F, U>(self, selector: F) -> SelectAt<Self, F>
    where
        F: Fn(&Self::Item, usize) -> U,
    {
        SelectAt::new(self, selector)
    }

    /// Flatten the sequences `selector` produces, in outer-then-inner order.
    fn select_many<F, I>(self, selector: F) -> SelectMany<Self, F>
    where
        F: Fn(&Self::Item) -> I,
        I: IntoCursor,
    {
        SelectMany::new(self, selector)
    }

    /// First occurrence of each distinct item under natural equality.
    fn distinct(self) -> Distinct<Self, DefaultComparer>
    where
        Self::Item: Eq + Hash + Clone,
    {
        Distinct::new(self, DefaultComparer::new())
    }

    fn distinct_by<C>(self, comparer: C) -> Distinct<Self, C>
    where
        Self::Item: Clone,
        C: EqualityComparer<Self::Item>,
    {
        Distinct::new(self, comparer)
    }

    /// Drop the first `count` items. Negative counts skip nothing.
    fn skip(self, count: isize) -> SkipTake<Self> {
        SkipTake::new(self).skip(count)
    }

    /// Keep at most `count` items. Negative counts keep nothing.
    fn take(self, count: isize) -> SkipTake<Self> {
        SkipTake::new(self).take(count)
    }

    fn try_filter<P>(self, predicate: Option<P>) -> Result<Filter<Self, P>>
    where
        P: Fn(&Self::Item) -> bool,
    {
        let predicate = predicate.ok_or_else(|| Error::missing("predicate"))?;
        Ok(Filter::new(self, predicate))
    }

    fn try_select<F, U>(self, selector: Option<F>) -> Result<Select<Self, F>>
    where
        F: Fn(&Self::Item) -> U,
    {
        let selector = selector.ok_or_else(|| Error::missing("selector"))?;
        Ok(Select::new(self, selector))
    }

    fn try_select_many<F, I>(self, selector: Option<F>) -> Result<SelectMany<Self, F>>
    where
        F: Fn(&Self::Item) -> I,
        I: IntoCursor,
    {
        let selector = selector.ok_or_else(|| Error::missing("selector"))?;
        Ok(SelectMany::new(self, selector))
    }

    fn try_distinct_by<C>(self, comparer: Option<C>) -> Result<Distinct<Self, C>>
    where
        Self::Item: Clone,
        C: EqualityComparer<Self::Item>,
    {
        let comparer = comparer.ok_or_else(|| Error::missing("comparer"))?;
        Ok(Distinct::new(self, comparer))
    }
}

impl<S: Sequence> SequenceExt for S {}

#[cfg(test)]
mod tests {
    use seqflow_core::comparer::by_key;
    use seqflow_core::source::range;

    use super::*;
    use crate::test_util::drain;

    #[test]
    fn pipeline_reads_left_to_right() {
        let data = vec![1, 2, 3, 4, 5, 6];
        let s = data
            .as_slice()
            .filter(|x| x % 2 == 1)
            .select(|x| x * x)
            .skip(1);
        assert_eq!(drain(&s), vec![9, 25]);
    }

    #[test]
    fn adjacent_filters_fuse_into_one_layer() {
        let data = [1, 2, 3, 4, 5, 6];
        // The fused type is a single `Filter` directly over the source.
        let fused: Filter<&[i32; 6], _> = (&data).filter(|x| *x > 1).filter(|x| *x < 6);
        assert_eq!(drain(&fused), vec![2, 3, 4, 5]);
    }

    #[test]
    fn adjacent_selects_fuse_into_one_layer() {
        let data = [1, 2];
        let fused: Select<&[i32; 2], _> = (&data).select(|x| x + 1).select(|x| x * 10);
        assert_eq!(drain(&fused), vec![20, 30]);
    }

    #[test]
    fn skip_take_chain_is_one_layer() {
        let s: SkipTake<_> = range(0, 100).skip(10).take(20).skip(5);
        assert_eq!(s.exact_count(), Some(15));
        assert_eq!(drain(&s).first(), Some(&15));
    }

    #[test]
    fn distinct_after_select_many() {
        let groups = vec![vec![1, 2], vec![2, 3], vec![3, 4]];
        let s = groups.as_slice().select_many(|g| g.clone()).distinct();
        assert_eq!(drain(&s), vec![1, 2, 3, 4]);
    }

    #[test]
    fn distinct_by_key() {
        let pairs = [(1, 'a'), (2, 'b'), (1, 'c')];
        let s = (&pairs).distinct_by(by_key(|p: &(i32, char)| p.0));
        assert_eq!(drain(&s), vec![(1, 'a'), (2, 'b')]);
    }

    #[test]
    fn missing_functions_are_invalid_arguments() {
        let data = [1, 2, 3];
        let err = (&data).try_filter(None::<fn(&i32) -> bool>).unwrap_err();
        assert_eq!(err, Error::missing("predicate"));
        let err = (&data).try_select(None::<fn(&i32) -> i32>).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = (&data)
            .try_select_many(None::<fn(&i32) -> Vec<i32>>)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = (&data)
            .try_distinct_by(None::<DefaultComparer>)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let ok = (&data).try_filter(Some(|x: &i32| *x > 1)).unwrap();
        assert_eq!(drain(&ok), vec![2, 3]);
    }
}
