//! `Reduce`: every terminal reducer as a method on any [`Sequence`].
//!
//! Reducers take `&self`, so a pipeline can be reduced any number of times
//! and each call performs an independent traversal.
//!
//! Method resolution on host containers: inherent methods win, and slices
//! have inherent `first`, `contains` and `to_vec`. With the prelude in scope,
//! `vec.first()` on a `Vec` or array resolves to [`Reduce::first`] and
//! returns a `Result`, while `vec.as_slice().first()` stays the slice's
//! `Option`. `slice.to_vec()` is always the slice clone. Call the reducer on
//! a pipeline, or use the free functions in [`element`], [`quantifier`] and
//! [`conversion`], to make the choice explicit.

use std::hash::Hash;

use seqflow_core::{BufferConfig, EqualityComparer, Result, Sequence};
use seqflow_mem::{BufferPool, PooledBuf};

use crate::conversion::SeqMap;
use crate::{aggregate, conversion, element, quantifier};

pub trait Reduce: Sequence {
    // ----- aggregate -----

    fn count(&self) -> Result<usize> {
        aggregate::count(self)
    }

    fn count_where<P>(&self, predicate: P) -> Result<usize>
    where
        P: Fn(&Self::Item) -> bool,
    {
        aggregate::count_where(self, predicate)
    }

    fn sequence_equal<B>(&self, other: &B) -> bool
    where
        B: Sequence + ?Sized,
        Self::Item: PartialEq<B::Item>,
    {
        aggregate::sequence_equal(self, other)
    }

    fn sequence_equal_by<B, C>(&self, other: &B, comparer: C) -> bool
    where
        B: Sequence<Item = Self::Item> + ?Sized,
        C: EqualityComparer<Self::Item>,
    {
        aggregate::sequence_equal_by(self, other, comparer)
    }

    // ----- quantifiers -----

    fn any(&self) -> bool {
        quantifier::any(self)
    }

    fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        quantifier::any_where(self, predicate)
    }

    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        quantifier::all(self, predicate)
    }

    fn contains(&self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq,
    {
        quantifier::contains(self, value)
    }

    fn contains_by<C>(&self, value: &Self::Item, comparer: C) -> bool
    where
        C: EqualityComparer<Self::Item>,
    {
        quantifier::contains_by(self, value, comparer)
    }

    // ----- element access -----

    fn first(&self) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        element::first(self)
    }

    fn first_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool,
    {
        element::first_where(self, predicate)
    }

    fn first_or_default(&self) -> Self::Item
    where
        Self::Item: Clone + Default,
    {
        element::first_or_default(self)
    }

    fn first_or_default_where<P>(&self, predicate: P) -> Self::Item
    where
        Self::Item: Clone + Default,
        P: Fn(&Self::Item) -> bool,
    {
        element::first_or_default_where(self, predicate)
    }

    fn try_first(&self) -> Option<Self::Item>
    where
        Self::Item: Clone,
    {
        element::try_first(self)
    }

    fn try_first_where<P>(&self, predicate: P) -> Option<Self::Item>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool,
    {
        element::try_first_where(self, predicate)
    }

    fn single(&self) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        element::single(self)
    }

    fn single_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        Self::Item: Clone,
        P: Fn(&Self::Item) -> bool,
    {
        element::single_where(self, predicate)
    }

    fn single_or_default(&self) -> Result<Self::Item>
    where
        Self::Item: Clone + Default,
    {
        element::single_or_default(self)
    }

    fn single_or_default_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        Self::Item: Clone + Default,
        P: Fn(&Self::Item) -> bool,
    {
        element::single_or_default_where(self, predicate)
    }

    fn element_at(&self, index: usize) -> Option<Self::Item>
    where
        Self::Item: Clone,
    {
        element::element_at(self, index)
    }

    fn element_at_or_err(&self, index: usize) -> Result<Self::Item>
    where
        Self::Item: Clone,
    {
        element::element_at_or_err(self, index)
    }

    // ----- materialization -----

    fn to_vec(&self) -> Result<Vec<Self::Item>>
    where
        Self::Item: Clone,
    {
        conversion::to_vec(self)
    }

    /// Alias of [`to_vec`](Self::to_vec).
    fn to_list(&self) -> Result<Vec<Self::Item>>
    where
        Self::Item: Clone,
    {
        conversion::to_vec(self)
    }

    fn to_vec_with(&self, cfg: &BufferConfig) -> Result<Vec<Self::Item>>
    where
        Self::Item: Clone,
    {
        conversion::to_vec_with(self, cfg)
    }

    fn to_array(&self) -> Result<Box<[Self::Item]>>
    where
        Self::Item: Clone,
    {
        conversion::to_array(self)
    }

    fn to_pooled<'p>(&self, pool: &'p BufferPool<Self::Item>) -> PooledBuf<'p, Self::Item>
    where
        Self::Item: Clone,
    {
        conversion::to_pooled(self, pool)
    }

    fn to_map<K, FK>(&self, key: FK) -> Result<SeqMap<K, Self::Item>>
    where
        Self::Item: Clone,
        K: Eq + Hash,
        FK: Fn(&Self::Item) -> K,
    {
        conversion::to_map(self, key)
    }

    fn to_map_with<K, V, FK, FV>(&self, key: FK, value: FV) -> Result<SeqMap<K, V>>
    where
        K: Eq + Hash,
        FK: Fn(&Self::Item) -> K,
        FV: Fn(&Self::Item) -> V,
    {
        conversion::to_map_with(self, key, value)
    }
}

impl<S: Sequence + ?Sized> Reduce for S {}
