//! Injected equality/hash relations used by `Distinct`, `Set`, `contains_by`
//! and `sequence_equal_by`.
//!
//! Implementations must be consistent: `equals(a, b)` implies
//! `hash(a) == hash(b)`.

use std::hash::Hash;

use ahash::RandomState;

pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
    fn hash(&self, value: &T) -> u64;
}

/// Natural equality (`Eq`) hashed with `ahash`.
#[derive(Debug, Clone, Default)]
pub struct DefaultComparer {
    state: RandomState,
}

impl DefaultComparer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Eq + Hash + ?Sized> EqualityComparer<T> for DefaultComparer {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, value: &T) -> u64 {
        self.state.hash_one(value)
    }
}

/// Compare items by a projected key.
#[derive(Debug, Clone)]
pub struct ByKey<F> {
    key: F,
    state: RandomState,
}

/// Build a comparer that treats two items as equal when `key` maps them to
/// equal values.
pub fn by_key<F>(key: F) -> ByKey<F> {
    ByKey {
        key,
        state: RandomState::new(),
    }
}

impl<T: ?Sized, K: Eq + Hash, F: Fn(&T) -> K> EqualityComparer<T> for ByKey<F> {
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    fn hash(&self, value: &T) -> u64 {
        self.state.hash_one((self.key)(value))
    }
}

/// Comparer assembled from an equality closure and a hash closure.
#[derive(Debug, Clone)]
pub struct FnComparer<E, H> {
    eq: E,
    hash: H,
}

pub fn from_fns<E, H>(eq: E, hash: H) -> FnComparer<E, H> {
    FnComparer { eq, hash }
}

impl<T: ?Sized, E, H> EqualityComparer<T> for FnComparer<E, H>
where
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.eq)(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (self.hash)(value)
    }
}

impl<T: ?Sized, C: EqualityComparer<T> + ?Sized> EqualityComparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }

    fn hash(&self, value: &T) -> u64 {
        (**self).hash(value)
    }
}
