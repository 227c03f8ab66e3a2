//! Dedup store: insertion-ordered hash set over an injected comparer.
//!
//! Chained buckets index into a dense slot vector, so iteration follows
//! insertion order and removal is not supported. Bucket storage may come
//! from a [`BufferPool`] and goes back to it on drop.

use std::mem;

use seqflow_core::{BufferConfig, DefaultComparer, EqualityComparer};

use crate::pool::BufferPool;

struct Slot<T> {
    hash: u64,
    // 1-based index of the next slot in this bucket's chain; 0 ends it.
    next: usize,
    value: T,
}

pub struct Set<'p, T, C = DefaultComparer> {
    // 1-based slot index of each chain head; 0 is an empty bucket.
    buckets: Vec<usize>,
    slots: Vec<Slot<T>>,
    comparer: C,
    initial_capacity: usize,
    load_factor: f64,
    pool: Option<&'p BufferPool<usize>>,
}

impl<T: Eq + std::hash::Hash> Set<'static, T, DefaultComparer> {
    pub fn new() -> Self {
        Self::with_comparer(DefaultComparer::new())
    }
}

impl<T: Eq + std::hash::Hash> Default for Set<'static, T, DefaultComparer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: EqualityComparer<T>> Set<'static, T, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_config(BufferConfig::global(), comparer)
    }

    pub fn with_config(cfg: &BufferConfig, comparer: C) -> Self {
        Self::build(cfg, comparer, None)
    }
}

impl<'p, T, C: EqualityComparer<T>> Set<'p, T, C> {
    /// Set whose bucket storage is rented from `pool`.
    pub fn with_pool(cfg: &BufferConfig, comparer: C, pool: &'p BufferPool<usize>) -> Self {
        Self::build(cfg, comparer, Some(pool))
    }

    fn build(cfg: &BufferConfig, comparer: C, pool: Option<&'p BufferPool<usize>>) -> Self {
        Self {
            buckets: Vec::new(),
            slots: Vec::new(),
            comparer,
            initial_capacity: cfg.set_initial_capacity.max(1),
            load_factor: cfg.set_load_factor,
            pool,
        }
    }

    /// Record `value` unless an equivalent item is already present.
    /// Returns `true` if it was recorded.
    pub fn add(&mut self, value: T) -> bool {
        let hash = self.comparer.hash(&value);
        if self.find(hash, &value).is_some() {
            return false;
        }

        if self.buckets.is_empty() {
            self.buckets = self.fresh_buckets(self.initial_capacity);
        } else if self.slots.len() as f64 >= self.buckets.len() as f64 * self.load_factor {
            self.resize();
        }

        let bucket = self.bucket_of(hash);
        self.slots.push(Slot {
            hash,
            next: self.buckets[bucket],
            value,
        });
        self.buckets[bucket] = self.slots.len();
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(self.comparer.hash(value), value).is_some()
    }

    fn find(&self, hash: u64, value: &T) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let mut i = self.buckets[self.bucket_of(hash)];
        while i != 0 {
            let slot = &self.slots[i - 1];
            if slot.hash == hash && self.comparer.equals(&slot.value, value) {
                return Some(i - 1);
            }
            i = slot.next;
        }
        None
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn fresh_buckets(&self, len: usize) -> Vec<usize> {
        let mut buckets = match self.pool {
            Some(pool) => pool.take(len),
            None => Vec::with_capacity(len),
        };
        buckets.resize(len, 0);
        buckets
    }

    fn resize(&mut self) {
        let len = self.buckets.len() * 2 + 1;
        let fresh = self.fresh_buckets(len);
        let old = mem::replace(&mut self.buckets, fresh);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let bucket = (slot.hash % len as u64) as usize;
            slot.next = self.buckets[bucket];
            self.buckets[bucket] = i + 1;
        }
        if let Some(pool) = self.pool {
            pool.give_back(old);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(buckets = len, items = self.slots.len(), "set resize");
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().map(|s| &s.value)
    }

    pub fn into_vec(mut self) -> Vec<T> {
        mem::take(&mut self.slots)
            .into_iter()
            .map(|s| s.value)
            .collect()
    }
}

impl<T, C> Drop for Set<'_, T, C> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool {
            if self.buckets.capacity() > 0 {
                pool.give_back(mem::take(&mut self.buckets));
            }
        }
    }
}
