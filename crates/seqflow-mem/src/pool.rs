//! Reusable `Vec` storage.
//!
//! Terminal operations that run repeatedly (dedup, materialization) rent
//! their bookkeeping storage here instead of allocating it fresh each time.
//! Returned buffers are cleared and kept, up to `max_retained` of them.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use seqflow_core::BufferConfig;

use crate::tracking::PoolTracker;

/// Thread-safe pool of idle `Vec<T>` buffers.
#[derive(Debug)]
pub struct BufferPool<T> {
    idle: Mutex<Vec<Vec<T>>>,
    max_retained: usize,
    tracker: PoolTracker,
}

impl<T> BufferPool<T> {
    pub fn new(max_retained: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_retained,
            tracker: PoolTracker::new(),
        }
    }

    pub fn from_config(cfg: &BufferConfig) -> Self {
        Self::new(cfg.pool_max_retained)
    }

    fn idle(&self) -> MutexGuard<'_, Vec<Vec<T>>> {
        // A panic while holding the lock cannot leave the idle list inconsistent.
        self.idle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Take an empty buffer with at least `min_capacity` slots. Prefers an
    /// idle buffer that is already large enough.
    pub fn take(&self, min_capacity: usize) -> Vec<T> {
        let found = {
            let mut idle = self.idle();
            idle.iter()
                .position(|b| b.capacity() >= min_capacity)
                .map(|i| idle.swap_remove(i))
        };
        let reused = found.is_some();
        self.tracker.record_rent(reused);
        found.unwrap_or_else(|| Vec::with_capacity(min_capacity))
    }

    /// Hand a buffer back. Its contents are dropped; its storage is kept if
    /// the pool is under its retention limit.
    pub fn give_back(&self, mut buf: Vec<T>) {
        buf.clear();
        let retained = {
            let mut idle = self.idle();
            if buf.capacity() > 0 && idle.len() < self.max_retained {
                idle.push(buf);
                true
            } else {
                false
            }
        };
        self.tracker.record_return(retained);
    }

    /// Rent a buffer that returns itself to this pool on drop.
    pub fn rent(&self, min_capacity: usize) -> PooledBuf<'_, T> {
        PooledBuf {
            pool: self,
            buf: self.take(min_capacity),
        }
    }

    pub fn idle_count(&self) -> usize {
        self.idle().len()
    }

    pub fn tracker(&self) -> &PoolTracker {
        &self.tracker
    }
}

impl<T> Default for BufferPool<T> {
    fn default() -> Self {
        Self::from_config(BufferConfig::global())
    }
}

/// A `Vec` rented from a [`BufferPool`]; goes back to the pool on drop.
#[derive(Debug)]
pub struct PooledBuf<'p, T> {
    pool: &'p BufferPool<T>,
    buf: Vec<T>,
}

impl<'p, T> PooledBuf<'p, T> {
    pub fn push(&mut self, item: T) {
        self.buf.push(item);
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Detach the storage from the pool.
    pub fn into_inner(mut self) -> Vec<T> {
        std::mem::take(&mut self.buf)
    }
}

impl<T> Extend<T> for PooledBuf<'_, T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.buf.extend(iter);
    }
}

impl<T> Deref for PooledBuf<'_, T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<T> DerefMut for PooledBuf<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl<T> Drop for PooledBuf<'_, T> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returned_buffers_are_reused() {
        let pool: BufferPool<u32> = BufferPool::new(4);
        {
            let mut b = pool.rent(16);
            b.push(1);
            b.push(2);
            assert_eq!(&*b, &[1, 2]);
        }
        assert_eq!(pool.idle_count(), 1);

        let b = pool.rent(8);
        assert!(b.is_empty());
        assert!(b.capacity() >= 16);
        assert_eq!(pool.tracker().reused(), 1);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn too_small_idle_buffers_are_skipped() {
        let pool: BufferPool<u8> = BufferPool::new(4);
        pool.give_back(Vec::with_capacity(2));
        let b = pool.take(64);
        assert!(b.capacity() >= 64);
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn retention_is_bounded() {
        let pool: BufferPool<u8> = BufferPool::new(1);
        let a = pool.rent(4);
        let b = pool.rent(4);
        drop(a);
        drop(b);
        assert_eq!(pool.idle_count(), 1);
        assert_eq!(pool.tracker().outstanding(), 0);
        assert_eq!(pool.tracker().peak_outstanding(), 2);
    }

    #[test]
    fn into_inner_detaches() {
        let pool: BufferPool<i32> = BufferPool::new(4);
        let mut b = pool.rent(4);
        b.extend([3, 4]);
        let v = b.into_inner();
        assert_eq!(v, vec![3, 4]);
        // The emptied shell went back, but it has no storage worth keeping.
        assert_eq!(pool.idle_count(), 0);
    }
}
