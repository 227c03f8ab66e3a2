//! Growable materialization buffer.
//!
//! Collects an unknown number of items into an exactly-sized `Vec`:
//!
//! 1. The first buffer starts at `starting_capacity` and doubles until it
//!    holds `resize_limit` items.
//! 2. Past the limit the first buffer is frozen. Each further buffer is sized
//!    to the total collected so far (capped by `max_capacity`), and filled
//!    buffers are pushed onto an auxiliary list, never touched again.
//! 3. `into_vec` hands the first buffer over untouched if nothing was
//!    chained; otherwise it allocates once and moves every buffer in, in
//!    append order.
//!
//! This keeps allocations at O(log N) and copies each item at most once
//! after the first buffer is frozen.

use std::mem;

use seqflow_core::{BufferConfig, Error, Result};

use crate::pool::BufferPool;

pub struct GrowableBuffer<'p, T> {
    first: Vec<T>,
    // Filled chained buffers, in append order. List storage may be pooled.
    full: Vec<Vec<T>>,
    current: Vec<T>,
    in_first: bool,
    count: usize,
    starting_capacity: usize,
    resize_limit: usize,
    max_capacity: usize,
    list_pool: Option<&'p BufferPool<Vec<T>>>,
}

impl<'p, T> Default for GrowableBuffer<'p, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, T> GrowableBuffer<'p, T> {
    /// Buffer tuned by the process-wide [`BufferConfig`].
    pub fn new() -> Self {
        Self::with_config(BufferConfig::global())
    }

    pub fn with_config(cfg: &BufferConfig) -> Self {
        Self::build(cfg, None)
    }

    /// Buffer whose auxiliary list storage is rented from `pool` and returned
    /// on drop.
    pub fn with_pool(cfg: &BufferConfig, pool: &'p BufferPool<Vec<T>>) -> Self {
        Self::build(cfg, Some(pool))
    }

    fn build(cfg: &BufferConfig, list_pool: Option<&'p BufferPool<Vec<T>>>) -> Self {
        Self {
            first: Vec::new(),
            full: Vec::new(),
            current: Vec::new(),
            in_first: true,
            count: 0,
            starting_capacity: cfg.starting_capacity.max(1),
            resize_limit: cfg.resize_limit.max(cfg.starting_capacity.max(1)),
            max_capacity: cfg.max_capacity,
            list_pool,
        }
    }

    /// Append one item. Fails `CapacityExceeded` once `max_capacity` items
    /// have been collected.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.count >= self.max_capacity {
            return Err(Error::CapacityExceeded {
                requested: self.count + 1,
                max: self.max_capacity,
            });
        }
        if self.in_first {
            if self.first.len() == self.first.capacity() {
                self.grow();
            }
        } else if self.current.len() == self.current.capacity() {
            self.grow();
        }

        if self.in_first {
            self.first.push(item);
        } else {
            self.current.push(item);
        }
        self.count += 1;
        Ok(())
    }

    #[cold]
    fn grow(&mut self) {
        let room = self.max_capacity - self.count;

        if self.in_first && self.count < self.resize_limit {
            let next = if self.count == 0 {
                self.starting_capacity
            } else {
                self.count * 2
            };
            let next = next.min(self.resize_limit).min(self.count + room);
            self.first.reserve_exact(next - self.first.len());
            #[cfg(feature = "tracing")]
            tracing::trace!(capacity = next, "growable buffer: resize first");
            return;
        }

        // Chain a buffer sized to everything collected so far.
        let next = self.count.min(room);
        let filled = mem::replace(&mut self.current, Vec::with_capacity(next));
        if self.in_first {
            self.in_first = false;
        } else {
            if self.full.capacity() == 0 {
                if let Some(pool) = self.list_pool {
                    self.full = pool.take(4);
                }
            }
            self.full.push(filled);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(count = self.count, capacity = next, "growable buffer: chain");
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buffers addressed by [`buffer`](Self::buffer).
    pub fn buffer_count(&self) -> usize {
        if self.in_first {
            1
        } else {
            2 + self.full.len()
        }
    }

    /// Buffers in append order: first, then the filled list, then current.
    pub fn buffer(&self, index: usize) -> Option<&[T]> {
        match index {
            0 => Some(&self.first),
            _ if self.in_first => None,
            i if i <= self.full.len() => Some(&self.full[i - 1]),
            i if i == self.full.len() + 1 => Some(&self.current),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.buffer_count())
            .filter_map(move |i| self.buffer(i))
            .flatten()
    }

    /// Exactly-sized result, in append order.
    pub fn into_vec(mut self) -> Vec<T> {
        if self.in_first {
            return mem::take(&mut self.first);
        }
        let mut out = Vec::with_capacity(self.count);
        out.append(&mut self.first);
        for buf in self.full.iter_mut() {
            out.append(buf);
        }
        out.append(&mut self.current);
        out
    }

    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.into_vec().into_boxed_slice()
    }
}

impl<T> Drop for GrowableBuffer<'_, T> {
    fn drop(&mut self) {
        if let Some(pool) = self.list_pool {
            if self.full.capacity() > 0 {
                pool.give_back(mem::take(&mut self.full));
            }
        }
    }
}
