//! Lightweight rent/return/peak tracking for a [`BufferPool`](crate::BufferPool).
//!
//! Keep this optional and cheap. Downstream can wire it to a metrics backend.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct PoolTracker {
    rented: AtomicUsize,
    reused: AtomicUsize,
    outstanding: AtomicUsize,
    peak_outstanding: AtomicUsize,
}

impl PoolTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rent; `reused` is true when an idle buffer was handed out.
    pub fn record_rent(&self, reused: bool) {
        self.rented.fetch_add(1, Ordering::Relaxed);
        if reused {
            self.reused.fetch_add(1, Ordering::Relaxed);
        }
        let now = self.outstanding.fetch_add(1, Ordering::AcqRel) + 1;

        let mut cur = self.peak_outstanding.load(Ordering::Relaxed);
        while now > cur {
            match self.peak_outstanding.compare_exchange(
                cur,
                now,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => cur = observed,
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(reused, outstanding = now, "pool rent");
    }

    pub fn record_return(&self, retained: bool) {
        // Buffers created outside the pool may be handed back; never underflow.
        let _ = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |n| n.checked_sub(1));
        #[cfg(feature = "tracing")]
        tracing::trace!(retained, "pool return");
        #[cfg(not(feature = "tracing"))]
        let _ = retained;
    }

    pub fn rented(&self) -> usize {
        self.rented.load(Ordering::Relaxed)
    }

    pub fn reused(&self) -> usize {
        self.reused.load(Ordering::Relaxed)
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    pub fn peak_outstanding(&self) -> usize {
        self.peak_outstanding.load(Ordering::Relaxed)
    }
}
