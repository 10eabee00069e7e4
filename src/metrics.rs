//! Operation counters for the LRU cache (feature `metrics`).
//!
//! Counters on mutating paths are plain `u64` fields bumped through
//! `&mut self`. Read-only paths (`peek_lru`, `recency_rank`) go through
//! [`MetricsCell`] so they can count behind a shared reference.
//! [`LruMetricsSnapshot`] is the copyable point-in-time view handed to
//! callers.

use std::cell::Cell;

/// A metrics-only counter cell for `&self` paths.
///
/// # Safety
/// Only safe when all accesses are externally synchronized. In this
/// crate the concurrent wrapper holds a `Mutex` around the whole cache,
/// and the single-threaded core is not `Sync`-shared by construction.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// SAFETY:
// All access to MetricsCell is externally synchronized (see type docs).
// Metrics are observational and do not affect correctness.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}

/// Live counters embedded in the cache core.
#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
}

impl LruMetrics {
    #[inline]
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    #[inline]
    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    #[inline]
    pub fn record_insert_update(&mut self) {
        self.insert_calls += 1;
        self.insert_updates += 1;
    }

    #[inline]
    pub fn record_insert_new(&mut self) {
        self.insert_calls += 1;
        self.insert_new += 1;
    }

    #[inline]
    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    #[inline]
    pub fn record_remove(&mut self, found: bool) {
        self.remove_calls += 1;
        if found {
            self.remove_found += 1;
        }
    }

    #[inline]
    pub fn record_pop_lru(&mut self, found: bool) {
        self.pop_lru_calls += 1;
        if found {
            self.pop_lru_found += 1;
        }
    }

    #[inline]
    pub fn record_peek_lru(&self, found: bool) {
        self.peek_lru_calls.incr();
        if found {
            self.peek_lru_found.incr();
        }
    }

    #[inline]
    pub fn record_touch(&mut self, found: bool) {
        self.touch_calls += 1;
        if found {
            self.touch_found += 1;
        }
    }

    #[inline]
    pub fn record_recency_rank(&self, found: bool) {
        self.recency_rank_calls.incr();
        if found {
            self.recency_rank_found.incr();
        }
    }
}

/// Point-in-time copy of [`LruMetrics`] plus size gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}
