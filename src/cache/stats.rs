//! Cache Statistics Module
//!
//! Tracks cache performance metrics: hits, misses, sets, deletes and expirations.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache performance metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of values written
    pub sets: u64,
    /// Number of entries removed by delete or invalidation
    pub deletes: u64,
    /// Number of entries dropped because their TTL elapsed
    pub expirations: u64,
    /// Current number of entries, including expired ones not yet reaped
    pub size: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of lookups served.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }
}

// == Stats Counters ==
/// Lock-free cumulative counters owned by a cache store.
///
/// Counters only ever grow; clearing the store leaves them untouched.
#[derive(Debug, Default)]
pub struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    expirations: AtomicU64,
}

impl StatsCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deletes(&self, count: u64) {
        self.deletes.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_expirations(&self, count: u64) {
        self.expirations.fetch_add(count, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads all counters into a [`CacheStats`] with the given size.
    pub fn snapshot(&self, size: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            size,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let stats = StatsCounters::new().snapshot(0);
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let counters = StatsCounters::new();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        assert_eq!(counters.snapshot(0).hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let counters = StatsCounters::new();
        counters.record_hit();
        counters.record_miss();

        let stats = counters.snapshot(0);
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.requests(), 2);
    }

    #[test]
    fn test_bulk_counters() {
        let counters = StatsCounters::new();
        counters.record_set();
        counters.record_deletes(3);
        counters.record_expirations(2);
        counters.record_expirations(0);

        let stats = counters.snapshot(7);
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.deletes, 3);
        assert_eq!(stats.expirations, 2);
        assert_eq!(stats.size, 7);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats {
            hits: 4,
            misses: 1,
            sets: 2,
            deletes: 0,
            expirations: 1,
            size: 2,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["hits"], 4);
        assert_eq!(json["expirations"], 1);
        assert_eq!(json["size"], 2);
    }
}
