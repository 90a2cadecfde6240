//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, expirations and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of gets that returned a value
    pub hits: u64,
    /// Number of gets that found nothing (absent or expired)
    pub misses: u64,
    /// Number of entries reclaimed because a get found them expired
    pub expirations: u64,
    /// Number of entries evicted to stay within capacity
    pub evictions: u64,
    /// Current number of entries held, expired-but-untouched included
    pub total_entries: usize,
    /// Maximum number of entries
    pub capacity: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

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

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// An expired entry was found by a get. Also counts as a miss.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new(8);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.capacity, 8);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::new(1).hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new(1);
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_expiration_counts_as_miss() {
        let mut stats = CacheStats::new(1);
        stats.record_expiration();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_eviction() {
        let mut stats = CacheStats::new(1);
        stats.record_eviction();
        stats.record_eviction();
        assert_eq!(stats.evictions, 2);
    }
}
