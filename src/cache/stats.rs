//! Cache Statistics Module
//!
//! Tracks how the category cache has been serving requests.

use serde::Serialize;

// == Cache Stats ==
/// Counters for a single-slot TTL cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Requests served from a fresh entry
    pub hits: u64,
    /// Requests that found the slot empty or stale
    pub misses: u64,
    /// Recomputations actually run
    pub refreshes: u64,
    /// Refreshes that stored the fallback value instead of a computed one
    pub fallbacks: u64,
    /// Whether the slot currently holds a value, fresh or not
    pub has_entry: bool,
    /// Age of the held value in seconds
    pub age_seconds: Option<i64>,
    /// Seconds until the held value goes stale, zero once it has
    pub ttl_remaining_seconds: Option<i64>,
}

impl CacheStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
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

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn record_fallback(&mut self) {
        self.fallbacks += 1;
    }
}
