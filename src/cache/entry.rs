//! Cache Entry Module
//!
//! A computed value stamped with the time it was computed.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// The single value held by a `TtlCache`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The cached value
    pub value: V,
    /// When the value was computed
    pub computed_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, computed_at: DateTime<Utc>) -> Self {
        Self { value, computed_at }
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry is fresh only while its age is strictly
    /// below the TTL. Once the full TTL has elapsed it is stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }

    // == Age ==
    /// Time since the value was computed. Never negative.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.computed_at).max(Duration::zero())
    }

    /// Remaining freshness, zero once stale.
    pub fn ttl_remaining(&self, now: DateTime<Utc>, ttl: Duration) -> Duration {
        (ttl - self.age(now)).max(Duration::zero())
    }
}
