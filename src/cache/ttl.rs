//! TTL Cache Module
//!
//! Single-slot, time-boxed cache with single-flight refresh.

use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock};

// == TTL Cache ==
/// Holds at most one value, served while younger than the TTL.
///
/// Expiry is purely time-based; there is no invalidation. A stale value is
/// never served, it is only replaced.
pub struct TtlCache<V> {
    /// The one slot
    slot: RwLock<Option<CacheEntry<V>>>,
    /// Held for the duration of a refresh
    refresh_gate: Mutex<()>,
    stats: StdMutex<CacheStats>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone + Send + Sync> TtlCache<V> {
    // == Constructor ==
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            stats: StdMutex::new(CacheStats::new()),
            ttl,
            clock,
        }
    }

    // == Get ==
    /// Returns the value if it is still fresh, recording a hit or miss.
    pub async fn get(&self) -> Option<V> {
        let value = self.fresh_value().await;
        let hit = value.is_some();
        self.with_stats(|stats| {
            if hit {
                stats.record_hit()
            } else {
                stats.record_miss()
            }
        });
        value
    }

    // == Put ==
    /// Replaces the slot wholesale, stamped with the current time.
    pub async fn put(&self, value: V) {
        self.put_at(value, self.clock.now()).await;
    }

    async fn put_at(&self, value: V, computed_at: DateTime<Utc>) {
        *self.slot.write().await = Some(CacheEntry::new(value, computed_at));
    }

    /// Returns the held entry, fresh or stale, without touching the stats.
    pub async fn peek(&self) -> Option<CacheEntry<V>> {
        self.slot.read().await.clone()
    }

    // == Get Or Refresh ==
    /// Serves the fresh value, or recomputes it with `refresh` and stores it.
    ///
    /// Concurrent callers that miss queue on one refresh gate; whoever gets
    /// it second finds the slot fresh again and skips its own refresh.
    ///
    /// The new entry is stamped with the time the refresh started, so a slow
    /// refresh does not extend the freshness window.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get().await {
            return value;
        }

        let _gate = self.refresh_gate.lock().await;
        if let Some(value) = self.fresh_value().await {
            debug!("Cache refreshed by a concurrent request");
            return value;
        }

        self.with_stats(CacheStats::record_refresh);
        let started = self.clock.now();
        let value = refresh().await;
        self.put_at(value.clone(), started).await;
        value
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entry = self.peek().await;

        let mut stats = self
            .stats
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        stats.has_entry = entry.is_some();
        stats.age_seconds = entry.as_ref().map(|e| e.age(now).num_seconds());
        stats.ttl_remaining_seconds = entry
            .as_ref()
            .map(|e| e.ttl_remaining(now, self.ttl).num_seconds());
        stats
    }

    /// Counts a refresh that stored a fallback value.
    pub fn record_fallback(&self) {
        self.with_stats(CacheStats::record_fallback);
    }

    async fn fresh_value(&self) -> Option<V> {
        let now = self.clock.now();
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    fn with_stats(&self, f: impl FnOnce(&mut CacheStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            f(&mut stats);
        }
    }
}
