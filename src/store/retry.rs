//! Retrying Item Store
//!
//! Decorator that retries transient scan failures with bounded exponential
//! backoff and full jitter.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::warn;

use crate::store::{ItemStore, Page, ScanRequest, StoreResult};

// == Retry Policy ==
/// Backoff parameters for `RetryingItemStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Backoff ceiling for the first retry
    pub base_delay: Duration,
    /// Upper bound on any single backoff
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Backoff ceiling before retry number `retry` (0-based).
    pub fn ceiling(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Picks a uniformly random delay in `[0, ceiling(retry)]`.
    pub fn jittered_delay(&self, retry: u32) -> Duration {
        let ceiling = self.ceiling(retry).as_millis() as u64;
        if ceiling == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=ceiling))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
        }
    }
}

// == Retrying Item Store ==
/// Wraps any `ItemStore` and retries retryable scan errors.
#[derive(Debug)]
pub struct RetryingItemStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> RetryingItemStore<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ItemStore> ItemStore for RetryingItemStore<S> {
    async fn scan(&self, request: ScanRequest) -> StoreResult<Page> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.inner.scan(request.clone()).await {
                Ok(page) => return Ok(page),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = self.policy.jittered_delay(attempt - 1);
                    warn!(
                        "Scan attempt {}/{} failed: {}; retrying in {}ms",
                        attempt,
                        max_attempts,
                        err,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
