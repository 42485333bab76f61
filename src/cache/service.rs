//! Category Service
//!
//! Fronts category discovery with the TTL cache and substitutes the
//! fallback list when discovery fails.

use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info};

use crate::cache::{CacheStats, Clock, TtlCache};
use crate::catalog::{fallback_categories, CategoryDiscovery};

/// How long a category list is served before being recomputed.
pub const CATEGORY_TTL_SECS: i64 = 60 * 60;

// == Category Service ==
pub struct CategoryService {
    discovery: CategoryDiscovery,
    cache: TtlCache<Vec<String>>,
}

impl CategoryService {
    pub fn new(discovery: CategoryDiscovery, clock: Arc<dyn Clock>) -> Self {
        Self {
            discovery,
            cache: TtlCache::new(Duration::seconds(CATEGORY_TTL_SECS), clock),
        }
    }

    /// Returns the category list, recomputing it once the cached one is stale.
    ///
    /// Never fails: a discovery error yields the fallback list, and that
    /// list is cached for a full TTL window like any computed value.
    pub async fn categories(&self) -> Vec<String> {
        self.cache
            .get_or_refresh(move || async move {
                info!("Category cache miss, running discovery");
                match self.discovery.discover().await {
                    Ok(categories) => categories,
                    Err(e) => {
                        error!("Category discovery failed, serving fallback list: {}", e);
                        self.cache.record_fallback();
                        fallback_categories()
                    }
                }
            })
            .await
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
