//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::catalog::SearchOutcome;
use crate::store::Item;

/// Response body for `endpoint=categories`
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Response body for a search request
///
/// `count` may fall short of the requested limit; `complete` says whether
/// the scan budget cut the search off.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub items: Vec<Item>,
    pub query: String,
    pub count: usize,
    /// Active items examined
    pub scanned: usize,
    pub complete: bool,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, outcome: SearchOutcome) -> Self {
        Self {
            count: outcome.items.len(),
            items: outcome.items,
            query: query.into(),
            scanned: outcome.scanned,
            complete: outcome.complete,
        }
    }
}

/// Response body for a category browse request
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub items: Vec<Item>,
    pub category: String,
    /// Serialized as `null` when no subcategory was requested
    pub subcategory: Option<String>,
    pub count: usize,
}

impl ContentResponse {
    pub fn new(category: impl Into<String>, subcategory: Option<String>, items: Vec<Item>) -> Self {
        Self {
            count: items.len(),
            items,
            category: category.into(),
            subcategory,
        }
    }
}

/// Usage hints returned with a 400
#[derive(Debug, Clone, Serialize)]
pub struct EndpointHelp {
    pub categories: &'static str,
    pub search: &'static str,
    pub content: &'static str,
}

impl Default for EndpointHelp {
    fn default() -> Self {
        Self {
            categories: "/api/browse-content?endpoint=categories",
            search: "/api/browse-content?search=your-query&limit=20",
            content: "/api/browse-content?category=webgames&isActiveOnly=true&limit=500",
        }
    }
}

/// Response body when no parameter combination matched
#[derive(Debug, Clone, Serialize)]
pub struct BadRequestResponse {
    pub error: String,
    pub endpoints: EndpointHelp,
}

impl BadRequestResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            endpoints: EndpointHelp::default(),
        }
    }
}

/// Error response body for server-side failures
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Underlying cause
    pub message: String,
}

impl ErrorResponse {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "Internal server error".to_string(),
            message: message.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub refreshes: u64,
    pub fallbacks: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    pub has_entry: bool,
    pub age_seconds: Option<i64>,
    pub ttl_remaining_seconds: Option<i64>,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            refreshes: stats.refreshes,
            fallbacks: stats.fallbacks,
            has_entry: stats.has_entry,
            age_seconds: stats.age_seconds,
            ttl_remaining_seconds: stats.ttl_remaining_seconds,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
