//! Catalog Module
//!
//! Scan-driven catalog operations: category discovery, bounded category
//! fetch and bounded multi-field search.

mod discovery;
mod fetch;
mod search;


// Re-export public types
pub use discovery::CategoryDiscovery;
pub use fetch::CategoryFetcher;
pub use search::{matches_query, SearchEngine, SearchOutcome};

// == Public Constants ==
/// Records evaluated per discovery page
pub const DISCOVERY_PAGE_SIZE: usize = 1000;

/// Upper bound on records requested per fetch page
pub const FETCH_PAGE_SIZE: usize = 100;

/// Records evaluated per search batch
pub const SEARCH_BATCH_SIZE: usize = 100;

/// Active items a search may examine before giving up
pub const SEARCH_SCAN_BUDGET: usize = 1000;

/// Served in place of discovered categories when discovery fails
pub const FALLBACK_CATEGORIES: [&str; 11] = [
    "art",
    "books",
    "culture",
    "food",
    "history",
    "movies",
    "science",
    "technology",
    "webgames",
    "wikipedia",
    "youtube",
];

/// Returns the fallback category list as owned strings.
pub fn fallback_categories() -> Vec<String> {
    FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

// == Queries ==
/// Category browse parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    /// Exact category match
    pub category: String,
    /// Exact subcategory match, AND-ed with the category
    pub subcategory: Option<String>,
    /// Maximum items returned; non-positive yields nothing
    pub limit: i64,
}

impl FetchQuery {
    pub fn new(category: impl Into<String>, limit: i64) -> Self {
        Self {
            category: category.into(),
            subcategory: None,
            limit,
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }
}

/// Free-text search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Maximum items returned; non-positive yields nothing
    pub limit: i64,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: i64) -> Self {
        Self {
            text: text.into(),
            limit,
        }
    }
}
