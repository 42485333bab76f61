//! Request DTOs for the catalog API
//!
//! Query parameters of `GET /api/browse-content` and the routing decision
//! derived from them.

use serde::Deserialize;

use crate::catalog::{FetchQuery, SearchQuery};

/// Default item cap for category browse
pub const DEFAULT_FETCH_LIMIT: i64 = 500;

/// Default item cap for search
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Query string of the browse endpoint. Every parameter is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseParams {
    pub endpoint: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub is_active_only: Option<String>,
    pub limit: Option<String>,
}

/// Operation selected by a request's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseRoute {
    Categories,
    Search(SearchQuery),
    Content(FetchQuery),
    Invalid,
}

impl BrowseParams {
    /// Picks the operation, in precedence order: categories, search,
    /// category browse. Blank values count as absent.
    pub fn route(&self) -> BrowseRoute {
        if self.endpoint.as_deref() == Some("categories") {
            return BrowseRoute::Categories;
        }

        if let Some(text) = non_blank(&self.search) {
            let limit = parse_limit(self.limit.as_deref(), DEFAULT_SEARCH_LIMIT);
            return BrowseRoute::Search(SearchQuery::new(text, limit));
        }

        if let (Some(category), Some(_)) = (non_blank(&self.category), &self.is_active_only) {
            let limit = parse_limit(self.limit.as_deref(), DEFAULT_FETCH_LIMIT);
            let mut query = FetchQuery::new(category, limit);
            if let Some(subcategory) = non_blank(&self.subcategory) {
                query = query.with_subcategory(subcategory);
            }
            return BrowseRoute::Content(query);
        }

        BrowseRoute::Invalid
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Parses a limit leniently: optional leading whitespace and sign, then
/// leading digits; anything after the digits is ignored.
///
/// Missing, unparseable and zero values fall back to `default`. Negative
/// values are returned as-is.
pub fn parse_limit(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => default,
        Ok(n) if negative => -n,
        Ok(n) => n,
    }
}
