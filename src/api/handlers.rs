//! API Handlers
//!
//! HTTP request handlers for the catalog endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::cache::{CategoryService, Clock, SystemClock, CATEGORY_TTL_SECS};
use crate::catalog::{CategoryDiscovery, CategoryFetcher, SearchEngine};
use crate::error::{CatalogError, Result};
use crate::models::{
    BrowseParams, BrowseRoute, CategoriesResponse, ContentResponse, HealthResponse,
    SearchResponse, StatsResponse,
};
use crate::store::SharedItemStore;

/// Application state shared across all handlers.
///
/// The category service owns the only mutable state (the category cache);
/// fetch and search are stateless views over the store.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<CategoryService>,
    pub fetcher: CategoryFetcher,
    pub search: SearchEngine,
}

impl AppState {
    /// Creates a new AppState over `store`, timing the cache with `clock`.
    pub fn new(store: SharedItemStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(
                CategoryDiscovery::new(store.clone()),
                clock,
            )),
            fetcher: CategoryFetcher::new(store.clone()),
            search: SearchEngine::new(store),
        }
    }

    /// Creates a new AppState using wall-clock time.
    pub fn from_store(store: SharedItemStore) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }
}

/// Handler for GET /api/browse-content
///
/// Dispatches on the query string: category list, search, or category
/// browse, in that order of precedence. A query string that does not parse
/// (a repeated key, for one) is answered like any unmatched request.
pub async fn browse_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<BrowseParams>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Unparseable browse query: {}", rejection.body_text());
        CatalogError::BadRequest
    })?;

    match params.route() {
        BrowseRoute::Categories => {
            info!("Category list requested");
            let categories = state.categories.categories().await;
            let cache_control = format!("public, max-age={}", CATEGORY_TTL_SECS);
            Ok((
                [(header::CACHE_CONTROL, cache_control)],
                Json(CategoriesResponse { categories }),
            )
                .into_response())
        }
        BrowseRoute::Search(query) => {
            let outcome = state.search.search(&query).await?;
            Ok(Json(SearchResponse::new(query.text, outcome)).into_response())
        }
        BrowseRoute::Content(query) => {
            let items = state.fetcher.fetch(&query).await?;
            Ok(Json(ContentResponse::new(query.category, query.subcategory, items)).into_response())
        }
        BrowseRoute::Invalid => Err(CatalogError::BadRequest),
    }
}

/// Handler for OPTIONS /api/browse-content
///
/// Bare preflight: 200 with no body. Requests carrying CORS preflight
/// headers are answered by the CORS layer before reaching this.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Handler for GET /stats
///
/// Returns category cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.categories.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
