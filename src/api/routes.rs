//! API Routes
//!
//! Configures the Axum router with the catalog endpoints.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    browse_handler, health_handler, preflight_handler, stats_handler, AppState,
};

/// Path of the catalog endpoint.
pub const BROWSE_PATH: &str = "/api/browse-content";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/browse-content` - Categories, search or category browse
/// - `OPTIONS /api/browse-content` - CORS preflight
/// - `GET /stats` - Category cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: any origin; GET, POST and OPTIONS; Content-Type header
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(BROWSE_PATH, get(browse_handler).options(preflight_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
