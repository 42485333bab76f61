//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/browse-content?endpoint=categories` - Cached category list
//! - `GET /api/browse-content?search=..&limit=..` - Bounded search
//! - `GET /api/browse-content?category=..&isActiveOnly=..&limit=..` - Category browse
//! - `GET /stats` - Category cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, BROWSE_PATH};
