//! Request and Response models for the catalog API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! parsing query strings and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    parse_limit, BrowseParams, BrowseRoute, DEFAULT_FETCH_LIMIT, DEFAULT_SEARCH_LIMIT,
};
pub use responses::{
    BadRequestResponse, CategoriesResponse, ContentResponse, EndpointHelp, ErrorResponse,
    HealthResponse, SearchResponse, StatsResponse,
};
