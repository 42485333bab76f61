//! Content Catalog - cached category discovery, bounded browse and search
//!
//! Serves a content catalog out of a table that only supports filtered,
//! paginated scans.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
