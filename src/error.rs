//! Error types for the catalog API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::{BadRequestResponse, ErrorResponse};
use crate::store::StoreError;

// == Catalog Error Enum ==
/// Unified error type for the catalog API.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No recognized parameter combination
    #[error("Invalid endpoint or missing parameters")]
    BadRequest,

    /// A store scan failed during fetch or search
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::BadRequest => (
                StatusCode::BAD_REQUEST,
                Json(BadRequestResponse::new(self.to_string())),
            )
                .into_response(),
            CatalogError::Store(_) => {
                error!("API error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal(self.to_string())),
                )
                    .into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog API.
pub type Result<T> = std::result::Result<T, CatalogError>;
