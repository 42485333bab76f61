//! Store error types
//!
//! Failures surfaced by an item store scan.

use thiserror::Error;

// == Store Error Enum ==
/// Error returned by an `ItemStore` scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store rejected the request for capacity reasons
    #[error("Scan throttled: {0}")]
    Throttled(String),

    /// Store or the network path to it failed transiently
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Request was malformed (bad filter, bad continuation token)
    #[error("Invalid scan request: {0}")]
    InvalidRequest(String),

    /// A returned record could not be decoded
    #[error("Failed to decode record: {0}")]
    Decode(String),
}

impl StoreError {
    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Throttled(_) | StoreError::Unavailable(_))
    }
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(StoreError::Throttled("slow down".into()).is_retryable());
        assert!(StoreError::Unavailable("reset".into()).is_retryable());
        assert!(!StoreError::InvalidRequest("bad token".into()).is_retryable());
        assert!(!StoreError::Decode("not a map".into()).is_retryable());
    }
}
