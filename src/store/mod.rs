//! Item Store Module
//!
//! Thin adapter over a partitioned, attribute-filterable table exposing a
//! single paginated scan primitive.

mod error;
mod expression;
mod filter;
pub mod item;
mod memory;
mod retry;

#[cfg(feature = "dynamodb")]
mod dynamo;

use std::sync::Arc;

use async_trait::async_trait;

// Re-export public types
pub use error::{StoreError, StoreResult};
pub use expression::ScanExpression;
pub use filter::{Condition, ContinuationToken, Page, ScanFilter, ScanRequest};
pub use item::Item;
pub use memory::MemoryItemStore;
pub use retry::{RetryPolicy, RetryingItemStore};

#[cfg(feature = "dynamodb")]
pub use dynamo::DynamoItemStore;

// == Item Store Trait ==
/// A table that can be scanned one page at a time.
///
/// Implementations perform no retries of their own; wrap them in
/// `RetryingItemStore` for that.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns one page of records matching `request.filter`.
    ///
    /// A page without a continuation token is the last one.
    async fn scan(&self, request: ScanRequest) -> StoreResult<Page>;
}

#[async_trait]
impl<S: ItemStore + ?Sized> ItemStore for Arc<S> {
    async fn scan(&self, request: ScanRequest) -> StoreResult<Page> {
        (**self).scan(request).await
    }
}

/// Shared handle to a type-erased store.
pub type SharedItemStore = Arc<dyn ItemStore>;
