//! Bounded Category Fetch
//!
//! Exact-match category (and optional subcategory) browse, capped at a
//! caller-supplied item limit.

use tracing::{debug, info};

use crate::catalog::{FetchQuery, FETCH_PAGE_SIZE};
use crate::store::item::{CATEGORY, SUBCATEGORY};
use crate::store::{Item, ScanFilter, ScanRequest, SharedItemStore, StoreResult};

// == Category Fetcher ==
#[derive(Clone)]
pub struct CategoryFetcher {
    store: SharedItemStore,
}

impl CategoryFetcher {
    pub fn new(store: SharedItemStore) -> Self {
        Self { store }
    }

    /// Returns at most `query.limit` active items of the requested category.
    ///
    /// Each page asks for `min(remaining, 100)` records so the store is never
    /// asked for much more than the caller can use.
    pub async fn fetch(&self, query: &FetchQuery) -> StoreResult<Vec<Item>> {
        if query.limit <= 0 {
            return Ok(Vec::new());
        }
        let limit = query.limit as usize;

        let mut filter = ScanFilter::active().and_equals(CATEGORY, query.category.as_str());
        if let Some(subcategory) = &query.subcategory {
            filter = filter.and_equals(SUBCATEGORY, subcategory.as_str());
        }

        let mut items: Vec<Item> = Vec::new();
        let mut next = None;

        loop {
            let page_size = (limit - items.len()).min(FETCH_PAGE_SIZE);
            let request = ScanRequest::new(filter.clone(), page_size).starting_at(next.take());

            let page = self.store.scan(request).await?;
            debug!(
                "Fetch page for '{}': {} matched of {} evaluated",
                query.category,
                page.items.len(),
                page.scanned_count
            );
            items.extend(page.items);

            if items.len() >= limit {
                break;
            }
            match page.next {
                Some(token) => next = Some(token),
                None => break,
            }
        }

        items.truncate(limit);
        info!(
            "Returning {} items for category {} (subcategory: {})",
            items.len(),
            query.category,
            query.subcategory.as_deref().unwrap_or("none")
        );

        Ok(items)
    }
}
