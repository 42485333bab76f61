//! Category Discovery
//!
//! Exhaustive scan collecting every distinct category of the active set.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::catalog::DISCOVERY_PAGE_SIZE;
use crate::store::item::CATEGORY;
use crate::store::{ScanFilter, ScanRequest, SharedItemStore, StoreResult};

// == Category Discovery ==
/// Walks every page of the store and unions the category attribute.
#[derive(Clone)]
pub struct CategoryDiscovery {
    store: SharedItemStore,
}

impl CategoryDiscovery {
    pub fn new(store: SharedItemStore) -> Self {
        Self { store }
    }

    /// Returns the sorted, deduplicated categories of all active items.
    ///
    /// There is no page budget: the loop runs until the store reports no
    /// continuation token. Any page error aborts the whole discovery.
    pub async fn discover(&self) -> StoreResult<Vec<String>> {
        let filter = ScanFilter::active().and_exists(CATEGORY);
        let mut categories = BTreeSet::new();
        let mut next = None;
        let mut pages = 0usize;
        let mut total_items = 0usize;

        loop {
            pages += 1;
            let request = ScanRequest::new(filter.clone(), DISCOVERY_PAGE_SIZE)
                .with_projection([CATEGORY])
                .starting_at(next.take());

            let page = self.store.scan(request).await?;
            total_items += page.items.len();

            categories.extend(page.items.into_iter().filter_map(|item| item.category));

            debug!(
                "Discovery page {}: {} categories so far",
                pages,
                categories.len()
            );

            match page.next {
                Some(token) => next = Some(token),
                None => break,
            }
        }

        info!(
            "Category discovery complete: {} pages, {} items, {} categories",
            pages,
            total_items,
            categories.len()
        );

        Ok(categories.into_iter().collect())
    }
}
