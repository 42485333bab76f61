//! Bounded Multi-Field Search
//!
//! Case-insensitive substring search over title, description, tags and
//! category. Matching happens client-side on each scanned batch, so the
//! loop is capped by a scan budget as well as the result limit.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{SearchQuery, SEARCH_BATCH_SIZE, SEARCH_SCAN_BUDGET};
use crate::store::{Item, ScanFilter, ScanRequest, SharedItemStore, StoreResult};

// == Search Outcome ==
/// Search results plus how much of the store was examined.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub items: Vec<Item>,
    /// Active items examined by the matcher
    pub scanned: usize,
    /// False when the scan budget ran out before the store did
    pub complete: bool,
}

/// Returns true if any searchable field contains `needle`.
///
/// `needle` must already be lowercase.
pub fn matches_query(item: &Item, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    item.title.as_deref().is_some_and(contains)
        || item.description.as_deref().is_some_and(contains)
        || item
            .tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|tag| contains(tag)))
        || item.category.as_deref().is_some_and(contains)
}

// == Search Engine ==
#[derive(Clone)]
pub struct SearchEngine {
    store: SharedItemStore,
    scan_budget: usize,
}

impl SearchEngine {
    pub fn new(store: SharedItemStore) -> Self {
        Self {
            store,
            scan_budget: SEARCH_SCAN_BUDGET,
        }
    }

    /// Overrides the number of items examined before giving up.
    pub fn with_scan_budget(mut self, scan_budget: usize) -> Self {
        self.scan_budget = scan_budget;
        self
    }

    /// Returns up to `query.limit` matches in scan order.
    ///
    /// The result can hold fewer than `limit` items even when more matches
    /// exist past the scan budget; `complete` reports that case.
    pub async fn search(&self, query: &SearchQuery) -> StoreResult<SearchOutcome> {
        let needle = query.text.trim().to_lowercase();
        if needle.is_empty() || query.limit <= 0 {
            return Ok(SearchOutcome {
                complete: true,
                ..SearchOutcome::default()
            });
        }
        let limit = query.limit as usize;

        let filter = ScanFilter::active();
        let mut items = Vec::new();
        let mut scanned = 0usize;
        let mut next = None;
        let mut exhausted = false;

        loop {
            let request =
                ScanRequest::new(filter.clone(), SEARCH_BATCH_SIZE).starting_at(next.take());
            let page = self.store.scan(request).await?;
            scanned += page.items.len();

            items.extend(
                page.items
                    .into_iter()
                    .filter(|item| matches_query(item, &needle)),
            );
            debug!(
                "Search batch: {} matches, {} scanned",
                items.len(),
                scanned
            );

            match page.next {
                Some(token) => next = Some(token),
                None => {
                    exhausted = true;
                    break;
                }
            }
            if items.len() >= limit || scanned >= self.scan_budget {
                break;
            }
        }

        // Hitting the limit is a full answer; only the budget leaves it partial
        let complete = exhausted || items.len() >= limit;
        items.truncate(limit);

        info!(
            "Search '{}' found {} results (scanned {} items, complete: {})",
            query.text,
            items.len(),
            scanned,
            complete
        );

        Ok(SearchOutcome {
            items,
            scanned,
            complete,
        })
    }
}
