//! In-Memory Item Store
//!
//! Process-local backend with the same paging semantics as the hosted table:
//! the page limit bounds records evaluated, filtering happens afterwards.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{ContinuationToken, Item, ItemStore, Page, ScanRequest, StoreError, StoreResult};

// == Memory Item Store ==
/// In-memory item store.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    /// Records in scan order
    items: RwLock<Vec<Item>>,
    /// Hard cap on records evaluated per page, regardless of the request
    max_page_size: Option<usize>,
    /// Errors returned by upcoming scans, in order
    injected_failures: std::sync::Mutex<VecDeque<StoreError>>,
    /// Number of scan calls received
    scans: AtomicUsize,
}

impl MemoryItemStore {
    // == Constructors ==
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
            ..Self::default()
        }
    }

    /// Caps every page at `max_page_size` evaluated records.
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = Some(max_page_size.max(1));
        self
    }

    /// Loads records from a JSON file holding an array of items.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let items: Vec<Item> = serde_json::from_str(&raw)?;
        Ok(Self::with_items(items))
    }

    // == Mutation ==
    /// Appends a record to the end of the scan order.
    pub async fn insert(&self, item: Item) {
        self.items.write().await.push(item);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    // == Test Hooks ==
    /// Makes the next `times` scans fail with `error`.
    pub fn fail_next(&self, times: usize, error: StoreError) {
        if let Ok(mut failures) = self.injected_failures.lock() {
            failures.extend(std::iter::repeat(error).take(times));
        }
    }

    /// Returns the number of scan calls received so far.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> Option<StoreError> {
        self.injected_failures
            .lock()
            .ok()
            .and_then(|mut failures| failures.pop_front())
    }
}

fn decode_offset(token: &ContinuationToken) -> StoreResult<usize> {
    token.as_str().parse().map_err(|_| {
        StoreError::InvalidRequest(format!("unrecognized continuation token '{}'", token))
    })
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn scan(&self, request: ScanRequest) -> StoreResult<Page> {
        self.scans.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        if request.limit == 0 {
            return Err(StoreError::InvalidRequest(
                "scan limit must be at least 1".to_string(),
            ));
        }

        let start = match &request.start {
            Some(token) => decode_offset(token)?,
            None => 0,
        };

        let items = self.items.read().await;
        if start > items.len() {
            return Err(StoreError::InvalidRequest(format!(
                "continuation offset {} beyond end of table",
                start
            )));
        }

        let page_size = match self.max_page_size {
            Some(cap) => request.limit.min(cap),
            None => request.limit,
        };
        let end = (start + page_size).min(items.len());
        let evaluated = &items[start..end];

        let matched: Vec<Item> = evaluated
            .iter()
            .filter(|item| request.filter.matches(item))
            .map(|item| match &request.projection {
                Some(attributes) => item.project(attributes),
                None => item.clone(),
            })
            .collect();

        let next = (end < items.len()).then(|| ContinuationToken::new(end.to_string()));

        debug!(
            "Memory scan: evaluated {}..{} of {}, matched {}",
            start,
            end,
            items.len(),
            matched.len()
        );

        Ok(Page {
            items: matched,
            next,
            scanned_count: evaluated.len(),
        })
    }
}
