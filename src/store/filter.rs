//! Scan Filter Module
//!
//! Attribute conditions and scan request/response shapes shared by every
//! item store backend.

use std::fmt;

use crate::store::item::{self, Item};

// == Condition ==
/// A single attribute predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Attribute is present and equal to `value`
    Equals { attribute: String, value: String },
    /// Attribute is present, whatever its value
    Exists { attribute: String },
}

impl Condition {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Condition::Equals { attribute, value } => {
                item.string_attribute(attribute) == Some(value.as_str())
            }
            Condition::Exists { attribute } => item.has_attribute(attribute),
        }
    }
}

// == Scan Filter ==
/// Conjunction of conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    conditions: Vec<Condition>,
}

impl ScanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter every catalog operation starts from: `status = active`.
    pub fn active() -> Self {
        Self::new().and_equals(item::STATUS, item::STATUS_ACTIVE)
    }

    pub fn and_equals(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition::Equals {
            attribute: attribute.into(),
            value: value.into(),
        });
        self
    }

    pub fn and_exists(mut self, attribute: impl Into<String>) -> Self {
        self.conditions.push(Condition::Exists {
            attribute: attribute.into(),
        });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.conditions.iter().all(|c| c.matches(item))
    }
}

// == Continuation Token ==
/// Opaque cursor returned by a partial scan.
///
/// Only the backend that issued a token knows how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Scan Request ==
/// Parameters for one page of a scan.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub filter: ScanFilter,
    /// Restricts returned attributes; `None` returns whole records
    pub projection: Option<Vec<String>>,
    /// Maximum number of records the store evaluates for this page
    pub limit: usize,
    /// Resume point from a previous page
    pub start: Option<ContinuationToken>,
}

impl ScanRequest {
    pub fn new(filter: ScanFilter, limit: usize) -> Self {
        Self {
            filter,
            projection: None,
            limit,
            start: None,
        }
    }

    pub fn with_projection<I, T>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.projection = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn starting_at(mut self, start: Option<ContinuationToken>) -> Self {
        self.start = start;
        self
    }
}

// == Page ==
/// One scan response.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Records that passed the filter
    pub items: Vec<Item>,
    /// `None` once the scan is exhausted
    pub next: Option<ContinuationToken>,
    /// Records the store evaluated, before filtering
    pub scanned_count: usize,
}

impl Page {
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
