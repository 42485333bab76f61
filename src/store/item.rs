//! Item Module
//!
//! Typed view of one catalog record as held by the item store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// == Attribute Names ==
/// Identity attribute of every record
pub const URL: &str = "url";
/// Display title
pub const TITLE: &str = "title";
/// Free-text description
pub const DESCRIPTION: &str = "description";
/// Category identifier; its presence drives category discovery
pub const CATEGORY: &str = "bfCategory";
/// Optional subcategory identifier
pub const SUBCATEGORY: &str = "bfSubcategory";
/// Ordered tag list
pub const TAGS: &str = "bfTags";
/// Lifecycle status; only `active` records are ever served
pub const STATUS: &str = "status";

/// Status value marking a record as servable.
pub const STATUS_ACTIVE: &str = "active";

// == Item ==
/// A single content record.
///
/// Known attributes are typed; anything else the ingestion pipeline wrote is
/// kept in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identity key
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "bfCategory",
        alias = "category",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        rename = "bfSubcategory",
        alias = "subcategory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subcategory: Option<String>,
    #[serde(
        rename = "bfTags",
        alias = "tags",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Attributes this service does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Creates an active item with the given identity and category.
    pub fn active(url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            category: Some(category.into()),
            status: Some(STATUS_ACTIVE.to_string()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns true if the record participates in discovery, fetch and search.
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(STATUS_ACTIVE)
    }

    // == Attribute Access ==
    /// Looks up a scalar string attribute by its store name.
    ///
    /// Tags are a list and never compare as a scalar.
    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        match name {
            URL => Some(self.url.as_str()),
            TITLE => self.title.as_deref(),
            DESCRIPTION => self.description.as_deref(),
            CATEGORY => self.category.as_deref(),
            SUBCATEGORY => self.subcategory.as_deref(),
            STATUS => self.status.as_deref(),
            TAGS => None,
            other => self.extra.get(other).and_then(Value::as_str),
        }
    }

    /// Returns true if the attribute is present on the record.
    pub fn has_attribute(&self, name: &str) -> bool {
        match name {
            URL => true,
            TITLE => self.title.is_some(),
            DESCRIPTION => self.description.is_some(),
            CATEGORY => self.category.is_some(),
            SUBCATEGORY => self.subcategory.is_some(),
            TAGS => self.tags.is_some(),
            STATUS => self.status.is_some(),
            other => self.extra.contains_key(other),
        }
    }

    // == Projection ==
    /// Returns a copy carrying only the named attributes plus the identity.
    pub fn project(&self, attributes: &[String]) -> Item {
        let keep = |name: &str| attributes.iter().any(|a| a == name);

        Item {
            url: self.url.clone(),
            title: self.title.clone().filter(|_| keep(TITLE)),
            description: self.description.clone().filter(|_| keep(DESCRIPTION)),
            category: self.category.clone().filter(|_| keep(CATEGORY)),
            subcategory: self.subcategory.clone().filter(|_| keep(SUBCATEGORY)),
            tags: self.tags.clone().filter(|_| keep(TAGS)),
            status: self.status.clone().filter(|_| keep(STATUS)),
            extra: self
                .extra
                .iter()
                .filter(|(k, _)| keep(k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_store_names() {
        let item: Item = serde_json::from_value(json!({
            "url": "https://example.com",
            "title": "Example",
            "bfCategory": "tech",
            "bfSubcategory": "rust",
            "bfTags": ["systems", "lang"],
            "status": "active",
            "thumbnail": "https://example.com/t.png"
        }))
        .unwrap();

        assert_eq!(item.category.as_deref(), Some("tech"));
        assert_eq!(item.subcategory.as_deref(), Some("rust"));
        assert_eq!(item.tags.as_ref().unwrap().len(), 2);
        assert!(item.is_active());
        assert_eq!(item.extra["thumbnail"], "https://example.com/t.png");
    }

    #[test]
    fn test_deserialize_plain_names() {
        let item: Item = serde_json::from_value(json!({
            "url": "u",
            "category": "books",
            "tags": ["a"]
        }))
        .unwrap();

        assert_eq!(item.category.as_deref(), Some("books"));
        assert_eq!(item.tags, Some(vec!["a".to_string()]));
        assert!(!item.is_active());
    }

    #[test]
    fn test_serialize_passes_extra_through() {
        let mut item = Item::active("u", "art");
        item.extra.insert("score".to_string(), json!(7));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["bfCategory"], "art");
        assert_eq!(value["score"], 7);
        assert!(value.get("title").is_none());
    }

    #[test]
    fn test_string_attribute_lookup() {
        let mut item = Item::active("u", "art").with_tags(["x"]);
        item.extra.insert("region".to_string(), json!("eu"));

        assert_eq!(item.string_attribute(CATEGORY), Some("art"));
        assert_eq!(item.string_attribute(STATUS), Some(STATUS_ACTIVE));
        assert_eq!(item.string_attribute("region"), Some("eu"));
        assert_eq!(item.string_attribute(TAGS), None);
        assert!(item.has_attribute(TAGS));
        assert!(!item.has_attribute(TITLE));
    }

    #[test]
    fn test_project_keeps_named_attributes() {
        let item = Item::active("u", "art")
            .with_title("T")
            .with_description("D");

        let projected = item.project(&[CATEGORY.to_string()]);
        assert_eq!(projected.url, "u");
        assert_eq!(projected.category.as_deref(), Some("art"));
        assert!(projected.title.is_none());
        assert!(projected.status.is_none());
    }
}
