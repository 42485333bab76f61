//! Scan Expression Rendering
//!
//! Renders a `ScanFilter` and projection into the placeholder-based
//! expression syntax hosted key-value tables accept. Every attribute name
//! goes through a `#name` placeholder so reserved words like `status` are
//! always safe.

use std::collections::BTreeMap;

use crate::store::{Condition, ScanFilter};

/// Rendered filter/projection with its placeholder tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanExpression {
    pub filter_expression: Option<String>,
    pub projection_expression: Option<String>,
    /// `#placeholder` -> attribute name
    pub attribute_names: BTreeMap<String, String>,
    /// `:placeholder` -> string value
    pub attribute_values: BTreeMap<String, String>,
}

impl ScanExpression {
    pub fn render(filter: &ScanFilter, projection: Option<&[String]>) -> Self {
        let mut expr = ScanExpression::default();

        let clauses: Vec<String> = filter
            .conditions()
            .iter()
            .map(|condition| match condition {
                Condition::Equals { attribute, value } => {
                    let name = expr.name_placeholder(attribute);
                    let value = expr.value_placeholder(value);
                    format!("{} = {}", name, value)
                }
                Condition::Exists { attribute } => {
                    format!("attribute_exists({})", expr.name_placeholder(attribute))
                }
            })
            .collect();

        if !clauses.is_empty() {
            expr.filter_expression = Some(clauses.join(" AND "));
        }

        if let Some(attributes) = projection.filter(|a| !a.is_empty()) {
            let names: Vec<String> = attributes
                .iter()
                .map(|attribute| expr.name_placeholder(attribute))
                .collect();
            expr.projection_expression = Some(names.join(", "));
        }

        expr
    }

    fn name_placeholder(&mut self, attribute: &str) -> String {
        if let Some((placeholder, _)) = self.attribute_names.iter().find(|(_, a)| *a == attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.attribute_names.len());
        self.attribute_names
            .insert(placeholder.clone(), attribute.to_string());
        placeholder
    }

    fn value_placeholder(&mut self, value: &str) -> String {
        let placeholder = format!(":v{}", self.attribute_values.len());
        self.attribute_values
            .insert(placeholder.clone(), value.to_string());
        placeholder
    }
}
