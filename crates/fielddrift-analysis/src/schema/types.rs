//! Field catalog types.

use std::collections::BTreeMap;

use fielddrift_core::types::collections::FieldSet;
use serde::{Deserialize, Serialize};

/// Declared metadata for one request field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCatalogEntry {
    pub name: String,
    /// Declared type, `"unknown"` when absent.
    pub field_type: String,
    pub description: String,
    pub required: bool,
    pub format: Option<String>,
    pub example: Option<serde_json::Value>,
}

/// The request-payload fields a schema declares for one route/operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub route: String,
    pub method: String,
    /// Required names in declaration order.
    pub required: Vec<String>,
    /// Declared properties not listed as required.
    pub optional: Vec<String>,
    /// Per-field metadata keyed by name.
    pub fields: BTreeMap<String, FieldCatalogEntry>,
    /// Set when navigation hit a structurally unexpected node and the
    /// catalog was degraded to empty.
    pub note: Option<String>,
}

impl FieldCatalog {
    /// A catalog with no fields for `route`/`method`.
    pub fn empty(route: &str, method: &str) -> Self {
        Self {
            route: route.to_string(),
            method: method.to_string(),
            ..Default::default()
        }
    }

    /// All declared field names.
    pub fn field_names(&self) -> FieldSet {
        self.fields.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&FieldCatalogEntry> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.required.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
