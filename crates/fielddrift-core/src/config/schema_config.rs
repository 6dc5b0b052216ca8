//! Schema navigation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the declared-schema field extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchemaConfig {
    /// Operation looked up when the caller does not name one. Default: "post".
    pub default_method: Option<String>,
    /// Request-body media type holding the payload schema. Default: "application/json".
    pub content_type: Option<String>,
}

impl SchemaConfig {
    pub fn effective_default_method(&self) -> String {
        self.default_method
            .as_deref()
            .unwrap_or("post")
            .to_ascii_lowercase()
    }

    pub fn effective_content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or("application/json")
    }
}
