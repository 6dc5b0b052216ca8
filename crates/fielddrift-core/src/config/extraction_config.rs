//! Field extraction configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the handler-source field recognizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Names of the variables holding the decoded request payload.
    /// Default: `["body"]`.
    pub payload_vars: Option<Vec<String>>,
}

impl ExtractionConfig {
    /// Returns the effective payload variable names, defaulting to `["body"]`.
    /// Entries that are not identifiers are dropped.
    pub fn effective_payload_vars(&self) -> Vec<String> {
        let vars: Vec<String> = self
            .payload_vars
            .iter()
            .flatten()
            .map(|v| v.trim())
            .filter(|v| is_identifier(v))
            .map(str::to_string)
            .collect();
        if vars.is_empty() {
            vec!["body".to_string()]
        } else {
            vars
        }
    }
}

/// Letters, digits, `_` and `$`, not starting with a digit.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
