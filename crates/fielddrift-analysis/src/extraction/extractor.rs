//! The compiled extraction engine.

use std::sync::LazyLock;

use fielddrift_core::config::ExtractionConfig;
use fielddrift_core::types::collections::{sorted, FieldSet};

use super::patterns::{processed_patterns, update_expression_patterns, FieldPattern};

/// Both recognizer batteries, compiled once and reused across calls.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    processed: Vec<FieldPattern>,
    update: Vec<FieldPattern>,
}

static DEFAULT_EXTRACTOR: LazyLock<FieldExtractor> = LazyLock::new(FieldExtractor::default);

impl FieldExtractor {
    /// Compile recognizers for the configured payload variables.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            processed: processed_patterns(&config.effective_payload_vars()),
            update: update_expression_patterns(),
        }
    }

    /// Fields the handler reads from (or tests on) the request payload.
    pub fn processed_fields(&self, source: &str) -> FieldSet {
        run_battery(&self.processed, source)
    }

    /// Fields the handler writes through an update-expression string.
    pub fn update_expression_fields(&self, source: &str) -> FieldSet {
        run_battery(&self.update, source)
    }

    /// Number of loaded recognizers across both batteries.
    pub fn pattern_count(&self) -> usize {
        self.processed.len() + self.update.len()
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

fn run_battery(patterns: &[FieldPattern], source: &str) -> FieldSet {
    let mut raw = Vec::new();
    for pattern in patterns {
        let before = raw.len();
        pattern.collect_into(source, &mut raw);
        if raw.len() > before {
            tracing::trace!(pattern_id = pattern.id, hits = raw.len() - before, "recognizer matched");
        }
    }
    raw.into_iter().collect()
}

/// Payload fields referenced by `source`, using the default payload variable.
/// Sorted for stable output; callers should treat the result as a set.
pub fn extract_processed_fields(source: &str) -> Vec<String> {
    sorted(&DEFAULT_EXTRACTOR.processed_fields(source))
}

/// Fields included in update-expression construction in `source`.
/// Sorted for stable output; callers should treat the result as a set.
pub fn extract_update_expression_fields(source: &str) -> Vec<String> {
    sorted(&DEFAULT_EXTRACTOR.update_expression_fields(source))
}
