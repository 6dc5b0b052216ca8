//! Naming-pattern tallies and per-field presence statistics.

use std::collections::BTreeMap;

use fielddrift_core::config::NamingFamily;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parse::JsonObject;

/// Sample values kept per family field.
const MAX_SAMPLES: usize = 3;

/// Lines mentioning each spelling of one family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMentions {
    /// Lines containing the canonical name anywhere (case-insensitive).
    pub canonical: usize,
    /// Lines containing the alias as a quoted key or value.
    pub alias: usize,
}

/// Per-line keyword tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPatterns {
    pub errors: usize,
    pub missing_parameters: usize,
    pub successful_updates: usize,
    pub update_expression_logged: usize,
    /// Keyed by family label.
    pub families: BTreeMap<String, FamilyMentions>,
}

/// Count lines matching each keyword heuristic.
pub fn identify_patterns<S: AsRef<str>>(lines: &[S], families: &[NamingFamily]) -> LogPatterns {
    let mut patterns = LogPatterns {
        families: families
            .iter()
            .map(|f| (f.label.clone(), FamilyMentions::default()))
            .collect(),
        ..Default::default()
    };

    let spellings: Vec<(String, String, String)> = families
        .iter()
        .map(|f| {
            let alias = f.alias.to_lowercase();
            (f.canonical.to_lowercase(), format!("\"{alias}\""), format!("'{alias}'"))
        })
        .collect();

    for line in lines {
        let lower = line.as_ref().to_lowercase();

        if lower.contains("error") || lower.contains("exception") {
            patterns.errors += 1;
        }
        if lower.contains("missing") && lower.contains("parameter") {
            patterns.missing_parameters += 1;
        }
        if lower.contains("success") {
            patterns.successful_updates += 1;
        }
        if lower.contains("updateexpression") || lower.contains("update_expression") {
            patterns.update_expression_logged += 1;
        }

        for (family, (canonical, double_quoted, single_quoted)) in families.iter().zip(&spellings) {
            let mentions = patterns.families.entry(family.label.clone()).or_default();
            if lower.contains(canonical.as_str()) {
                mentions.canonical += 1;
            }
            if lower.contains(double_quoted.as_str()) || lower.contains(single_quoted.as_str()) {
                mentions.alias += 1;
            }
        }
    }

    patterns
}

/// Occurrence count and sample values for one body field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub count: usize,
    /// Up to three values, collected only for family fields.
    pub sample_values: Vec<Value>,
}

/// How often each field appears across `bodies`.
pub fn analyze_field_presence(bodies: &[JsonObject], families: &[NamingFamily]) -> BTreeMap<String, FieldStats> {
    let mut stats: BTreeMap<String, FieldStats> = BTreeMap::new();
    for body in bodies {
        for (field, value) in body {
            let entry = stats.entry(field.clone()).or_default();
            entry.count += 1;
            if entry.sample_values.len() < MAX_SAMPLES && families.iter().any(|f| f.matches(field)) {
                entry.sample_values.push(value.clone());
            }
        }
    }
    stats
}
