//! Log analysis entry point.

use std::collections::BTreeMap;

use fielddrift_core::config::{NamingFamily, RulesConfig};
use serde::{Deserialize, Serialize};

use super::parse::{extract_request_bodies, JsonObject};
use super::tally::{analyze_field_presence, identify_patterns, FieldStats, LogPatterns};
use crate::rules::types::counted;

/// Result of analyzing one batch of log lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogAnalysis {
    pub log_group: String,
    pub total_entries: usize,
    pub error_count: usize,
    pub request_bodies: Vec<JsonObject>,
    pub patterns: LogPatterns,
    pub field_stats: BTreeMap<String, FieldStats>,
    pub recommendations: Vec<String>,
}

impl LogAnalysis {
    /// Distinct field names seen across all request bodies.
    pub fn observed_fields(&self) -> Vec<String> {
        self.field_stats.keys().cloned().collect()
    }
}

#[derive(Debug, Clone)]
pub struct LogAnalyzer {
    families: Vec<NamingFamily>,
}

impl LogAnalyzer {
    pub fn new(families: Vec<NamingFamily>) -> Self {
        Self { families }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(config.effective_families())
    }

    pub fn analyze<S: AsRef<str>>(&self, lines: &[S], log_group: &str) -> LogAnalysis {
        let request_bodies = extract_request_bodies(lines);
        let patterns = identify_patterns(lines, &self.families);
        let field_stats = analyze_field_presence(&request_bodies, &self.families);

        let mut recommendations = Vec::new();
        if patterns.errors > 0 {
            recommendations.push(format!(
                "Found {} in the logs. Review the error messages to identify the problem.",
                counted(patterns.errors, "error", "errors")
            ));
        }
        if patterns.missing_parameters > 0 {
            recommendations.push(format!(
                "Found {}. Check that the client sends every required field.",
                counted(patterns.missing_parameters, "missing-parameter error", "missing-parameter errors")
            ));
        }

        for family in &self.families {
            let fields = family.members(field_stats.keys());
            if fields.is_empty() {
                recommendations.push(format!(
                    "No {} fields found in request bodies. Check that the client sends {} or {}.",
                    family.label, family.canonical, family.alias
                ));
            } else {
                let carrying = request_bodies
                    .iter()
                    .filter(|body| body.keys().any(|k| family.matches(k)))
                    .count();
                recommendations.push(format!(
                    "{} fields found: {:?}. Present in {} requests.",
                    family.label, fields, carrying
                ));
            }
        }

        if patterns.update_expression_logged == 0 {
            recommendations.push(
                "No update-expression logging found. Add logging of the update expression to make debugging easier."
                    .to_string(),
            );
        }

        tracing::debug!(
            log_group,
            entries = lines.len(),
            bodies = request_bodies.len(),
            errors = patterns.errors,
            "analyzed log batch"
        );

        LogAnalysis {
            log_group: log_group.to_string(),
            total_entries: lines.len(),
            error_count: patterns.errors,
            request_bodies,
            patterns,
            field_stats,
            recommendations,
        }
    }
}

impl Default for LogAnalyzer {
    fn default() -> Self {
        Self::from_config(&RulesConfig::default())
    }
}

/// Analyze `lines` with the default date/time families.
pub fn analyze_logs<S: AsRef<str>>(lines: &[S], log_group: &str) -> LogAnalysis {
    LogAnalyzer::default().analyze(lines, log_group)
}
