//! Rule evaluation over one handler's source text.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use fielddrift_core::config::{FieldDriftConfig, NamingFamily};
use fielddrift_core::types::collections::FieldSet;
use regex::Regex;

use super::table::RULES;
use super::types::{DiagnosticReport, Finding};
use crate::extraction::FieldExtractor;

/// Everything the rule table needs to know about one handler.
#[derive(Debug, Clone, Default)]
pub struct HandlerFacts {
    pub processed: FieldSet,
    pub update_fields: FieldSet,
    pub has_logging: bool,
    pub logs_update_expression: bool,
}

impl HandlerFacts {
    /// Processed fields belonging to `family`, sorted.
    pub fn family_variants(&self, family: &NamingFamily) -> Vec<String> {
        family.members(&self.processed)
    }
}

/// Compiled rule engine. Immutable after construction.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    extractor: FieldExtractor,
    families: Vec<NamingFamily>,
    min_variants: usize,
    log_markers: Vec<String>,
    marker_matcher: Option<AhoCorasick>,
    update_logged: Option<Regex>,
}

static DEFAULT_ENGINE: LazyLock<RuleEngine> = LazyLock::new(RuleEngine::default);

impl RuleEngine {
    pub fn new(config: &FieldDriftConfig) -> Self {
        Self::with_extractor(config, FieldExtractor::new(&config.extraction))
    }

    /// Build around an already-compiled extractor.
    pub fn with_extractor(config: &FieldDriftConfig, extractor: FieldExtractor) -> Self {
        let log_markers = config.rules.effective_log_markers();

        let marker_matcher = match AhoCorasick::new(&log_markers) {
            Ok(ac) => Some(ac),
            Err(e) => {
                tracing::warn!(error = %e, "log marker automaton failed to build, using substring scan");
                None
            }
        };

        let alternation = log_markers
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        let update_logged = Regex::new(&format!(r"(?i)(?:{alternation}).*update.*expression"))
            .map_err(|e| tracing::warn!(error = %e, "update-expression logging matcher failed to compile"))
            .ok();

        Self {
            extractor,
            families: config.rules.effective_families(),
            min_variants: config.rules.effective_min_variants(),
            log_markers,
            marker_matcher,
            update_logged,
        }
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    pub fn families(&self) -> &[NamingFamily] {
        &self.families
    }

    /// Extract the facts the rule table evaluates.
    pub fn facts(&self, source: &str) -> HandlerFacts {
        let has_logging = match &self.marker_matcher {
            Some(ac) => ac.is_match(source),
            None => self.log_markers.iter().any(|m| source.contains(m.as_str())),
        };
        let logs_update_expression = self
            .update_logged
            .as_ref()
            .is_some_and(|re| re.is_match(source));

        HandlerFacts {
            processed: self.extractor.processed_fields(source),
            update_fields: self.extractor.update_expression_fields(source),
            has_logging,
            logs_update_expression,
        }
    }

    /// Run the whole battery against `source`.
    pub fn analyze(&self, subject: &str, source: &str) -> DiagnosticReport {
        let facts = self.facts(source);
        let findings = self.evaluate(&facts);
        let report = DiagnosticReport::from_findings(subject, findings);

        tracing::debug!(
            subject,
            processed = facts.processed.len(),
            update_fields = facts.update_fields.len(),
            critical = report.critical_count(),
            warnings = report.warning_count(),
            "analyzed handler"
        );
        report
    }

    /// Evaluate every rule against precomputed facts.
    pub fn evaluate(&self, facts: &HandlerFacts) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in RULES {
            if rule.check.per_family() {
                for family in &self.families {
                    if rule.check.fires(facts, Some(family), self.min_variants) {
                        findings.push(rule.finding(facts, Some(family)));
                    }
                }
            } else if rule.check.fires(facts, None, self.min_variants) {
                findings.push(rule.finding(facts, None));
            }
        }
        findings
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(&FieldDriftConfig::default())
    }
}

/// Analyze `source` with the default configuration.
pub fn analyze_handler(subject: &str, source: &str) -> DiagnosticReport {
    DEFAULT_ENGINE.analyze(subject, source)
}
