//! Facade owning one configuration and every compiled engine built from it.

use fielddrift_core::config::FieldDriftConfig;
use fielddrift_core::types::collections::FieldSet;
use serde_json::Value;

use crate::consistency::{ConsistencyReport, ConsistencyValidator};
use crate::extraction::FieldExtractor;
use crate::logs::{LogAnalysis, LogAnalyzer};
use crate::prompt::{analyze_prompt, PromptAnalysis};
use crate::rules::{DiagnosticReport, HandlerComparison, RuleEngine};
use crate::schema::{FieldCatalog, SchemaReader};
use crate::summary::DiagnosisSummary;

/// Stateless between calls: every method is a pure function of its arguments
/// and the immutable configuration captured at construction.
#[derive(Debug, Clone)]
pub struct Diagnoser {
    config: FieldDriftConfig,
    rules: RuleEngine,
    schema: SchemaReader,
    consistency: ConsistencyValidator,
    logs: LogAnalyzer,
}

impl Diagnoser {
    pub fn new(config: FieldDriftConfig) -> Self {
        let extractor = FieldExtractor::new(&config.extraction);
        Self {
            rules: RuleEngine::with_extractor(&config, extractor),
            schema: SchemaReader::new(&config.schema),
            consistency: ConsistencyValidator::from_config(&config.rules),
            logs: LogAnalyzer::from_config(&config.rules),
            config,
        }
    }

    pub fn config(&self) -> &FieldDriftConfig {
        &self.config
    }

    pub fn extractor(&self) -> &FieldExtractor {
        self.rules.extractor()
    }

    pub fn processed_fields(&self, source: &str) -> FieldSet {
        self.extractor().processed_fields(source)
    }

    pub fn update_expression_fields(&self, source: &str) -> FieldSet {
        self.extractor().update_expression_fields(source)
    }

    /// Field catalog for `route`; `method` defaults to the configured one.
    pub fn catalog(&self, document: &Value, route: &str, method: Option<&str>) -> FieldCatalog {
        self.schema.read(document, route, method)
    }

    pub fn analyze_handler(&self, subject: &str, source: &str) -> DiagnosticReport {
        self.rules.analyze(subject, source)
    }

    pub fn validate_consistency(&self, catalog: &FieldCatalog, processed: &FieldSet, subject: &str) -> ConsistencyReport {
        self.consistency.validate(catalog, processed, subject)
    }

    /// Catalog `route` from `document`, extract `source`, and validate.
    pub fn validate_handler(&self, document: &Value, source: &str, route: &str, subject: &str) -> ConsistencyReport {
        self.consistency
            .validate_handler(&self.schema, self.extractor(), document, source, route, subject)
    }

    pub fn compare_handlers(
        &self,
        left_subject: &str,
        left_source: &str,
        right_subject: &str,
        right_source: &str,
    ) -> HandlerComparison {
        self.rules.compare(left_subject, left_source, right_subject, right_source)
    }

    pub fn analyze_logs<S: AsRef<str>>(&self, lines: &[S], log_group: &str) -> LogAnalysis {
        self.logs.analyze(lines, log_group)
    }

    pub fn analyze_prompt(&self, prompt: &str) -> PromptAnalysis {
        analyze_prompt(prompt)
    }

    pub fn summarize(
        &self,
        diagnostics: &[DiagnosticReport],
        consistency: &[ConsistencyReport],
        prompt: Option<&PromptAnalysis>,
    ) -> DiagnosisSummary {
        DiagnosisSummary::from_reports(diagnostics, consistency, prompt)
    }
}

impl Default for Diagnoser {
    fn default() -> Self {
        Self::new(FieldDriftConfig::default())
    }
}
