//! Executive rollup across every report produced in one diagnostic run.

use serde::{Deserialize, Serialize};

use crate::consistency::ConsistencyReport;
use crate::prompt::PromptAnalysis;
use crate::rules::types::counted;
use crate::rules::DiagnosticReport;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisSummary {
    pub handlers_analyzed: usize,
    pub total_critical: usize,
    pub total_warnings: usize,
    pub routes_checked: usize,
    /// `route <-> subject` for every inconsistent pairing.
    pub inconsistent_routes: Vec<String>,
    pub prompt_issues: usize,
}

impl DiagnosisSummary {
    pub fn from_reports(
        diagnostics: &[DiagnosticReport],
        consistency: &[ConsistencyReport],
        prompt: Option<&PromptAnalysis>,
    ) -> Self {
        Self {
            handlers_analyzed: diagnostics.len(),
            total_critical: diagnostics.iter().map(DiagnosticReport::critical_count).sum(),
            total_warnings: diagnostics.iter().map(DiagnosticReport::warning_count).sum(),
            routes_checked: consistency.len(),
            inconsistent_routes: consistency
                .iter()
                .filter(|r| !r.is_consistent)
                .map(|r| format!("{} <-> {}", r.route, r.subject))
                .collect(),
            prompt_issues: prompt.map_or(0, |p| p.issues.len()),
        }
    }

    /// No critical findings, no inconsistent routes, no prompt issues.
    pub fn is_healthy(&self) -> bool {
        self.total_critical == 0 && self.inconsistent_routes.is_empty() && self.prompt_issues == 0
    }

    /// Conclusions in priority order.
    pub fn conclusions(&self) -> Vec<String> {
        if self.is_healthy() {
            return vec![
                "Schema, handlers and prompt are consistent. If requests still fail, inspect runtime logs for the payloads actually sent.".to_string(),
            ];
        }

        let mut out = Vec::new();
        if self.total_critical > 0 {
            out.push(format!(
                "{} in handler code",
                counted(self.total_critical, "critical problem", "critical problems")
            ));
        }
        if !self.inconsistent_routes.is_empty() {
            out.push(format!(
                "{}/{} routes are inconsistent with their handlers",
                self.inconsistent_routes.len(),
                self.routes_checked
            ));
        }
        if self.prompt_issues > 0 {
            out.push(format!(
                "{} in the agent prompt; the agent may not be computing dates correctly",
                counted(self.prompt_issues, "problem", "problems")
            ));
        }
        out
    }
}
