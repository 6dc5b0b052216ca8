//! Finding and report types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Finding severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What kind of change a finding asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingCategory {
    Code,
    Configuration,
    Data,
}

impl FindingCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Configuration => "configuration",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One rule outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub category: FindingCategory,
    pub description: String,
    pub location: String,
    pub recommendation: String,
}

/// All findings for one handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub subject: String,
    pub findings: Vec<Finding>,
    pub summary: String,
    /// True exactly when at least one finding is critical.
    pub requires_code_change: bool,
    pub requires_config_change: bool,
}

impl DiagnosticReport {
    /// Build a report, deriving the summary and verdicts from `findings`.
    pub fn from_findings(subject: &str, findings: Vec<Finding>) -> Self {
        let critical = count(&findings, Severity::Critical);
        let warnings = count(&findings, Severity::Warning);

        let summary = if critical > 0 {
            format!(
                "Found {} and {}",
                counted(critical, "critical problem", "critical problems"),
                counted(warnings, "warning", "warnings")
            )
        } else if warnings > 0 {
            format!("Found {}", counted(warnings, "warning", "warnings"))
        } else {
            "No critical problems found".to_string()
        };

        Self {
            subject: subject.to_string(),
            findings,
            summary,
            requires_code_change: critical > 0,
            requires_config_change: false,
        }
    }

    pub fn critical_count(&self) -> usize {
        count(&self.findings, Severity::Critical)
    }

    pub fn warning_count(&self) -> usize {
        count(&self.findings, Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        count(&self.findings, Severity::Info)
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }
}

fn count(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

/// `n` followed by the noun form matching it.
pub(crate) fn counted(n: usize, singular: &str, plural: &str) -> String {
    format!("{n} {}", if n == 1 { singular } else { plural })
}
