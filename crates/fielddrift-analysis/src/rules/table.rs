//! The static rule table: each entry pairs a condition with a finding template.
//!
//! Family rules are instantiated once per configured naming family; the rest
//! run once per handler. Every entry is evaluated; none short-circuits another.

use fielddrift_core::config::NamingFamily;

use super::evaluator::HandlerFacts;
use super::types::{Finding, FindingCategory, Severity};

/// The condition a rule tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCheck {
    /// No update-expression field belongs to the family.
    FamilyMissingFromUpdate,
    /// Fewer than `min_variants` processed fields belong to the family.
    SingleFamilyVariant,
    /// No logging marker anywhere in the source.
    NoLogging,
    /// No line logs the update expression.
    UpdateExpressionNotLogged,
}

impl RuleCheck {
    /// Whether the rule runs once per naming family.
    pub fn per_family(&self) -> bool {
        matches!(self, Self::FamilyMissingFromUpdate | Self::SingleFamilyVariant)
    }

    /// Whether the condition holds. Family rules never fire without a family.
    pub fn fires(&self, facts: &HandlerFacts, family: Option<&NamingFamily>, min_variants: usize) -> bool {
        match (self, family) {
            (Self::FamilyMissingFromUpdate, Some(family)) => {
                !facts.update_fields.iter().any(|f| family.matches(f))
            }
            (Self::SingleFamilyVariant, Some(family)) => {
                facts.processed.iter().filter(|f| family.matches(f)).count() < min_variants
            }
            (Self::NoLogging, _) => !facts.has_logging,
            (Self::UpdateExpressionNotLogged, _) => !facts.logs_update_expression,
            (_, None) => false,
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticRule {
    pub id: &'static str,
    pub check: RuleCheck,
    pub severity: Severity,
    pub category: FindingCategory,
    pub location: &'static str,
}

/// The battery, in reporting order.
pub static RULES: &[DiagnosticRule] = &[
    DiagnosticRule {
        id: "update-expression-missing-family",
        check: RuleCheck::FamilyMissingFromUpdate,
        severity: Severity::Critical,
        category: FindingCategory::Code,
        location: "update expression construction",
    },
    DiagnosticRule {
        id: "single-family-variant",
        check: RuleCheck::SingleFamilyVariant,
        severity: Severity::Warning,
        category: FindingCategory::Code,
        location: "request body processing",
    },
    DiagnosticRule {
        id: "no-logging",
        check: RuleCheck::NoLogging,
        severity: Severity::Warning,
        category: FindingCategory::Code,
        location: "handler function",
    },
    DiagnosticRule {
        id: "update-expression-not-logged",
        check: RuleCheck::UpdateExpressionNotLogged,
        severity: Severity::Info,
        category: FindingCategory::Code,
        location: "database update operation",
    },
];

impl DiagnosticRule {
    /// Rule id, qualified with the family label for family rules.
    pub fn qualified_id(&self, family: Option<&NamingFamily>) -> String {
        match family {
            Some(family) if self.check.per_family() => format!("{}/{}", self.id, family.label),
            _ => self.id.to_string(),
        }
    }

    /// Render the finding template.
    pub fn finding(&self, facts: &HandlerFacts, family: Option<&NamingFamily>) -> Finding {
        let (description, recommendation) = match (self.check, family) {
            (RuleCheck::FamilyMissingFromUpdate, Some(family)) => (
                format!("Field {} not found in update expression", family.canonical),
                format!(
                    "Include {} in the update expression whenever it is received in the request body",
                    family.canonical
                ),
            ),
            (RuleCheck::SingleFamilyVariant, Some(family)) => (
                format!(
                    "Only one {} variant is processed ({}): {:?}",
                    family.label,
                    family.needle,
                    facts.family_variants(family)
                ),
                format!(
                    "Consider accepting both {} and {} for compatibility",
                    family.alias, family.canonical
                ),
            ),
            (RuleCheck::NoLogging, _) => (
                "No logging found in the handler".to_string(),
                "Add logging to make debugging easier".to_string(),
            ),
            (RuleCheck::UpdateExpressionNotLogged, _) => (
                "The update expression is not logged before it is executed".to_string(),
                "Log the update expression and its values before executing the update".to_string(),
            ),
            (check, None) => (format!("{check:?}"), String::new()),
        };

        Finding {
            rule_id: self.qualified_id(family),
            severity: self.severity,
            category: self.category,
            description,
            location: self.location.to_string(),
            recommendation,
        }
    }
}
