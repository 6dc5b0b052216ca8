//! Side-by-side comparison of how two handlers accept family fields.

use serde::{Deserialize, Serialize};

use super::evaluator::RuleEngine;
use fielddrift_core::types::collections::sorted;

/// How the two handlers treat one naming family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyComparison {
    pub family: String,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub differs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerComparison {
    pub left_subject: String,
    pub right_subject: String,
    pub families: Vec<FamilyComparison>,
    /// Update-expression fields of the left handler.
    pub left_update_fields: Vec<String>,
    pub recommendations: Vec<String>,
}

impl HandlerComparison {
    pub fn any_differs(&self) -> bool {
        self.families.iter().any(|f| f.differs)
    }
}

impl RuleEngine {
    /// Compare the family variants each handler processes.
    pub fn compare(
        &self,
        left_subject: &str,
        left_source: &str,
        right_subject: &str,
        right_source: &str,
    ) -> HandlerComparison {
        let left = self.extractor().processed_fields(left_source);
        let right = self.extractor().processed_fields(right_source);

        let mut families = Vec::with_capacity(self.families().len());
        let mut recommendations = Vec::new();
        for family in self.families() {
            let l = family.members(&left);
            let r = family.members(&right);
            let differs = l != r;
            if differs {
                recommendations.push(format!(
                    "{left_subject} and {right_subject} handle {} fields differently. \
                     Standardize both to accept {} and {}.",
                    family.label, family.alias, family.canonical
                ));
            }
            families.push(FamilyComparison {
                family: family.label.clone(),
                left: l,
                right: r,
                differs,
            });
        }

        HandlerComparison {
            left_subject: left_subject.to_string(),
            right_subject: right_subject.to_string(),
            families,
            left_update_fields: sorted(&self.extractor().update_expression_fields(left_source)),
            recommendations,
        }
    }
}

/// Compare two handlers with the default configuration.
pub fn compare_handlers(
    left_subject: &str,
    left_source: &str,
    right_subject: &str,
    right_source: &str,
) -> HandlerComparison {
    RuleEngine::default().compare(left_subject, left_source, right_subject, right_source)
}
