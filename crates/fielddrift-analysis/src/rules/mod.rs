//! Diagnostic rules: a fixed battery of heuristic checks over one
//! handler's source text.

pub mod compare;
pub mod evaluator;
pub mod table;
pub mod types;

pub use compare::{compare_handlers, FamilyComparison, HandlerComparison};
pub use evaluator::{analyze_handler, HandlerFacts, RuleEngine};
pub use table::{DiagnosticRule, RuleCheck, RULES};
pub use types::{DiagnosticReport, Finding, FindingCategory, Severity};
