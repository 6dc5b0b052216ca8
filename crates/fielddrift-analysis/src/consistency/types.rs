//! Consistency report types.

use serde::{Deserialize, Serialize};

/// Whether the handler processes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerProcessing {
    Processed,
    NotProcessed,
}

impl HandlerProcessing {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::NotProcessed => "not_processed",
        }
    }
}

/// A field present on exactly one side of the schema/handler pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiscrepancy {
    pub field_name: String,
    pub in_schema: bool,
    pub in_handler: bool,
    /// Declared type when the field is on the schema side.
    pub schema_type: Option<String>,
    pub handler_processing: HandlerProcessing,
}

/// Result of validating one route against one handler.
///
/// `is_consistent` holds exactly when `discrepancies`, `missing_in_handler`
/// and `missing_in_schema` are all empty. Sequence order is unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub route: String,
    pub subject: String,
    pub is_consistent: bool,
    pub discrepancies: Vec<FieldDiscrepancy>,
    pub missing_in_handler: Vec<String>,
    pub missing_in_schema: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ConsistencyReport {
    /// Recommendations flagged as critical.
    pub fn critical_recommendations(&self) -> impl Iterator<Item = &String> {
        self.recommendations
            .iter()
            .filter(|r| r.starts_with(super::validator::CRITICAL_PREFIX))
    }
}
