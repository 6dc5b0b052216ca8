//! Symmetric difference between a field catalog and a processed-field set.

use fielddrift_core::config::{NamingFamily, RulesConfig};
use fielddrift_core::types::collections::{sorted, FieldSet};
use serde_json::Value;

use super::types::{ConsistencyReport, FieldDiscrepancy, HandlerProcessing};
use crate::extraction::FieldExtractor;
use crate::schema::{FieldCatalog, SchemaReader};

/// Prefix of recommendations about a whole field family the handler ignores.
pub const CRITICAL_PREFIX: &str = "CRITICAL:";

/// Validates catalogs against processed-field sets for a set of naming families.
#[derive(Debug, Clone)]
pub struct ConsistencyValidator {
    families: Vec<NamingFamily>,
}

impl ConsistencyValidator {
    pub fn new(families: Vec<NamingFamily>) -> Self {
        Self { families }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(config.effective_families())
    }

    pub fn families(&self) -> &[NamingFamily] {
        &self.families
    }

    /// Compare `catalog` with the fields `subject` actually processes.
    pub fn validate(&self, catalog: &FieldCatalog, processed: &FieldSet, subject: &str) -> ConsistencyReport {
        let declared = catalog.field_names();

        let missing_in_handler: FieldSet = declared.difference(processed).cloned().collect();
        let missing_in_schema: FieldSet = processed.difference(&declared).cloned().collect();

        let mut discrepancies = Vec::with_capacity(missing_in_handler.len() + missing_in_schema.len());
        for field in &missing_in_handler {
            discrepancies.push(FieldDiscrepancy {
                field_name: field.clone(),
                in_schema: true,
                in_handler: false,
                schema_type: catalog.get(field).map(|e| e.field_type.clone()),
                handler_processing: HandlerProcessing::NotProcessed,
            });
        }
        for field in &missing_in_schema {
            discrepancies.push(FieldDiscrepancy {
                field_name: field.clone(),
                in_schema: false,
                in_handler: true,
                schema_type: None,
                handler_processing: HandlerProcessing::Processed,
            });
        }

        let mut recommendations = Vec::new();
        if !missing_in_handler.is_empty() {
            recommendations.push(format!(
                "Fields declared in the schema but not processed by the handler: {:?}. \
                 Add processing for them or remove them from the schema if they are not needed.",
                sorted(&missing_in_handler)
            ));
        }
        if !missing_in_schema.is_empty() {
            recommendations.push(format!(
                "Fields processed by the handler but not declared in the schema: {:?}. \
                 Declare them in the schema so the contract is complete.",
                sorted(&missing_in_schema)
            ));
        }
        for family in &self.families {
            let declared_members = family.members(&declared);
            if !declared_members.is_empty() && family.members(processed).is_empty() {
                recommendations.push(format!(
                    "{CRITICAL_PREFIX} the schema declares {} fields {:?} but the handler does not process any of them.",
                    family.label, declared_members
                ));
            }
        }

        let is_consistent = discrepancies.is_empty();
        tracing::debug!(
            route = %catalog.route,
            subject,
            is_consistent,
            missing_in_handler = missing_in_handler.len(),
            missing_in_schema = missing_in_schema.len(),
            "validated schema/handler consistency"
        );

        ConsistencyReport {
            route: catalog.route.clone(),
            subject: subject.to_string(),
            is_consistent,
            discrepancies,
            missing_in_handler: missing_in_handler.into_iter().collect(),
            missing_in_schema: missing_in_schema.into_iter().collect(),
            recommendations,
        }
    }

    /// Extract both sides and validate: catalog from `document`, processed
    /// fields from `source`.
    pub fn validate_handler(
        &self,
        reader: &SchemaReader,
        extractor: &FieldExtractor,
        document: &Value,
        source: &str,
        route: &str,
        subject: &str,
    ) -> ConsistencyReport {
        let catalog = reader.read(document, route, None);
        let processed = extractor.processed_fields(source);
        self.validate(&catalog, &processed, subject)
    }
}

impl Default for ConsistencyValidator {
    fn default() -> Self {
        Self::from_config(&RulesConfig::default())
    }
}

/// Validate with the default date/time naming families.
pub fn validate_consistency(catalog: &FieldCatalog, processed: &FieldSet, subject: &str) -> ConsistencyReport {
    ConsistencyValidator::default().validate(catalog, processed, subject)
}
