//! Schema Field Extractor.
//!
//! Reads the request-payload field catalog for one route/operation out of a
//! declared-schema document (`paths[route][method].requestBody.content[..].schema`).

pub mod catalog;
pub mod document;
pub mod types;

pub use catalog::{extract_request_fields, SchemaReader};
pub use document::parse_document;
pub use types::{FieldCatalog, FieldCatalogEntry};
