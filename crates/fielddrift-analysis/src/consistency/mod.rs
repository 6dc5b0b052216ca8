//! Consistency checks between a schema catalog and the fields a handler processes.

pub mod types;
pub mod validator;

pub use types::{ConsistencyReport, FieldDiscrepancy, HandlerProcessing};
pub use validator::{validate_consistency, ConsistencyValidator};
