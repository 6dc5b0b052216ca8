//! Error types for every fallible operation in the workspace.
//!
//! Heuristic extraction never fails; only configuration, document parsing,
//! and handler lookup surface errors to the caller.

pub mod config_error;
pub mod error_code;
pub mod locate_error;
pub mod schema_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use locate_error::LocateError;
pub use schema_error::SchemaError;
