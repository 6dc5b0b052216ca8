//! # fielddrift-core
//!
//! Foundation crate for the fielddrift diagnostics engine.
//! Defines shared collection types, errors, config, and tracing setup.
//! The analysis crate depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{FieldDriftConfig, NamingFamily};
pub use errors::error_code::ErrorCode;
pub use types::collections::{FieldSet, FxHashSet};
