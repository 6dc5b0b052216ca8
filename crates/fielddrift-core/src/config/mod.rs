//! Configuration system.
//!
//! `fielddrift.toml` at the project root, overridden by `FIELDDRIFT_*`
//! environment variables, falling back to compiled defaults.

pub mod extraction_config;
pub mod fielddrift_config;
pub mod rules_config;
pub mod schema_config;

pub use extraction_config::ExtractionConfig;
pub use fielddrift_config::FieldDriftConfig;
pub use rules_config::{NamingFamily, RulesConfig};
pub use schema_config::SchemaConfig;
