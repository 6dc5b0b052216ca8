//! # fielddrift-analysis
//!
//! Analysis engine for fielddrift: pattern-based field extraction from
//! handler source, schema field catalogs, schema/handler consistency checks,
//! the diagnostic rule battery, and runtime log analysis.
//!
//! Every operation is a pure function of its inputs. Compiled pattern
//! batteries are immutable and shared, so all entry points are `Send + Sync`.

pub mod consistency;
pub mod diagnoser;
pub mod extraction;
pub mod logs;
pub mod prompt;
pub mod rules;
pub mod schema;
pub mod summary;
pub mod template;

pub use diagnoser::Diagnoser;
