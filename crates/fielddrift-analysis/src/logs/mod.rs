//! Runtime log analysis.
//!
//! Each line is parsed, embedded request bodies are pulled out, and naming
//! patterns are tallied into recommendations. Malformed candidates are
//! dropped silently.

pub mod analysis;
pub mod parse;
pub mod tally;

pub use analysis::{analyze_logs, LogAnalysis, LogAnalyzer};
pub use parse::{extract_request_bodies, parse_log_entry};
pub use tally::{analyze_field_presence, identify_patterns, FamilyMentions, FieldStats, LogPatterns};
