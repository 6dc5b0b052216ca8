//! Schema document errors.

use super::error_code::ErrorCode;

/// Errors raised while reading a declared-schema document.
///
/// `Malformed` never reaches callers of catalog extraction: it is caught there
/// and turned into an empty catalog with a note.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema document parse error: {message}")]
    Parse { message: String },

    #[error("Malformed schema node at {path}: expected {expected}")]
    Malformed { path: String, expected: &'static str },
}

impl ErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "SCHEMA_PARSE_ERROR",
            Self::Malformed { .. } => "SCHEMA_MALFORMED_NODE",
        }
    }
}
