//! Configuration errors.

use super::error_code::ErrorCode;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file read failed: {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Config parse error: {message}")]
    ParseError { message: String },

    #[error("Config serialize error: {message}")]
    SerializeError { message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ReadFailed { .. } => "CONFIG_READ_FAILED",
            Self::ParseError { .. } => "CONFIG_PARSE_ERROR",
            Self::SerializeError { .. } => "CONFIG_SERIALIZE_ERROR",
            Self::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }
}
