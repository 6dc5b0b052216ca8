//! Handler lookup errors.

use super::error_code::ErrorCode;

/// A caller-supplied handler name could not be resolved in its container.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("Handler '{name}' not found in template")]
    HandlerNotFound { name: String },

    #[error("Handler '{name}' has no inline source block")]
    NoInlineSource { name: String },
}

impl ErrorCode for LocateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::HandlerNotFound { .. } => "LOCATE_HANDLER_NOT_FOUND",
            Self::NoInlineSource { .. } => "LOCATE_NO_INLINE_SOURCE",
        }
    }
}
