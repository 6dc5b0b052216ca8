//! Stable machine-readable error codes.

/// Every error enum maps each variant to a stable code string so callers can
/// branch on it without matching display text.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
