//! Field Pattern Extractor.
//!
//! Two independent batteries of regex recognizers run over raw handler text:
//! one for fields read from the request payload, one for fields written by a
//! database update expression. Matches are unioned and deduplicated.

pub mod extractor;
pub mod patterns;

pub use extractor::{extract_processed_fields, extract_update_expression_fields, FieldExtractor};
pub use patterns::{CaptureMode, FieldPattern};
