//! Schema document loading.

use fielddrift_core::errors::SchemaError;

/// Parse a schema document from YAML or JSON text into a JSON value tree.
///
/// The text goes through `serde_yaml::Value` first so that non-string YAML
/// keys (unquoted status codes such as `200:`) become string keys.
pub fn parse_document(text: &str) -> Result<serde_json::Value, SchemaError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| SchemaError::Parse {
        message: e.to_string(),
    })?;
    serde_json::to_value(yaml).map_err(|e| SchemaError::Parse {
        message: e.to_string(),
    })
}
