//! Catalog extraction with graceful degradation.
//!
//! Missing nodes are expected (a schema need not define every operation) and
//! yield an empty catalog. Structurally unexpected nodes are logged and also
//! yield an empty catalog, with the reason recorded in [`FieldCatalog::note`].

use std::collections::BTreeMap;

use fielddrift_core::config::SchemaConfig;
use fielddrift_core::errors::SchemaError;
use serde_json::{Map, Value};

use super::types::{FieldCatalog, FieldCatalogEntry};

/// Local `$ref` hops followed before giving up on a schema node.
const MAX_REF_DEPTH: usize = 8;

static NULL_NODE: Value = Value::Null;

/// Reads field catalogs using a configured media type and default method.
#[derive(Debug, Clone)]
pub struct SchemaReader {
    content_type: String,
    default_method: String,
}

impl SchemaReader {
    pub fn new(config: &SchemaConfig) -> Self {
        Self {
            content_type: config.effective_content_type().to_string(),
            default_method: config.effective_default_method(),
        }
    }

    pub fn default_method(&self) -> &str {
        &self.default_method
    }

    /// Field catalog for `route`/`method` (default method when `None`).
    pub fn read(&self, document: &Value, route: &str, method: Option<&str>) -> FieldCatalog {
        let method = method
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| self.default_method.clone());

        match self.navigate(document, route, &method) {
            Ok(catalog) => {
                tracing::debug!(
                    route,
                    method = %method,
                    fields = catalog.len(),
                    required = catalog.required.len(),
                    "extracted field catalog"
                );
                catalog
            }
            Err(e) => {
                tracing::info!(route, method = %method, error = %e, "schema navigation failed, using empty catalog");
                FieldCatalog {
                    note: Some(e.to_string()),
                    ..FieldCatalog::empty(route, &method)
                }
            }
        }
    }

    fn navigate(&self, document: &Value, route: &str, method: &str) -> Result<FieldCatalog, SchemaError> {
        let mut catalog = FieldCatalog::empty(route, method);

        let Some(paths) = child(document, "paths", "$")? else {
            return Ok(catalog);
        };
        let path_ctx = format!("paths[{route}]");
        let Some(path_item) = child(paths, route, "paths")? else {
            return Ok(catalog);
        };
        let Some(operation) = child_ignore_case(path_item, method, &path_ctx)? else {
            return Ok(catalog);
        };
        let op_ctx = format!("{path_ctx}.{method}");
        let Some(body) = child(operation, "requestBody", &op_ctx)? else {
            return Ok(catalog);
        };
        let body = resolve_ref(document, body)?;
        let body_ctx = format!("{op_ctx}.requestBody");
        let Some(content) = child(body, "content", &body_ctx)? else {
            return Ok(catalog);
        };
        let content_ctx = format!("{body_ctx}.content");
        let Some(media) = child(content, &self.content_type, &content_ctx)? else {
            return Ok(catalog);
        };
        let media_ctx = format!("{content_ctx}[{}]", self.content_type);
        let Some(schema) = child(media, "schema", &media_ctx)? else {
            return Ok(catalog);
        };
        let schema = resolve_ref(document, schema)?;
        let schema_ctx = format!("{media_ctx}.schema");
        let Some(schema) = as_object(schema, &schema_ctx)? else {
            return Ok(catalog);
        };

        let required = match schema.get("required") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    let name = item.as_str().ok_or_else(|| SchemaError::Malformed {
                        path: format!("{schema_ctx}.required"),
                        expected: "an array of strings",
                    })?;
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
                names
            }
            Some(_) => {
                return Err(SchemaError::Malformed {
                    path: format!("{schema_ctx}.required"),
                    expected: "an array of strings",
                })
            }
        };

        let props_ctx = format!("{schema_ctx}.properties");
        let properties = match schema.get("properties") {
            None | Some(Value::Null) => None,
            Some(v) => as_object(v, &props_ctx)?,
        };

        let mut fields = BTreeMap::new();
        let mut optional = Vec::new();
        if let Some(properties) = properties {
            for (name, spec) in properties {
                let spec = resolve_ref(document, spec)?;
                let spec = as_object(spec, &format!("{props_ctx}.{name}"))?;
                let is_required = required.iter().any(|r| r == name);
                fields.insert(name.clone(), entry(name, spec, is_required));
                if !is_required {
                    optional.push(name.clone());
                }
            }
        }

        catalog.required = required;
        catalog.optional = optional;
        catalog.fields = fields;
        Ok(catalog)
    }
}

impl Default for SchemaReader {
    fn default() -> Self {
        Self::new(&SchemaConfig::default())
    }
}

/// Field catalog for `route`/`method` using `application/json`.
pub fn extract_request_fields(document: &Value, route: &str, method: &str) -> FieldCatalog {
    SchemaReader::default().read(document, route, Some(method))
}

fn entry(name: &str, spec: Option<&Map<String, Value>>, required: bool) -> FieldCatalogEntry {
    let attr = |key: &str| spec.and_then(|s| s.get(key));
    let field_type = match attr("type") {
        Some(Value::String(t)) => t.clone(),
        Some(Value::Array(types)) => {
            let joined: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
            if joined.is_empty() {
                "unknown".to_string()
            } else {
                joined.join("|")
            }
        }
        _ => "unknown".to_string(),
    };

    FieldCatalogEntry {
        name: name.to_string(),
        field_type,
        description: attr("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        required,
        format: attr("format").and_then(Value::as_str).map(str::to_string),
        example: attr("example").filter(|v| !v.is_null()).cloned(),
    }
}

/// `Null` counts as missing; any other non-mapping node is malformed.
fn as_object<'a>(node: &'a Value, ctx: &str) -> Result<Option<&'a Map<String, Value>>, SchemaError> {
    match node {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        _ => Err(SchemaError::Malformed {
            path: ctx.to_string(),
            expected: "a mapping",
        }),
    }
}

fn child<'a>(node: &'a Value, key: &str, ctx: &str) -> Result<Option<&'a Value>, SchemaError> {
    Ok(as_object(node, ctx)?.and_then(|map| map.get(key)))
}

fn child_ignore_case<'a>(node: &'a Value, key: &str, ctx: &str) -> Result<Option<&'a Value>, SchemaError> {
    Ok(as_object(node, ctx)?.and_then(|map| {
        map.get(key).or_else(|| {
            map.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }))
}

/// Follow local `#/...` references. Unresolvable references resolve to `Null`,
/// which downstream navigation treats as missing.
fn resolve_ref<'a>(document: &'a Value, node: &'a Value) -> Result<&'a Value, SchemaError> {
    let mut current = node;
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
            return Ok(current);
        };
        let Some(pointer) = reference.strip_prefix('#') else {
            return Ok(&NULL_NODE);
        };
        current = document.pointer(pointer).unwrap_or(&NULL_NODE);
    }
    Err(SchemaError::Malformed {
        path: "$ref".to_string(),
        expected: "a reference chain that terminates",
    })
}
