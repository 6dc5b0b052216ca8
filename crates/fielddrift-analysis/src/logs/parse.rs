//! Log line parsing and request-body extraction.

use serde_json::{Map, Value};

/// A decoded JSON object.
pub type JsonObject = Map<String, Value>;

/// Parse a log line as a JSON object, or failing that, the widest `{...}`
/// span embedded in one of its lines.
pub fn parse_log_entry(line: &str) -> Option<JsonObject> {
    let trimmed = line.trim();
    if trimmed.starts_with('{') {
        if let Some(object) = parse_object(trimmed) {
            return Some(object);
        }
    }

    line.lines().find_map(|l| {
        let start = l.find('{')?;
        let end = l.rfind('}')?;
        if start < end {
            parse_object(&l[start..=end])
        } else {
            None
        }
    })
}

/// Request bodies found under `body` or `event.body` of each parsed line.
/// Bodies may be inline objects or JSON-encoded strings.
pub fn extract_request_bodies<S: AsRef<str>>(lines: &[S]) -> Vec<JsonObject> {
    let mut bodies = Vec::new();
    for line in lines {
        let Some(entry) = parse_log_entry(line.as_ref()) else {
            continue;
        };
        if let Some(body) = entry.get("body").and_then(decode_body) {
            bodies.push(body);
        }
        if let Some(body) = entry
            .get("event")
            .and_then(Value::as_object)
            .and_then(|event| event.get("body"))
            .and_then(decode_body)
        {
            bodies.push(body);
        }
    }
    tracing::debug!(lines = lines.len(), bodies = bodies.len(), "extracted request bodies");
    bodies
}

fn decode_body(value: &Value) -> Option<JsonObject> {
    match value {
        Value::String(encoded) => parse_object(encoded),
        Value::Object(object) => Some(object.clone()),
        _ => None,
    }
}

fn parse_object(text: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
