//! Export of the reconciled field set
//!
//! Two shapes: a `{mode, fields}` JSON document, and the same document
//! flattened into `path = value` pairs.

use intake_domain::ReviewState;
use intake_engine::{Engine, FieldRow};
use serde_json::{json, Map, Value};

/// Mode label used when the caller does not name one
pub const DEFAULT_MODE: &str = "intake";

/// Build the `{mode, fields}` document for every registered field
pub fn export_document(mode: &str, engine: &Engine) -> Value {
    let fields: Map<String, Value> = engine
        .table()
        .into_iter()
        .map(|row| (row.key.clone(), row_value(&row)))
        .collect();
    json!({
        "mode": mode,
        "fields": fields,
    })
}

fn row_value(row: &FieldRow) -> Value {
    json!({
        "label": row.label,
        "required": row.required,
        "value": row.value,
        "confidence": row.confidence.value(),
        "provenance": row.provenance.as_str(),
        "confirmed": row.state == ReviewState::Confirmed,
        "state": row.state.as_str(),
        "remediation": row.remediation.map(|choice| choice.as_str()),
    })
}

/// Flatten a JSON document into dotted path/value pairs
///
/// Array elements are addressed as `path[i]`; nulls become empty strings.
pub fn flatten(document: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    flatten_into(String::new(), document, &mut pairs);
    pairs
}

fn flatten_into(path: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_into(child_path, child, pairs);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                flatten_into(format!("{}[{}]", path, idx), child, pairs);
            }
        }
        Value::Null => pairs.push((path, String::new())),
        Value::String(s) => pairs.push((path, s.clone())),
        other => pairs.push((path, other.to_string())),
    }
}
