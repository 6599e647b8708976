// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::Value;

use std::collections::BTreeMap;

/// Flat mapping from key path to string value.
pub type FlatMap = BTreeMap<String, String>;

/// Marker emitted for a null value.
pub const NIL_MARKER: &str = "<nil>";
/// Marker emitted for an empty array.
pub const EMPTY_ARRAY_MARKER: &str = "[]";
/// Marker emitted for an empty object.
pub const EMPTY_OBJECT_MARKER: &str = "{}";

// Non-string object keys become their JSON form, matching how Value
// serializes them.
fn field_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.to_string(),
        _ => key.to_string(),
    }
}

/// Recursively flatten `value` into `out`, keyed under `prefix`.
///
/// Each scalar leaf becomes one `(path, string)` entry. Null and empty
/// containers emit the sentinel markers so that a downstream store can tell
/// an empty container apart from a scalar empty string. Never fails:
/// [`Value::Undefined`] degrades to `""`.
pub fn flatten_value(prefix: &str, value: &Value, out: &mut FlatMap) {
    match value {
        Value::Null => {
            out.insert(prefix.to_string(), NIL_MARKER.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.to_string());
        }
        Value::Array(a) if a.is_empty() => {
            out.insert(prefix.to_string(), EMPTY_ARRAY_MARKER.to_string());
        }
        Value::Array(a) => {
            for (i, elem) in a.iter().enumerate() {
                flatten_value(&format!("{prefix}[{i}]"), elem, out);
            }
        }
        Value::Object(fields) if fields.is_empty() => {
            out.insert(prefix.to_string(), EMPTY_OBJECT_MARKER.to_string());
        }
        Value::Object(fields) => {
            for (k, v) in fields.iter() {
                let name = field_name(k);
                let child = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}.{name}")
                };
                flatten_value(&child, v, out);
            }
        }
        Value::Undefined => {
            out.insert(prefix.to_string(), String::new());
        }
    }
}

/// Flatten every top-level field of `fields` with an empty prefix.
pub fn flatten_map(fields: &BTreeMap<Value, Value>) -> FlatMap {
    let mut out = FlatMap::new();
    for (k, v) in fields.iter() {
        flatten_value(&field_name(k), v, &mut out);
    }
    out
}
