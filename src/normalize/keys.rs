use super::casing::camel_case;
use serde_json::{Map, Value};

/// Recursively camel-case every object key in a JSON value
///
/// Arrays keep their order and length; scalars and `null` come back
/// unchanged. JSON has no date type, so date-like values only ever appear
/// as strings and are never restructured.
pub fn camelize_keys(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(camelize_keys).collect()),
        Value::Object(obj) => Value::Object(camelize_map(obj)),
        other => other.clone(),
    }
}

/// Camel-case the keys of a map and recursively normalize its values
pub fn camelize_map(obj: &Map<String, Value>) -> Map<String, Value> {
    obj.iter()
        .map(|(key, value)| (camel_case(key), camelize_keys(value)))
        .collect()
}

/// Camel-case the keys of a map, copying values verbatim
pub fn camelize_top_level(obj: &Map<String, Value>) -> Map<String, Value> {
    obj.iter()
        .map(|(key, value)| (camel_case(key), value.clone()))
        .collect()
}
