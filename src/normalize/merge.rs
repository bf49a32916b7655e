use serde_json::{Map, Value};

/// Deep-merge `source` into `target`
///
/// Objects merge key by key; any other value in `source` (arrays and
/// `null` included) replaces what `target` held.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => merge_maps(target, source),
        (target, source) => *target = source,
    }
}

/// Deep-merge every entry of `source` into `target`
pub fn merge_maps(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}
