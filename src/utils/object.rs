use serde_json::Value;

/// Whether `value` takes part in recursive merging.
///
/// Every JSON object qualifies, including the empty one; arrays, strings,
/// numbers, booleans and `null` are terminals that get replaced wholesale.
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Key presence check that does not look at the stored value, so a key
/// mapped to `null` still counts. Arrays answer for decimal indices.
pub fn has_property(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key),
        Value::Array(items) => key
            .parse::<usize>()
            .map(|idx| idx < items.len() && idx.to_string() == key)
            .unwrap_or(false),
        _ => false,
    }
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
