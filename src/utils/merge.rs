//! Recursive merge of JSON objects.
//!
//! - objects merge key by key, recursively
//! - arrays and primitives are replaced entirely, never combined
//! - `null` in the source overwrites whatever the target held
//! - a key missing from the source keeps the target's value
//!
//! `serde_json::Value` has no `undefined`; an absent key is the "no override"
//! signal. Values are owned trees, so inputs cannot be cyclic, but nesting
//! depth is unbounded unless [`MergeOptions::max_depth`] is set.

use crate::errors::MergeError;
use crate::utils::object::{is_plain_object, type_name};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Maximum number of nested object levels merged; the top level counts as 1.
    /// `Some(0)` rejects every merge, even of two flat objects.
    pub max_depth: Option<usize>,
}

impl MergeOptions {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// Merges `source` onto `target` and returns a new object.
///
/// Both arguments must be objects. Neither input is modified.
///
/// ```
/// use serde_json::json;
/// let merged = kiku::utils::merge::deep_merge(
///     &json!({"a": {"b": 1, "c": 2}}),
///     &json!({"a": {"b": 3}}),
/// )
/// .unwrap();
/// assert_eq!(merged, json!({"a": {"b": 3, "c": 2}}));
/// ```
pub fn deep_merge(target: &Value, source: &Value) -> Result<Value, MergeError> {
    deep_merge_with(target, source, &MergeOptions::default())
}

pub fn deep_merge_with(
    target: &Value,
    source: &Value,
    options: &MergeOptions,
) -> Result<Value, MergeError> {
    let target = expect_object("target", target)?;
    let source = expect_object("source", source)?;
    let mut path = Vec::new();
    merge_maps(target, source, options, &mut path).map(Value::Object)
}

/// Owning variant of [`deep_merge`]: subtrees are moved instead of cloned.
pub fn merge_into(target: Value, source: Value) -> Result<Value, MergeError> {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            Ok(Value::Object(merge_owned(target, source)))
        }
        (Value::Object(_), source) => Err(MergeError::type_mismatch("source", type_name(&source))),
        (target, _) => Err(MergeError::type_mismatch("target", type_name(&target))),
    }
}

/// Merge layers in order; the first is the base, the last has highest precedence.
pub fn merge_layers<I>(layers: I) -> Result<Value, MergeError>
where
    I: IntoIterator<Item = Value>,
{
    layers
        .into_iter()
        .try_fold(Value::Object(Map::new()), merge_into)
}

fn expect_object<'a>(role: &str, value: &'a Value) -> Result<&'a Map<String, Value>, MergeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(MergeError::type_mismatch(role, type_name(other))),
    }
}

fn merge_maps(
    target: &Map<String, Value>,
    source: &Map<String, Value>,
    options: &MergeOptions,
    path: &mut Vec<String>,
) -> Result<Map<String, Value>, MergeError> {
    if let Some(limit) = options.max_depth {
        if path.len() >= limit {
            return Err(MergeError::depth_exceeded(limit, render_path(path)));
        }
    }

    let mut result = target.clone();
    for (key, value) in source {
        let existing = target.get(key).filter(|v| is_plain_object(v));
        let merged = match (existing.and_then(Value::as_object), value.as_object()) {
            (Some(existing), Some(incoming)) => {
                path.push(key.clone());
                let nested = merge_maps(existing, incoming, options, path);
                path.pop();
                Value::Object(nested?)
            }
            _ => value.clone(),
        };
        result.insert(key.clone(), merged);
    }
    Ok(result)
}

fn merge_owned(mut target: Map<String, Value>, source: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in source {
        let merged = match (target.remove(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                Value::Object(merge_owned(existing, incoming))
            }
            (_, value) => value,
        };
        target.insert(key, merged);
    }
    target
}

fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        return "$".to_string();
    }
    format!("$.{}", path.join("."))
}
