use crate::constants::config::ENV_SEPARATOR;
use serde_json::{Map, Value};

pub fn is_truthy(value: impl AsRef<str>) -> bool {
    matches!(
        value.as_ref().trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn is_truthy_env(key: &str) -> bool {
    std::env::var(key).ok().map(is_truthy).unwrap_or(false)
}

/// Builds an override object from `PREFIX__A__B=value` style variables.
///
/// Segments become nested keys. Values that parse as JSON keep their type
/// (`3`, `true`, `[1,2]`, `null`); anything else is a string. When two
/// variables collide, the deeper one wins over a scalar. Segments are
/// lowercased; use [`env_overrides_for`] to target existing mixed-case keys.
pub fn env_overrides<I, K, V>(prefix: &str, vars: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    env_overrides_for(&Value::Null, prefix, vars)
}

/// Like [`env_overrides`], but each segment is matched case-insensitively
/// against the keys of `existing` at the same depth, so `PREFIX__WEBEXT`
/// lands on `webExt`. Segments with no matching key are lowercased.
pub fn env_overrides_for<I, K, V>(existing: &Value, prefix: &str, vars: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let head = format!("{}{}", prefix, ENV_SEPARATOR);
    let mut root = Map::new();
    let mut entries: Vec<(Vec<String>, Value)> = vars
        .into_iter()
        .filter_map(|(key, value)| {
            let rest = key.as_ref().strip_prefix(head.as_str())?;
            let segments: Vec<&str> = rest
                .split(ENV_SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .collect();
            if segments.is_empty() {
                return None;
            }
            Some((
                resolve_segments(existing, &segments),
                parse_env_value(value.as_ref()),
            ))
        })
        .collect();
    // Environment iteration order is unspecified; shallow paths first keeps
    // the result stable.
    entries.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));

    for (segments, value) in entries {
        insert_path(&mut root, &segments, value);
    }
    Value::Object(root)
}

pub fn env_overrides_from_process(existing: &Value, prefix: &str) -> Value {
    env_overrides_for(existing, prefix, std::env::vars())
}

fn resolve_segments(existing: &Value, segments: &[&str]) -> Vec<String> {
    let mut node = Some(existing);
    segments
        .iter()
        .map(|segment| {
            let key = matching_key(node, segment).unwrap_or_else(|| segment.to_lowercase());
            node = node.and_then(|value| value.get(key.as_str()));
            key
        })
        .collect()
}

fn matching_key(node: Option<&Value>, segment: &str) -> Option<String> {
    let map = node?.as_object()?;
    if map.contains_key(segment) {
        return Some(segment.to_string());
    }
    map.keys()
        .find(|key| key.eq_ignore_ascii_case(segment))
        .cloned()
}

fn parse_env_value(raw: &str) -> Value {
    serde_json::from_str(raw.trim()).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn insert_path(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut current = map;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(inner) => inner,
            _ => return,
        };
    }
    current.insert(last.clone(), value);
}
