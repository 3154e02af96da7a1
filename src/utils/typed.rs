//! Defaults for typed values.
//!
//! Rust has no recursive "every field optional" type transform, so overrides
//! are written as patch structs whose fields are `Option`s skipped when
//! `None`. Both sides go through `serde_json::Value`, get merged, and the
//! result is read back as the full type:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Ui { theme: String, font_size: u32 }
//!
//! #[derive(Serialize)]
//! struct UiPatch {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     theme: Option<String>,
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     font_size: Option<u32>,
//! }
//!
//! let defaults = Ui { theme: "dark".into(), font_size: 14 };
//! let patch = UiPatch { theme: Some("light".into()), font_size: None };
//! let ui: Ui = kiku::utils::typed::apply_defaults_typed(&defaults, Some(&patch)).unwrap();
//! assert_eq!((ui.theme.as_str(), ui.font_size), ("light", 14));
//! ```
//!
//! A `None` field that is *not* skipped serializes as `null` and therefore
//! overrides the default with `null`. `Option<Option<T>>` with the skip
//! attribute gives both "keep" (`None`) and "explicit null" (`Some(None)`).

use crate::errors::MergeError;
use crate::utils::defaults::apply_defaults;
use crate::utils::merge::deep_merge;
use crate::utils::object::type_name;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub fn to_value<T: Serialize + ?Sized>(role: &str, value: &T) -> Result<Value, MergeError> {
    serde_json::to_value(value).map_err(|err| MergeError::serialize_failed(role, err))
}

/// Serializes `value` and insists on an object.
pub fn to_object<T: Serialize + ?Sized>(role: &str, value: &T) -> Result<Value, MergeError> {
    let value = to_value(role, value)?;
    if value.is_object() {
        return Ok(value);
    }
    Err(MergeError::type_mismatch(role, type_name(&value)))
}

pub fn apply_defaults_typed<T, P>(defaults: &T, overrides: Option<&P>) -> Result<T, MergeError>
where
    T: Serialize + DeserializeOwned,
    P: Serialize + ?Sized,
{
    let defaults = to_object("defaults", defaults)?;
    let overrides = overrides
        .map(|patch| to_value("overrides", patch))
        .transpose()?;
    let merged = apply_defaults(&defaults, overrides.as_ref())?;
    serde_json::from_value(merged).map_err(MergeError::deserialize_failed)
}

/// Typed counterpart of `deep_merge`: `source` is any serializable patch.
pub fn merge_typed<T, P>(target: &T, source: &P) -> Result<T, MergeError>
where
    T: Serialize + DeserializeOwned,
    P: Serialize + ?Sized,
{
    let target = to_object("target", target)?;
    let source = to_object("source", source)?;
    let merged = deep_merge(&target, &source)?;
    serde_json::from_value(merged).map_err(MergeError::deserialize_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MergeErrorKind;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ui {
        theme: String,
        font_size: u32,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Api {
        timeout: u64,
        retries: Option<u32>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct AppConfig {
        ui: Ui,
        api: Api,
        tags: Vec<String>,
    }

    #[derive(Debug, Default, Serialize)]
    struct UiPatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        theme: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        font_size: Option<u32>,
    }

    #[derive(Debug, Default, Serialize)]
    struct ApiPatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        timeout: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        retries: Option<Option<u32>>,
    }

    #[derive(Debug, Default, Serialize)]
    struct AppConfigPatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        ui: Option<UiPatch>,
        #[serde(skip_serializing_if = "Option::is_none")]
        api: Option<ApiPatch>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    }

    fn defaults() -> AppConfig {
        AppConfig {
            ui: Ui {
                theme: "dark".to_string(),
                font_size: 14,
            },
            api: Api {
                timeout: 5000,
                retries: Some(1),
            },
            tags: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[test]
    fn partial_patch_fills_from_defaults() {
        let patch = AppConfigPatch {
            ui: Some(UiPatch {
                theme: Some("light".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = apply_defaults_typed(&defaults(), Some(&patch)).unwrap();
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.ui.font_size, 14);
        assert_eq!(config.api, defaults().api);
        assert_eq!(config.tags, vec!["a", "b"]);
    }

    #[test]
    fn no_patch_returns_defaults() {
        let config = apply_defaults_typed(&defaults(), None::<&AppConfigPatch>).unwrap();
        assert_eq!(config, defaults());
    }

    #[test]
    fn double_option_distinguishes_keep_from_null() {
        let keep = AppConfigPatch {
            api: Some(ApiPatch::default()),
            ..Default::default()
        };
        let config = apply_defaults_typed(&defaults(), Some(&keep)).unwrap();
        assert_eq!(config.api.retries, Some(1));

        let clear = AppConfigPatch {
            api: Some(ApiPatch {
                retries: Some(None),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = apply_defaults_typed(&defaults(), Some(&clear)).unwrap();
        assert_eq!(config.api.retries, None);
        assert_eq!(config.api.timeout, 5000);
    }

    #[test]
    fn vec_fields_replace_entirely() {
        let patch = AppConfigPatch {
            tags: Some(vec!["c".into(), "d".into(), "e".into()]),
            ..Default::default()
        };
        let config = apply_defaults_typed(&defaults(), Some(&patch)).unwrap();
        assert_eq!(config.tags, vec!["c", "d", "e"]);
    }

    #[test]
    fn map_fields_merge_by_key() {
        let mut base = BTreeMap::new();
        base.insert("popup".to_string(), "src/popup/index.tsx".to_string());
        base.insert("background".to_string(), "src/background/index.ts".to_string());

        let mut patch = BTreeMap::new();
        patch.insert("devtools", "src/devtools/index.tsx");

        let merged = merge_typed(&base, &patch).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["popup"], "src/popup/index.tsx");
        assert_eq!(merged["devtools"], "src/devtools/index.tsx");
    }

    #[test]
    fn mismatched_patch_fails_to_deserialize() {
        let patch = serde_json::json!({"ui": {"font_size": "huge"}});
        let err = apply_defaults_typed(&defaults(), Some(&patch)).unwrap_err();
        assert_eq!(err.kind, MergeErrorKind::Deserialize);
    }

    #[test]
    fn non_object_defaults_are_rejected() {
        let err = apply_defaults_typed(&vec![1, 2], None::<&()>).unwrap_err();
        assert_eq!(err.kind, MergeErrorKind::TypeMismatch);
        assert_eq!(err.message, "defaults must be an object, got array");
    }
}
