use crate::errors::MergeError;
use crate::utils::merge::{deep_merge_with, MergeOptions};
use crate::utils::object::type_name;
use crate::utils::typed;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Applies `overrides` on top of `defaults`.
///
/// `None` and a top-level `null` both mean "no overrides" and yield the
/// defaults unchanged. Keys present only in `overrides` are kept.
pub fn apply_defaults(defaults: &Value, overrides: Option<&Value>) -> Result<Value, MergeError> {
    apply_defaults_with(defaults, overrides, &MergeOptions::default())
}

pub fn apply_defaults_with(
    defaults: &Value,
    overrides: Option<&Value>,
    options: &MergeOptions,
) -> Result<Value, MergeError> {
    ensure_defaults(defaults)?;
    match overrides {
        None | Some(Value::Null) => Ok(defaults.clone()),
        Some(overrides) => deep_merge_with(defaults, overrides, options)
            .map_err(|err| rename_source_role(err, overrides)),
    }
}

/// Curried form of [`apply_defaults`] bound to `defaults`.
///
/// Each call of the returned closure is independent of the others.
pub fn with_defaults(
    defaults: Value,
) -> Result<impl Fn(Option<&Value>) -> Result<Value, MergeError>, MergeError> {
    let applier = DefaultsApplier::new(defaults)?;
    Ok(move |overrides: Option<&Value>| applier.apply(overrides))
}

/// Named, cloneable version of the applier returned by [`with_defaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsApplier {
    defaults: Value,
    options: MergeOptions,
}

impl DefaultsApplier {
    pub fn new(defaults: Value) -> Result<Self, MergeError> {
        ensure_defaults(&defaults)?;
        Ok(Self {
            defaults,
            options: MergeOptions::default(),
        })
    }

    /// Typed defaults are serialized once and kept as a JSON object.
    pub fn from_typed<T: Serialize>(defaults: &T) -> Result<Self, MergeError> {
        Self::new(typed::to_object("defaults", defaults)?)
    }

    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn defaults(&self) -> &Value {
        &self.defaults
    }

    pub fn apply(&self, overrides: Option<&Value>) -> Result<Value, MergeError> {
        apply_defaults_with(&self.defaults, overrides, &self.options)
    }

    pub fn apply_typed<T, P>(&self, overrides: Option<&P>) -> Result<T, MergeError>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let overrides = overrides
            .map(|patch| typed::to_value("overrides", patch))
            .transpose()?;
        let merged = self.apply(overrides.as_ref())?;
        serde_json::from_value(merged).map_err(MergeError::deserialize_failed)
    }
}

fn ensure_defaults(defaults: &Value) -> Result<(), MergeError> {
    if defaults.is_object() {
        return Ok(());
    }
    Err(MergeError::type_mismatch("defaults", type_name(defaults)))
}

fn rename_source_role(err: MergeError, overrides: &Value) -> MergeError {
    if overrides.is_object() {
        return err;
    }
    MergeError::type_mismatch("overrides", type_name(overrides))
}
