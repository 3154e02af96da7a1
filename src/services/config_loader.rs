//! Layered configuration on top of the merge engine.
//!
//! Layers, lowest precedence first: built-in defaults, a config file, its
//! `*.local.*` sibling, then `PREFIX__...` environment variables. Missing
//! files are skipped; unreadable or malformed ones are errors.

use crate::constants::config::SUPPORTED_EXTENSIONS;
use crate::errors::{ConfigError, MergeError};
use crate::services::logger::Logger;
use crate::utils::env::{env_overrides_for, env_overrides_from_process};
use crate::utils::merge::{deep_merge_with, MergeOptions};
use crate::utils::object::type_name;
use crate::utils::paths::{expand_home_path, extension, local_sibling};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Defaults,
    File,
    Local,
    Env,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadedConfig {
    pub config: Value,
    /// Contributing layers in the order they were applied.
    pub sources: Vec<ConfigSource>,
}

impl LoadedConfig {
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(self.config.clone())
            .map_err(|err| ConfigError::Merge(MergeError::deserialize_failed(err)))
    }
}

#[derive(Debug, Clone)]
enum EnvSource {
    Process,
    Vars(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    defaults: Value,
    file: Option<PathBuf>,
    local_overrides: bool,
    env: Option<(String, EnvSource)>,
    options: MergeOptions,
    logger: Logger,
}

impl ConfigLoader {
    pub fn new(defaults: Value) -> Result<Self, ConfigError> {
        if !defaults.is_object() {
            return Err(MergeError::type_mismatch("defaults", type_name(&defaults)).into());
        }
        Ok(Self {
            defaults,
            file: None,
            local_overrides: true,
            env: None,
            options: MergeOptions::default(),
            logger: Logger::new("kiku").child("loader"),
        })
    }

    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(expand_home_path(path));
        self
    }

    pub fn with_local_overrides(mut self, enabled: bool) -> Self {
        self.local_overrides = enabled;
        self
    }

    /// Reads overrides from the process environment.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env = Some((prefix.into(), EnvSource::Process));
        self
    }

    /// Reads overrides from an explicit variable list instead of the process.
    pub fn with_env_vars<I, K, V>(mut self, prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.env = Some((prefix.into(), EnvSource::Vars(vars)));
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options = MergeOptions::with_max_depth(max_depth);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut config = self.defaults.clone();
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Defaults,
            path: None,
        }];

        if let Some(path) = &self.file {
            if let Some(layer) = self.read_layer(path)? {
                config = deep_merge_with(&config, &layer, &self.options)?;
                sources.push(file_source(ConfigOrigin::File, path));
            }

            if self.local_overrides {
                if let Some(local) = local_sibling(path) {
                    if let Some(layer) = self.read_layer(&local)? {
                        config = deep_merge_with(&config, &layer, &self.options)?;
                        sources.push(file_source(ConfigOrigin::Local, &local));
                    }
                }
            }
        }

        if let Some((prefix, source)) = &self.env {
            let layer = match source {
                EnvSource::Process => env_overrides_from_process(&config, prefix),
                EnvSource::Vars(vars) => env_overrides_for(
                    &config,
                    prefix,
                    vars.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                ),
            };
            if layer.as_object().is_some_and(|map| !map.is_empty()) {
                config = deep_merge_with(&config, &layer, &self.options)?;
                sources.push(ConfigSource {
                    origin: ConfigOrigin::Env,
                    path: None,
                });
            }
        }

        self.logger.info(
            "configuration loaded",
            Some(&json!({ "layers": sources.len() })),
        );
        Ok(LoadedConfig { config, sources })
    }

    fn read_layer(&self, path: &Path) -> Result<Option<Value>, ConfigError> {
        if !path.exists() {
            self.logger.debug(
                "config layer not found, skipping",
                Some(&json!({ "path": path.display().to_string() })),
            );
            return Ok(None);
        }
        let layer = read_config_file(path)?;
        self.logger.debug(
            "config layer read",
            Some(&json!({ "path": path.display().to_string() })),
        );
        Ok(Some(layer))
    }
}

/// Parses a `.json` or `.toml` file into an object.
pub fn read_config_file(path: &Path) -> Result<Value, ConfigError> {
    let format = extension(path)
        .filter(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };
    let value: Value = match format.as_str() {
        "json" => serde_json::from_str(&raw).map_err(|err| parse_error(err.to_string()))?,
        "toml" => toml::from_str(&raw).map_err(|err| parse_error(err.to_string()))?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };
    if !value.is_object() {
        return Err(parse_error(format!(
            "top-level value must be an object, got {}",
            type_name(&value)
        )));
    }
    Ok(value)
}

fn file_source(origin: ConfigOrigin, path: &Path) -> ConfigSource {
    ConfigSource {
        origin,
        path: Some(path.display().to_string()),
    }
}
