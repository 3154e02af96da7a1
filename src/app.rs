use crate::constants::config::{ENV_PREFIX, NO_LOCAL_ENV};
use crate::constants::limits::CLI_MAX_MERGE_DEPTH;
use crate::errors::ConfigError;
use crate::services::config_loader::{read_config_file, ConfigLoader};
use crate::services::logger::Logger;
use crate::utils::env::is_truthy_env;
use crate::utils::merge::{deep_merge_with, MergeOptions};
use crate::utils::paths::expand_home_path;
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kiku", version, about = "Deep-merge JSON and TOML configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print compact JSON instead of pretty output.
    #[arg(long, global = true)]
    pub compact: bool,

    /// Maximum nesting depth merged before giving up (at least 1).
    #[arg(
        long,
        global = true,
        default_value_t = CLI_MAX_MERGE_DEPTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_depth: usize,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge files left to right; later files win.
    Merge {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Apply a config file, its local sibling and env overrides to defaults.
    Defaults {
        defaults: PathBuf,
        #[arg(long)]
        overrides: Option<PathBuf>,
        /// Skip the `*.local.*` sibling of the overrides file.
        #[arg(long)]
        no_local: bool,
        /// Read `PREFIX__KEY__SUBKEY=value` variables as the last layer.
        #[arg(long, num_args = 0..=1, default_missing_value = ENV_PREFIX)]
        env_prefix: Option<String>,
    },
}

pub struct App {
    pub logger: Logger,
}

impl App {
    pub fn new() -> Self {
        Self {
            logger: Logger::new("kiku"),
        }
    }

    pub fn run(&self, cli: &Cli) -> Result<Value, ConfigError> {
        let options = MergeOptions::with_max_depth(cli.max_depth);
        match &cli.command {
            Command::Merge { files } => self.merge_files(files, &options),
            Command::Defaults {
                defaults,
                overrides,
                no_local,
                env_prefix,
            } => {
                let defaults = read_config_file(&expand_home_path(defaults))?;
                let mut loader = ConfigLoader::new(defaults)?
                    .with_local_overrides(!no_local && !is_truthy_env(NO_LOCAL_ENV))
                    .with_max_depth(cli.max_depth)
                    .with_logger(self.logger.child("loader"));
                if let Some(path) = overrides {
                    loader = loader.with_file(path);
                }
                if let Some(prefix) = env_prefix {
                    loader = loader.with_env_prefix(prefix.clone());
                }
                Ok(loader.load()?.config)
            }
        }
    }

    fn merge_files(
        &self,
        files: &[PathBuf],
        options: &MergeOptions,
    ) -> Result<Value, ConfigError> {
        let mut merged = Value::Object(Map::new());
        for path in files {
            let layer = read_config_file(&expand_home_path(path))?;
            merged = deep_merge_with(&merged, &layer, options)?;
        }
        self.logger
            .debug("files merged", Some(&json!({ "count": files.len() })));
        Ok(merged)
    }

    pub fn render(&self, value: &Value, compact: bool) -> String {
        let rendered = if compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        };
        rendered.unwrap_or_else(|_| value.to_string())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
