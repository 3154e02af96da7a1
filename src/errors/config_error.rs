use super::MergeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config format for {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Merge(#[from] MergeError),
}
