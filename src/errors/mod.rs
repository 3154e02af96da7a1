mod config_error;
mod merge_error;

pub use config_error::ConfigError;
pub use merge_error::{MergeError, MergeErrorKind};
