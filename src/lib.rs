//! Deep merge and defaults application for JSON-shaped data.
//!
//! The engine lives in [`utils`]; [`services::config_loader`] and the `kiku`
//! binary are consumers that layer files and environment variables on top.

pub mod app;
pub mod constants;
pub mod errors;
pub mod services;
pub mod utils;

pub use errors::{ConfigError, MergeError, MergeErrorKind};
pub use utils::defaults::{apply_defaults, with_defaults, DefaultsApplier};
pub use utils::merge::{deep_merge, deep_merge_with, merge_into, merge_layers, MergeOptions};
pub use utils::object::{has_property, is_plain_object};
pub use utils::typed::{apply_defaults_typed, merge_typed};
