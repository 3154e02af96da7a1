use crate::constants::config::LOCAL_INFIX;
use std::path::{Path, PathBuf};

pub fn expand_home_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if let Some(str_path) = path.to_str() {
        if let Some(rest) = str_path.strip_prefix("~/") {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home).join(rest);
            }
        }
        if str_path == "~" {
            if let Ok(home) = std::env::var("HOME") {
                return PathBuf::from(home);
            }
        }
    }
    path.to_path_buf()
}

/// Machine-local override file living next to `path`:
/// `app.config.json` -> `app.local.config.json`, `app.json` -> `app.local.json`.
pub fn local_sibling(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    let file_name = path.file_name()?.to_str()?;
    let (stem, rest) = match file_name.split_once('.') {
        Some((stem, rest)) if !stem.is_empty() => (stem, rest),
        _ => return None,
    };
    Some(path.with_file_name(format!("{}.{}.{}", stem, LOCAL_INFIX, rest)))
}

pub fn extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
