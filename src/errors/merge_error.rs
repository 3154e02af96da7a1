use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeErrorKind {
    TypeMismatch,
    DepthExceeded,
    Serialize,
    Deserialize,
}

impl MergeErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            MergeErrorKind::TypeMismatch => "TYPE_MISMATCH",
            MergeErrorKind::DepthExceeded => "DEPTH_EXCEEDED",
            MergeErrorKind::Serialize => "SERIALIZE",
            MergeErrorKind::Deserialize => "DESERIALIZE",
        }
    }
}

/// Failure raised by the merge engine.
///
/// Only top-level misuse and explicit limits surface here; per-key shape
/// conflicts are resolved by replacement and never produce an error.
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct MergeError {
    pub kind: MergeErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl MergeError {
    pub fn new(kind: MergeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.code().to_string(),
            message: message.into(),
            path: None,
            hint: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// `role` names the argument ("target", "source", "defaults", ...).
    pub fn type_mismatch(role: &str, found: &str) -> Self {
        Self::new(
            MergeErrorKind::TypeMismatch,
            format!("{} must be an object, got {}", role, found),
        )
        .with_hint("Only key/value objects can be merged at the top level.")
    }

    pub fn depth_exceeded(limit: usize, path: impl Into<String>) -> Self {
        Self::new(
            MergeErrorKind::DepthExceeded,
            format!("merge exceeded maximum depth of {}", limit),
        )
        .with_path(path)
    }

    pub fn serialize_failed(role: &str, err: impl std::fmt::Display) -> Self {
        Self::new(
            MergeErrorKind::Serialize,
            format!("failed to serialize {}: {}", role, err),
        )
    }

    pub fn deserialize_failed(err: impl std::fmt::Display) -> Self {
        Self::new(
            MergeErrorKind::Deserialize,
            format!("merged value does not fit the defaults type: {}", err),
        )
        .with_hint("Overrides replaced a field with a value of a different shape.")
    }
}
