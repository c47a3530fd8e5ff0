//! Structured error types for the configuration pipeline.

use crate::config::FieldType;
use thiserror::Error;

/// Errors the pipeline can raise while resolving a training run.
///
/// Every variant maps to its own process exit code so scripts can tell
/// the failure classes apart. The pipeline is deterministic, so none of
/// these are retried: rerunning with the same inputs reproduces the
/// same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    /// An identifier did not resolve to any registered component.
    #[error("Unknown {role} '{identifier}' (known {role}s: {})", .candidates.join(", "))]
    UnknownComponent {
        role: String,
        identifier: String,
        candidates: Vec<String>,
    },

    /// The (task, model) pair has no entry in the compatibility matrix.
    #[error("Task '{task}' has no compatibility entry for model '{model}'")]
    IncompatiblePair { task: String, model: String },

    /// A dotted path names a section or field the schemas do not declare,
    /// or an override string is not of the form `section.field=value`.
    #[error("Invalid override for '{path}': {reason}")]
    Override { path: String, reason: String },

    /// A supplied value cannot be converted to the field's declared type.
    #[error("Cannot coerce '{value}' for '{path}': expected {expected}")]
    TypeCoercion {
        path: String,
        value: String,
        expected: FieldType,
    },

    /// Required fields were still unresolved after all layers and dispatch.
    #[error("Missing required fields: {}", .paths.join(", "))]
    MissingFields { paths: Vec<String> },
}

impl HarnessError {
    // Convenience constructors

    pub fn unknown_component(role: &str, identifier: &str, mut candidates: Vec<String>) -> Self {
        candidates.sort();
        Self::UnknownComponent {
            role: role.to_string(),
            identifier: identifier.to_string(),
            candidates,
        }
    }

    pub fn incompatible_pair(task: &str, model: &str) -> Self {
        Self::IncompatiblePair {
            task: task.to_string(),
            model: model.to_string(),
        }
    }

    pub fn override_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Override {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn coercion(
        path: impl Into<String>,
        value: impl Into<String>,
        expected: FieldType,
    ) -> Self {
        Self::TypeCoercion {
            path: path.into(),
            value: value.into(),
            expected,
        }
    }

    pub fn missing_fields(mut paths: Vec<String>) -> Self {
        paths.sort();
        Self::MissingFields { paths }
    }

    /// Process exit status for this error class. Code 1 is reserved for
    /// failures outside the taxonomy (I/O, malformed YAML, startup).
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownComponent { .. } => 2,
            Self::IncompatiblePair { .. } => 3,
            Self::MissingFields { .. } => 4,
            Self::TypeCoercion { .. } => 5,
            Self::Override { .. } => 6,
        }
    }
}

/// Result type for pipeline operations.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;
