//! Error types for Stepkey
//!
//! All modules use `StepkeyResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stepkey operations
pub type StepkeyResult<T> = Result<T, StepkeyError>;

/// All errors that can occur in Stepkey
#[derive(Error, Debug)]
pub enum StepkeyError {
    // Input errors
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    // Manifest errors
    #[error("Invalid step manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl StepkeyError {
    /// Create an invalid input error for a named field
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if error is retryable.
    ///
    /// Key computation performs no I/O, so nothing it reports is transient.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } if field == "artifact_store.path" => {
                Some("Pass --store-path or set [store] path in the config file")
            }
            Self::InvalidInput { field, .. } if field == "artifact_store.id" => {
                Some("Pass --store-id or set [store] id in the config file")
            }
            Self::InvalidInput { field, .. } if field == "project_id" => {
                Some("Pass --project or set [project] id in the config file")
            }
            Self::InvalidInput { field, .. } if field.starts_with("input_artifact_ids") => {
                Some("Inputs are given as NAME=UUID")
            }
            Self::ConfigInvalid { .. } => Some("Run: stepkey config init --force"),
            Self::ManifestInvalid { .. } => {
                Some("Step manifests need a `source` and one [outputs.<name>] table per output")
            }
            _ => None,
        }
    }
}
