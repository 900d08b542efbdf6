//! Result store error types.
//!
//! Store operations return structured errors with a user-facing message and
//! an optional remediation hint.

use std::path::PathBuf;
use thiserror::Error;

/// Result store operation error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Result could not be encoded as JSON.
    #[error("Failed to serialize result {id}")]
    Serialization {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored file is not a valid result.
    #[error("Failed to deserialize result file: {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Result id cannot be used as a file name.
    #[error("Invalid result id '{id}'")]
    InvalidId { id: String },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Background task failed before finishing.
    #[error("Store task failed: {message}")]
    Task { message: String },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::Serialization { id, .. } => {
                format!("An error occurred while encoding result {id}.")
            }
            Self::Deserialization { path, .. } => format!(
                "The file at {} is not a valid classification result.",
                path.display()
            ),
            Self::InvalidId { id } => {
                format!("'{id}' cannot be used as a result identifier.")
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the result to {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::Task { message } => format!("The storage task did not complete: {message}"),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the store directory exists and is readable.".into())
                } else {
                    Some("Check that you have permission to write to the store directory.".into())
                }
            }
            Self::Deserialization { .. } => {
                Some("Remove or repair the damaged file in the store directory.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different store directory.".into())
            }
            Self::Serialization { .. } | Self::InvalidId { .. } | Self::Task { .. } => None,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
