//! Error types for type registry and catalog loading operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or querying a type catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Catalog path does not exist.
    #[error("Catalog not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read a catalog file or directory.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON could not be parsed.
    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The embedded built-in catalog is malformed.
    #[error("Built-in catalog is invalid: {source}")]
    Builtin {
        #[source]
        source: serde_json::Error,
    },

    /// Two types share an id.
    #[error("Duplicate type id '{id}'")]
    DuplicateType { id: String },

    /// A type definition is missing an id or name.
    #[error("Type definition at position {index} has an empty {field}")]
    InvalidType { index: usize, field: &'static str },

    /// The backing source is temporarily unreachable.
    #[error("Type registry unavailable: {message}")]
    Unavailable { message: String },
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
