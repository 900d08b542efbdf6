//! Classification error types.

use doctype_model::ValidationError;
use doctype_standards::RegistryError;
use thiserror::Error;

/// Errors surfaced by [`crate::ClassificationEngine`].
///
/// Degraded scorers, listener failures, and store failures are not errors:
/// they show up as reasons, statistics, and log lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassifyError {
    /// No type registry is configured, or it failed and fallback is disabled.
    #[error("Type registry unavailable: {message}")]
    RegistryUnavailable {
        message: String,
        #[source]
        source: Option<RegistryError>,
    },

    /// The assembled result violates a structural invariant.
    #[error("Classification produced an invalid result: {0}")]
    InvalidResult(#[from] ValidationError),

    /// The classification did not finish within the allotted time.
    #[error("Classification timed out after {timeout_ms} ms")]
    TimedOut { timeout_ms: u64 },

    /// The background classification task failed to complete.
    #[error("Classification task failed: {message}")]
    Task { message: String },
}

/// Result type for classification operations.
pub type Result<T> = std::result::Result<T, ClassifyError>;
