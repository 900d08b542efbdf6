//! Structural validation errors for classification results.

use thiserror::Error;

/// A violated invariant of a [`crate::ClassificationResult`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// A required field is empty.
    #[error("Required field '{field}' is empty")]
    MissingField { field: &'static str },

    /// Confidence score is NaN or outside [0, 1].
    #[error("Confidence score {value} is outside [0, 1]")]
    ConfidenceOutOfRange { value: f64 },

    /// A candidate composite score is NaN or outside [0, 1].
    #[error("Composite score {value} of '{type_id}' is outside [0, 1]")]
    ScoreOutOfRange { type_id: String, value: f64 },

    /// Candidates are not in descending order of final score.
    #[error("Candidate '{after}' outranks '{before}' but is listed after it")]
    Unsorted { before: String, after: String },

    /// Rank indices are not contiguous from 1.
    #[error("Candidate '{type_id}' has rank {found}, expected {expected}")]
    RankMismatch {
        type_id: String,
        expected: usize,
        found: usize,
    },

    /// Completion time precedes start time.
    #[error("Completed timestamp precedes started timestamp")]
    TimestampsReversed,
}
