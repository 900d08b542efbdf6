//! Data model for document type classification.
//!
//! - [`document`]: parsed documents (sections, terminology, compliance markers)
//! - [`definition`]: document type definitions supplied by a registry
//! - [`classification`]: score breakdowns, candidates, and results
//! - [`enums`]: categories, complexity, severity, and ambiguity levels

pub mod classification;
pub mod definition;
pub mod document;
pub mod enums;
pub mod error;

pub use classification::{
    ClassificationCandidate, ClassificationResult, ClassificationTimestamps, ScoreBreakdown,
    Signal, clamp_unit,
};
pub use definition::{ComplianceRule, TypeDefinition};
pub use document::{ComplianceMarker, Document, Metadata, Section, TerminologyEntry};
pub use enums::{AmbiguityLevel, ComplexityLevel, DocumentCategory, Severity};
pub use error::ValidationError;
