//! Signal scoring for document type classification.
//!
//! Five independent scorers compare a document with a type definition:
//!
//! - [`StructureScorer`]: section count, required coverage, hierarchy
//! - [`TerminologyScorer`]: declared standards, domain terms, technical density
//! - [`ComplianceScorer`]: rule and standard references, critical-marker alignment
//! - [`MetadataScorer`]: category indicators, audience, complexity
//! - [`OrderingScorer`]: logical flow, required order, category templates
//!
//! [`CompositeScorer`] weights the five into a [`ClassificationCandidate`].
//! Scorers never fail: missing data produces a low or neutral value and a
//! reason string.
//!
//! # Example
//!
//! ```ignore
//! use doctype_score::{CompositeScorer, DocumentProfile, ScoringConfig};
//!
//! let scorer = CompositeScorer::new(ScoringConfig::default());
//! let profile = DocumentProfile::new(&document);
//! for definition in &catalog {
//!     let candidate = scorer.score(&profile, definition);
//!     println!("{}: {:.2}", candidate.type_id, candidate.composite_score);
//! }
//! ```
//!
//! [`ClassificationCandidate`]: doctype_model::ClassificationCandidate

pub mod compliance;
pub mod composite;
pub mod config;
pub mod lexicon;
pub mod metadata;
pub mod ordering;
pub mod profile;
pub mod signal;
pub mod structure;
pub mod terminology;
pub mod text;

pub use compliance::ComplianceScorer;
pub use composite::CompositeScorer;
pub use config::{ScoreWeights, ScoringConfig, ScoringThresholds, SeverityBands};
pub use metadata::MetadataScorer;
pub use ordering::OrderingScorer;
pub use profile::DocumentProfile;
pub use signal::{ScoreFactor, SignalScore, SignalScorer};
pub use structure::StructureScorer;
pub use terminology::TerminologyScorer;
pub use text::{normalize_text, section_matches};
