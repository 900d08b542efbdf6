//! Document type classification engine.
//!
//! - [`ClassificationEngine`]: scores a document against every registered
//!   type, ranks the candidates, and attaches a calibrated confidence and an
//!   ambiguity level
//! - [`CandidateRanker`]: optional consistency pass that demotes candidates
//!   carried by a single strong signal
//! - [`policy`]: the confidence and ambiguity rules
//! - [`EventBus`]: lifecycle events for observers
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use doctype_core::{ClassificationEngine, EngineConfig};
//! use doctype_standards::StaticRegistry;
//!
//! let engine = ClassificationEngine::new(EngineConfig::default())
//!     .with_registry(Arc::new(StaticRegistry::builtin()?));
//! let result = engine.classify(&document)?;
//! if result.needs_review() {
//!     println!("{} needs review: {:?}", result.document_id, result.reasons);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod policy;
pub mod ranker;
pub mod stats;

pub use config::{AmbiguityConfig, EngineConfig, RankerConfig};
pub use engine::ClassificationEngine;
pub use error::{ClassifyError, Result};
pub use events::{
    ClassificationEvent, EventBus, EventKind, EventListener, ListenerError, ListenerId, Phase,
};
pub use ranker::{CandidateRanker, ConfidenceLevel, RankingAnalysis, RankingComponents};
pub use stats::EngineStatistics;
