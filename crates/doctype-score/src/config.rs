//! Scoring configuration.
//!
//! All structs use `#[serde(default)]` so partial TOML tables only override
//! the values they name.

use serde::{Deserialize, Serialize};

use doctype_model::Signal;

/// Weights applied by the composite scorer.
///
/// Weights need not sum to 1; the composite is clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub structure: f64,
    pub terminology: f64,
    pub compliance: f64,
    pub metadata: f64,
    pub ordering: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            structure: 0.30,
            terminology: 0.25,
            compliance: 0.20,
            metadata: 0.15,
            ordering: 0.10,
        }
    }
}

impl ScoreWeights {
    /// Weight for a signal.
    #[must_use]
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Structure => self.structure,
            Signal::Terminology => self.terminology,
            Signal::Compliance => self.compliance,
            Signal::Metadata => self.metadata,
            Signal::Ordering => self.ordering,
        }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        Signal::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Severity alignment bands used by the compliance scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityBands {
    /// Type expects critical markers and the document has them.
    pub both: f64,
    /// Neither side involves critical markers.
    pub neither: f64,
    /// Type expects critical markers, the document has none.
    pub expected_absent: f64,
    /// Document has critical markers the type does not expect.
    pub unexpected_present: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            both: 1.0,
            neither: 0.7,
            expected_absent: 0.3,
            unexpected_present: 0.4,
        }
    }
}

/// Tunable constants shared by the scorers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Sub-scores strictly above this produce a "strong match" reason (default: 0.7).
    pub strong_match_threshold: f64,
    /// Minimum Jaro-Winkler similarity for two section names to match (default: 0.88).
    pub section_similarity: f64,
    /// Severity alignment bands.
    pub severity: SeverityBands,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            strong_match_threshold: 0.7,
            section_similarity: 0.88,
            severity: SeverityBands::default(),
        }
    }
}

/// Complete scoring configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub thresholds: ScoringThresholds,
}

impl ScoringConfig {
    /// Replace the composite weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ScoringThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
