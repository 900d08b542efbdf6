//! Classification candidates and results.
//!
//! Candidates and results are value objects: they are created fresh on every
//! classification run and never mutated after the result has been validated.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::AmbiguityLevel;
use crate::error::ValidationError;

/// Clamp a score into [0, 1]. NaN maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// One of the five independent similarity signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Section count, coverage, and hierarchy.
    Structure,
    /// Standards, domain terms, and technical density.
    Terminology,
    /// Compliance rule and standard references.
    Compliance,
    /// Category, audience, and complexity alignment.
    Metadata,
    /// Logical flow and section ordering.
    Ordering,
}

impl Signal {
    /// All signals in breakdown order.
    pub const ALL: [Signal; 5] = [
        Signal::Structure,
        Signal::Terminology,
        Signal::Compliance,
        Signal::Metadata,
        Signal::Ordering,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Structure => "structure",
            Signal::Terminology => "terminology",
            Signal::Compliance => "compliance",
            Signal::Metadata => "metadata",
            Signal::Ordering => "ordering",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-signal sub-scores for one (document, type) pair.
///
/// Every sub-score is clamped to [0, 1] on construction and on [`Self::set`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub structure: f64,
    pub terminology: f64,
    pub compliance: f64,
    pub metadata: f64,
    pub ordering: f64,
    /// Reasons reported by the scorers.
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl ScoreBreakdown {
    /// Build a breakdown from raw sub-scores, clamping each one.
    pub fn new(
        structure: f64,
        terminology: f64,
        compliance: f64,
        metadata: f64,
        ordering: f64,
    ) -> Self {
        Self {
            structure: clamp_unit(structure),
            terminology: clamp_unit(terminology),
            compliance: clamp_unit(compliance),
            metadata: clamp_unit(metadata),
            ordering: clamp_unit(ordering),
            reasons: Vec::new(),
        }
    }

    /// Sub-score for a signal.
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Structure => self.structure,
            Signal::Terminology => self.terminology,
            Signal::Compliance => self.compliance,
            Signal::Metadata => self.metadata,
            Signal::Ordering => self.ordering,
        }
    }

    /// Set a sub-score (clamped).
    pub fn set(&mut self, signal: Signal, value: f64) {
        let value = clamp_unit(value);
        match signal {
            Signal::Structure => self.structure = value,
            Signal::Terminology => self.terminology = value,
            Signal::Compliance => self.compliance = value,
            Signal::Metadata => self.metadata = value,
            Signal::Ordering => self.ordering = value,
        }
    }

    /// The five sub-scores in [`Signal::ALL`] order.
    pub fn values(&self) -> [f64; 5] {
        Signal::ALL.map(|signal| self.get(signal))
    }

    /// Largest minus smallest sub-score.
    pub fn range(&self) -> f64 {
        let values = self.values();
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        max - min
    }
}

/// Score of one candidate type for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationCandidate {
    /// Type identifier from the registry.
    pub type_id: String,
    /// Type display name.
    pub type_name: String,
    /// Weighted combination of the five signals (0.0 to 1.0).
    pub composite_score: f64,
    /// Per-signal sub-scores.
    pub breakdown: ScoreBreakdown,
    /// Human-readable reasons for the score.
    pub reasons: Vec<String>,
    /// 1-based position in the ranked list (0 until ranked).
    #[serde(default)]
    pub rank: usize,
    /// Score assigned by the consistency re-ranking pass, if it ran.
    #[serde(default)]
    pub ranking_score: Option<f64>,
}

impl ClassificationCandidate {
    /// Create an unranked candidate.
    pub fn new(
        type_id: impl Into<String>,
        type_name: impl Into<String>,
        composite_score: f64,
        breakdown: ScoreBreakdown,
        reasons: Vec<String>,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            type_name: type_name.into(),
            composite_score: clamp_unit(composite_score),
            breakdown,
            reasons,
            rank: 0,
            ranking_score: None,
        }
    }

    /// The score the candidate is ordered by: the re-ranking score when
    /// present, otherwise the composite score.
    pub fn final_score(&self) -> f64 {
        self.ranking_score.unwrap_or(self.composite_score)
    }
}

/// Start and end of a classification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTimestamps {
    pub started: DateTime<Utc>,
    pub completed: DateTime<Utc>,
}

impl ClassificationTimestamps {
    /// Elapsed wall-clock time in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        (self.completed - self.started).num_milliseconds()
    }
}

/// Outcome of one classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Unique result id.
    pub id: String,
    /// Id of the classified document.
    pub document_id: String,
    /// Candidates in descending order of final score.
    pub ranked_candidates: Vec<ClassificationCandidate>,
    /// Calibrated confidence in the top candidate (0.0 to 1.0).
    pub confidence_score: f64,
    /// How reliable the top choice is.
    pub ambiguity_level: AmbiguityLevel,
    /// Human-readable explanation of the decision.
    pub reasons: Vec<String>,
    pub timestamps: ClassificationTimestamps,
    /// True when the consistency re-ranking pass reordered the candidates.
    #[serde(default)]
    pub refined: bool,
}

impl ClassificationResult {
    /// Generate a fresh result id.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// The top-ranked candidate.
    pub fn top_candidate(&self) -> Option<&ClassificationCandidate> {
        self.ranked_candidates.first()
    }

    /// Type id of the top-ranked candidate.
    pub fn top_type_id(&self) -> Option<&str> {
        self.top_candidate().map(|c| c.type_id.as_str())
    }

    /// Candidate for a type id.
    pub fn candidate(&self, type_id: &str) -> Option<&ClassificationCandidate> {
        self.ranked_candidates.iter().find(|c| c.type_id == type_id)
    }

    /// True when the result should be routed to human review.
    pub fn needs_review(&self) -> bool {
        self.ambiguity_level.needs_review()
    }

    /// Check the structural invariants of the result.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant. A failure indicates a bug in
    /// the producer of the result and must not be silently corrected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "id" });
        }
        if self.document_id.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "document_id",
            });
        }
        if !self.confidence_score.is_finite() || !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(ValidationError::ConfidenceOutOfRange {
                value: self.confidence_score,
            });
        }
        if self.timestamps.completed < self.timestamps.started {
            return Err(ValidationError::TimestampsReversed);
        }
        for (index, candidate) in self.ranked_candidates.iter().enumerate() {
            let score = candidate.composite_score;
            if !score.is_finite() || !(0.0..=1.0).contains(&score) {
                return Err(ValidationError::ScoreOutOfRange {
                    type_id: candidate.type_id.clone(),
                    value: score,
                });
            }
            if candidate.rank != index + 1 {
                return Err(ValidationError::RankMismatch {
                    type_id: candidate.type_id.clone(),
                    expected: index + 1,
                    found: candidate.rank,
                });
            }
        }
        for pair in self.ranked_candidates.windows(2) {
            if pair[0].final_score() < pair[1].final_score() {
                return Err(ValidationError::Unsorted {
                    before: pair[0].type_id.clone(),
                    after: pair[1].type_id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, score: f64, rank: usize) -> ClassificationCandidate {
        let mut c = ClassificationCandidate::new(
            id,
            id.to_uppercase(),
            score,
            ScoreBreakdown::new(score, score, score, score, score),
            vec![],
        );
        c.rank = rank;
        c
    }

    fn result(candidates: Vec<ClassificationCandidate>) -> ClassificationResult {
        let now = Utc::now();
        ClassificationResult {
            id: ClassificationResult::generate_id(),
            document_id: "doc".to_string(),
            ranked_candidates: candidates,
            confidence_score: 0.5,
            ambiguity_level: AmbiguityLevel::Low,
            reasons: vec![],
            timestamps: ClassificationTimestamps {
                started: now,
                completed: now,
            },
            refined: false,
        }
    }

    #[test]
    fn breakdown_clamps_sub_scores() {
        let breakdown = ScoreBreakdown::new(1.5, -0.2, f64::NAN, 0.4, 0.9);
        assert_eq!(breakdown.values(), [1.0, 0.0, 0.0, 0.4, 0.9]);
        assert!((breakdown.range() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn validate_accepts_sorted_result() {
        let r = result(vec![candidate("a", 0.8, 1), candidate("b", 0.4, 2)]);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unsorted_candidates() {
        let r = result(vec![candidate("a", 0.4, 1), candidate("b", 0.8, 2)]);
        assert!(matches!(r.validate(), Err(ValidationError::Unsorted { .. })));
    }

    #[test]
    fn validate_rejects_out_of_range_confidence() {
        let mut r = result(vec![candidate("a", 0.8, 1)]);
        r.confidence_score = 1.2;
        assert!(matches!(
            r.validate(),
            Err(ValidationError::ConfidenceOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_rank_gaps() {
        let r = result(vec![candidate("a", 0.8, 1), candidate("b", 0.4, 3)]);
        assert!(matches!(
            r.validate(),
            Err(ValidationError::RankMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn final_score_prefers_ranking_score() {
        let mut c = candidate("a", 0.8, 1);
        assert!((c.final_score() - 0.8).abs() < f64::EPSILON);
        c.ranking_score = Some(0.6);
        assert!((c.final_score() - 0.6).abs() < f64::EPSILON);
    }
}
