//! Consistency-based re-ranking of scored candidates.
//!
//! A candidate whose composite score comes from one strong signal masking
//! several weak ones is pushed down in favour of candidates whose five
//! sub-scores agree with each other. Nothing is re-scored; only the
//! breakdown already attached to each candidate is inspected.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use doctype_model::{AmbiguityLevel, ClassificationCandidate, clamp_unit};

use crate::config::{AmbiguityConfig, RankerConfig};
use crate::policy;

/// Sub-score at or above which a signal counts as a match.
const MATCH_LEVEL: f64 = 0.5;

/// Penalty at or above which a candidate is reported as inconsistent.
const INCONSISTENT_PENALTY: f64 = 0.15;

/// Components of one candidate's ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankingComponents {
    /// Agreement between the five sub-scores.
    pub score_confidence: f64,
    /// How unanimously the sub-scores land on one side of 0.5.
    pub breakdown_consistency: f64,
    /// Penalty for a wide sub-score range.
    pub ambiguity_penalty: f64,
}

impl RankingComponents {
    /// Compute the components from a candidate's breakdown.
    pub fn of(candidate: &ClassificationCandidate) -> Self {
        let values = candidate.breakdown.values();
        let n = values.len() as f64;

        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let score_confidence = 1.0 - (variance.sqrt() / 0.5).min(1.0);

        let matching = values.iter().filter(|v| **v >= MATCH_LEVEL).count();
        let breakdown_consistency = matching.max(values.len() - matching) as f64 / n;

        let range = candidate.breakdown.range();
        let mut penalty: f64 = if range <= 0.2 {
            0.0
        } else if range <= 0.4 {
            0.05
        } else if range <= 0.6 {
            0.15
        } else {
            0.3
        };
        if (0.5..=0.7).contains(&candidate.composite_score) && range > 0.5 {
            penalty += 0.1;
        }

        Self {
            score_confidence,
            breakdown_consistency,
            ambiguity_penalty: penalty.min(0.5),
        }
    }
}

/// Overall confidence band of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Band a confidence value: high ≥ 0.8, medium ≥ 0.6, otherwise low.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::High
        } else if confidence >= 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        };
        f.write_str(s)
    }
}

/// Diagnostic summary of a re-ranking. Never feeds back into a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingAnalysis {
    pub candidate_count: usize,
    pub min_score: f64,
    pub max_score: f64,
    pub spread: f64,
    pub top_score: Option<f64>,
    pub margin: Option<f64>,
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub ambiguity_level: AmbiguityLevel,
    /// Type ids whose breakdown earned a penalty of 0.15 or more.
    pub inconsistent: Vec<String>,
}

/// Secondary ranking pass over candidate breakdowns.
#[derive(Debug, Clone, Default)]
pub struct CandidateRanker {
    config: RankerConfig,
}

impl CandidateRanker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Ranking score of one candidate, clamped to [0, 1].
    pub fn ranking_score(&self, candidate: &ClassificationCandidate) -> f64 {
        let c = RankingComponents::of(candidate);
        let w = &self.config;
        clamp_unit(
            w.score_weight * candidate.composite_score
                + w.confidence_weight * c.score_confidence
                + w.consistency_weight * c.breakdown_consistency
                - w.penalty_weight * c.ambiguity_penalty,
        )
    }

    /// Reorder candidates by ranking score.
    ///
    /// The sort is stable, so equal ranking scores keep their input order.
    /// Ranks are reassigned `1..=N` and `ranking_score` is set on every
    /// candidate.
    pub fn rank(&self, candidates: Vec<ClassificationCandidate>) -> Vec<ClassificationCandidate> {
        let mut ranked: Vec<ClassificationCandidate> = candidates
            .into_iter()
            .map(|mut candidate| {
                candidate.ranking_score = Some(self.ranking_score(&candidate));
                candidate
            })
            .collect();
        ranked.sort_by(|a, b| descending(a.final_score(), b.final_score()));
        for (index, candidate) in ranked.iter_mut().enumerate() {
            candidate.rank = index + 1;
        }
        tracing::debug!(
            count = ranked.len(),
            top = ranked.first().map(|c| c.type_id.as_str()),
            "Re-ranked candidates"
        );
        ranked
    }

    /// Summarize how the ranking pass sees a candidate list.
    pub fn ranking_analysis(
        &self,
        candidates: &[ClassificationCandidate],
        ambiguity: &AmbiguityConfig,
    ) -> RankingAnalysis {
        let mut scores: Vec<f64> = candidates.iter().map(|c| self.ranking_score(c)).collect();
        scores.sort_by(|a, b| descending(*a, *b));

        let max_score = scores.first().copied().unwrap_or(0.0);
        let min_score = scores.last().copied().unwrap_or(0.0);
        let (confidence, ambiguity_level) = policy::assess(&scores, ambiguity);

        let inconsistent = candidates
            .iter()
            .filter(|c| RankingComponents::of(c).ambiguity_penalty >= INCONSISTENT_PENALTY)
            .map(|c| c.type_id.clone())
            .collect();

        RankingAnalysis {
            candidate_count: candidates.len(),
            min_score,
            max_score,
            spread: max_score - min_score,
            top_score: scores.first().copied(),
            margin: policy::margin(&scores),
            confidence,
            confidence_level: ConfidenceLevel::from_confidence(confidence),
            ambiguity_level,
            inconsistent,
        }
    }
}

/// Descending order for scores; NaN never appears after clamping.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
