//! Confidence and ambiguity policy.
//!
//! Both functions take scores sorted in descending order. The ambiguity
//! bands are expressed as fractions of the configured threshold `T`:
//!
//! | margin Δ              | level       |
//! |-----------------------|-------------|
//! | Δ > T                 | `none`      |
//! | T·0.7 < Δ ≤ T         | `low`       |
//! | T·0.4 < Δ ≤ T·0.7     | `medium`    |
//! | T·0.1 < Δ ≤ T·0.4     | `high`      |
//! | Δ ≤ T·0.1             | `very-high` |
//!
//! A confidence below the confidence threshold is always `very-high`.

use doctype_model::{AmbiguityLevel, ClassificationCandidate, clamp_unit};

use crate::config::AmbiguityConfig;

/// Number of top-candidate reasons carried into the result.
const TOP_REASONS: usize = 3;

/// Difference between the two best scores, if there are two.
pub fn margin(sorted_scores: &[f64]) -> Option<f64> {
    match sorted_scores {
        [top, second, ..] => Some(top - second),
        _ => None,
    }
}

/// Calibrated confidence in the top score.
///
/// The top score is discounted by up to 30% when the runner-up is close.
pub fn confidence(sorted_scores: &[f64]) -> f64 {
    match sorted_scores {
        [] => 0.0,
        [only] => clamp_unit(*only),
        [top, second, ..] => {
            let separation = (2.0 * (top - second)).clamp(0.0, 1.0);
            clamp_unit(top * (0.7 + 0.3 * separation))
        }
    }
}

/// Band a margin against the threshold, ignoring candidate count and confidence.
pub fn margin_band(margin: f64, threshold: f64) -> AmbiguityLevel {
    if margin > threshold {
        AmbiguityLevel::None
    } else if margin > threshold * 0.7 {
        AmbiguityLevel::Low
    } else if margin > threshold * 0.4 {
        AmbiguityLevel::Medium
    } else if margin > threshold * 0.1 {
        AmbiguityLevel::High
    } else {
        AmbiguityLevel::VeryHigh
    }
}

/// Ambiguity of a ranking.
pub fn ambiguity(
    candidate_count: usize,
    margin: f64,
    confidence: f64,
    config: &AmbiguityConfig,
) -> AmbiguityLevel {
    match candidate_count {
        0 => AmbiguityLevel::VeryHigh,
        1 => AmbiguityLevel::None,
        _ if confidence < config.confidence_threshold => AmbiguityLevel::VeryHigh,
        _ => margin_band(margin, config.ambiguity_threshold),
    }
}

/// Confidence and ambiguity of a sorted score list.
pub fn assess(sorted_scores: &[f64], config: &AmbiguityConfig) -> (f64, AmbiguityLevel) {
    let confidence = confidence(sorted_scores);
    let level = ambiguity(
        sorted_scores.len(),
        margin(sorted_scores).unwrap_or(0.0),
        confidence,
        config,
    );
    (confidence, level)
}

/// Sentence describing the size of the confidence score.
pub fn magnitude_sentence(confidence: f64) -> String {
    let word = if confidence >= 0.8 {
        "high"
    } else if confidence >= 0.6 {
        "moderate"
    } else {
        "low"
    };
    format!("Overall confidence is {word} ({confidence:.2}).")
}

/// Result-level reasons: the top candidate's leading reasons, then the
/// ambiguity explanation and the confidence magnitude.
pub fn result_reasons(
    top: Option<&ClassificationCandidate>,
    level: AmbiguityLevel,
    confidence: f64,
) -> Vec<String> {
    let mut reasons: Vec<String> = match top {
        Some(candidate) => candidate.reasons.iter().take(TOP_REASONS).cloned().collect(),
        None => vec!["No document types were available to compare against".to_string()],
    };
    reasons.push(level.description().to_string());
    reasons.push(magnitude_sentence(confidence));
    reasons
}
