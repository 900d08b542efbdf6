//! The signal scorer abstraction.

use serde::Serialize;

use doctype_model::{Signal, TypeDefinition, clamp_unit};

use crate::config::ScoringConfig;
use crate::profile::DocumentProfile;

/// A named sub-factor contributing to a signal score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreFactor {
    /// Factor name (e.g., "Required coverage").
    pub name: &'static str,
    /// Factor value (0.0 to 1.0).
    pub value: f64,
    /// Human-readable detail.
    pub description: String,
}

impl ScoreFactor {
    pub fn new(name: &'static str, value: f64, description: impl Into<String>) -> Self {
        Self {
            name,
            value,
            description: description.into(),
        }
    }
}

/// Result of one signal scorer for one (document, type) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalScore {
    pub signal: Signal,
    /// Bounded score (0.0 to 1.0).
    pub value: f64,
    /// Breakdown of the sub-factors for explainability.
    pub factors: Vec<ScoreFactor>,
    /// Reasons worth showing to a user.
    pub reasons: Vec<String>,
}

impl SignalScore {
    /// Create a score, clamping the value into [0, 1].
    pub fn new(signal: Signal, value: f64) -> Self {
        Self {
            signal,
            value: clamp_unit(value),
            factors: Vec::new(),
            reasons: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_factor(mut self, factor: ScoreFactor) -> Self {
        self.factors.push(factor);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    /// Factor value by name.
    pub fn factor(&self, name: &str) -> Option<f64> {
        self.factors.iter().find(|f| f.name == name).map(|f| f.value)
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.factors
            .iter()
            .map(|f| format!("{}: {:.0}%", f.name, f.value * 100.0))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One independent similarity signal.
///
/// Scorers are pure: the same inputs always produce the same score, and
/// missing data degrades to a low or neutral value with a reason rather than
/// an error.
pub trait SignalScorer: Send + Sync {
    /// Which breakdown slot this scorer fills.
    fn signal(&self) -> Signal;

    /// Score a document profile against a type definition.
    fn score(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        config: &ScoringConfig,
    ) -> SignalScore;
}

/// Divide, returning `default` when the denominator is zero.
pub(crate) fn ratio_or(numerator: usize, denominator: usize, default: f64) -> f64 {
    if denominator == 0 {
        default
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_lists_factors() {
        let score = SignalScore::new(Signal::Structure, 0.75)
            .with_factor(ScoreFactor::new("Section count", 1.0, "4 vs 4"))
            .with_factor(ScoreFactor::new("Required coverage", 0.5, "2 of 4"));
        assert_eq!(score.explain(), "Section count: 100%; Required coverage: 50%");
        assert_eq!(score.factor("Required coverage"), Some(0.5));
    }

    #[test]
    fn value_is_clamped() {
        assert_eq!(SignalScore::new(Signal::Metadata, 1.4).value, 1.0);
        assert_eq!(SignalScore::new(Signal::Metadata, f64::NAN).value, 0.0);
    }
}
