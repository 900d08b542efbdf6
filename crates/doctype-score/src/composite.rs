//! Weighted combination of the five signals.

use doctype_model::{ClassificationCandidate, Document, ScoreBreakdown, TypeDefinition, clamp_unit};

use crate::compliance::ComplianceScorer;
use crate::config::ScoringConfig;
use crate::metadata::MetadataScorer;
use crate::ordering::OrderingScorer;
use crate::profile::DocumentProfile;
use crate::signal::{SignalScore, SignalScorer};
use crate::structure::StructureScorer;
use crate::terminology::TerminologyScorer;

/// Runs every signal scorer and combines the results into a candidate.
pub struct CompositeScorer {
    config: ScoringConfig,
    scorers: Vec<Box<dyn SignalScorer>>,
}

impl std::fmt::Debug for CompositeScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeScorer")
            .field("config", &self.config)
            .field(
                "signals",
                &self.scorers.iter().map(|s| s.signal()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl CompositeScorer {
    /// Composite scorer with the five standard signals.
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            scorers: vec![
                Box::new(StructureScorer),
                Box::new(TerminologyScorer),
                Box::new(ComplianceScorer),
                Box::new(MetadataScorer),
                Box::new(OrderingScorer),
            ],
        }
    }

    /// Replace the scorer for one signal (matched by [`SignalScorer::signal`]).
    #[must_use]
    pub fn with_scorer(mut self, scorer: Box<dyn SignalScorer>) -> Self {
        let signal = scorer.signal();
        self.scorers.retain(|s| s.signal() != signal);
        self.scorers.push(scorer);
        self
    }

    /// The scoring configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run every scorer against one type.
    pub fn signal_scores(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
    ) -> Vec<SignalScore> {
        self.scorers
            .iter()
            .map(|scorer| scorer.score(profile, definition, &self.config))
            .collect()
    }

    /// Score one type and build its (unranked) candidate.
    pub fn score(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
    ) -> ClassificationCandidate {
        self.combine(definition, self.signal_scores(profile, definition))
    }

    /// Convenience wrapper that builds the profile first.
    pub fn score_document(
        &self,
        document: &Document,
        definition: &TypeDefinition,
    ) -> ClassificationCandidate {
        self.score(&DocumentProfile::new(document), definition)
    }

    /// Combine signal scores into a candidate.
    pub fn combine(
        &self,
        definition: &TypeDefinition,
        scores: Vec<SignalScore>,
    ) -> ClassificationCandidate {
        let weights = &self.config.weights;
        let strong = self.config.thresholds.strong_match_threshold;

        let mut breakdown = ScoreBreakdown::default();
        let mut strong_reasons = Vec::new();
        let mut composite = 0.0;
        for score in scores {
            breakdown.set(score.signal, score.value);
            composite += weights.get(score.signal) * score.value;
            if score.value > strong {
                strong_reasons.push(format!(
                    "Strong {} match ({:.2})",
                    score.signal, score.value
                ));
            }
            breakdown.reasons.extend(score.reasons);
        }
        let composite = clamp_unit(composite);

        tracing::debug!(
            type_id = %definition.id,
            composite,
            structure = breakdown.structure,
            terminology = breakdown.terminology,
            compliance = breakdown.compliance,
            metadata = breakdown.metadata,
            ordering = breakdown.ordering,
            "Scored candidate"
        );

        let mut reasons = strong_reasons;
        reasons.extend(breakdown.reasons.iter().cloned());
        ClassificationCandidate::new(
            definition.id.clone(),
            definition.name.clone(),
            composite,
            breakdown,
            reasons,
        )
    }
}
