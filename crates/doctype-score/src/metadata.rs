//! Metadata signal: category indicators, audience, and complexity.

use std::str::FromStr;

use doctype_model::{DocumentCategory, Signal, TypeDefinition};

use crate::config::ScoringConfig;
use crate::lexicon::{audience_synonyms, category_indicators, complexity_range};
use crate::profile::DocumentProfile;
use crate::signal::{ScoreFactor, SignalScore, SignalScorer, ratio_or};
use crate::text::{contains_phrase, mentions, normalize_text};

/// Category score when no category indicator appears anywhere.
const NO_INDICATORS: f64 = 0.3;

/// Category score for `General` types, which have no indicators of their own.
const GENERAL_CATEGORY: f64 = 0.5;

/// Complexity score when the document has no body text.
const NO_TEXT_COMPLEXITY: f64 = 0.2;

/// Scores category, audience, and complexity alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataScorer;

impl MetadataScorer {
    fn indicator_hits(text: &str, category: DocumentCategory) -> usize {
        category_indicators(category)
            .iter()
            .filter(|word| mentions(text, word))
            .count()
    }

    fn category_score(profile: &DocumentProfile<'_>, category: DocumentCategory) -> (f64, String) {
        let declared = profile
            .document()
            .metadata_value("category")
            .and_then(|value| DocumentCategory::from_str(value).ok());
        if declared == Some(category) {
            return (1.0, format!("Metadata declares category {category}"));
        }
        if category == DocumentCategory::General {
            return (GENERAL_CATEGORY, "General category has no indicators".to_string());
        }

        let text = profile.text();
        let best = DocumentCategory::ALL
            .iter()
            .map(|c| Self::indicator_hits(text, *c))
            .max()
            .unwrap_or(0);
        if best == 0 {
            return (NO_INDICATORS, "No category indicators found".to_string());
        }
        let hits = Self::indicator_hits(text, category);
        (
            ratio_or(hits, best, 0.0),
            format!("{hits} {category} indicators (best category has {best})"),
        )
    }

    fn audience_found(profile: &DocumentProfile<'_>, audience: &str) -> bool {
        let normalized = normalize_text(audience);
        let declared = profile
            .document()
            .metadata_value("audience")
            .map(normalize_text)
            .unwrap_or_default();
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);
        [normalized.as_str(), singular]
            .into_iter()
            .chain(audience_synonyms(audience).iter().copied())
            .any(|candidate| {
                mentions(profile.text(), candidate) || contains_phrase(&declared, candidate)
            })
    }

    fn complexity_score(
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
    ) -> (f64, String) {
        let Some(index) = profile.complexity_index() else {
            return (NO_TEXT_COMPLEXITY, "No body text to estimate complexity".to_string());
        };
        let deviation = (index - definition.complexity.expected_index()).abs();
        let declared = 1.0 - (deviation / 0.5).min(1.0);
        let (low, high) = complexity_range(definition.category);
        let distance = if index < low {
            low - index
        } else if index > high {
            index - high
        } else {
            0.0
        };
        let range = 1.0 - (distance / 0.5).min(1.0);
        (
            0.6 * declared + 0.4 * range,
            format!(
                "Complexity index {index:.2} vs expected {} ({:.2})",
                definition.complexity,
                definition.complexity.expected_index()
            ),
        )
    }
}

impl SignalScorer for MetadataScorer {
    fn signal(&self) -> Signal {
        Signal::Metadata
    }

    fn score(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        _config: &ScoringConfig,
    ) -> SignalScore {
        let (category, category_note) = Self::category_score(profile, definition.category);

        let audiences = &definition.target_audience;
        let found = audiences
            .iter()
            .filter(|a| Self::audience_found(profile, a))
            .count();
        let audience = ratio_or(found, audiences.len(), 0.5);

        let (complexity, complexity_note) = Self::complexity_score(profile, definition);

        let value = 0.4 * category + 0.3 * audience + 0.3 * complexity;
        let mut score = SignalScore::new(Signal::Metadata, value)
            .with_factor(ScoreFactor::new("Category", category, category_note))
            .with_factor(ScoreFactor::new(
                "Audience",
                audience,
                format!("{found} of {} audiences addressed", audiences.len()),
            ))
            .with_factor(ScoreFactor::new("Complexity", complexity, complexity_note));

        if category >= 1.0 {
            score = score.with_reason(format!(
                "Content reads as {} material",
                definition.category
            ));
        }
        if found > 0 {
            score = score.with_reason(format!(
                "Addresses {found} of {} intended audiences",
                audiences.len()
            ));
        }
        if profile.complexity_index().is_none() {
            score = score.with_reason("No body text to estimate complexity");
        }
        score
    }
}
