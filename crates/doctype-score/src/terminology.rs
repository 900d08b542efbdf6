//! Terminology signal: declared standards, domain tags, and technical density.

use doctype_model::{Signal, TypeDefinition};

use crate::config::ScoringConfig;
use crate::profile::DocumentProfile;
use crate::signal::{ScoreFactor, SignalScore, SignalScorer, ratio_or};
use crate::text::{mentions, normalize_text};

const STANDARDS_WEIGHT: f64 = 0.4;
const TAGS_WEIGHT: f64 = 0.4;
const DENSITY_WEIGHT: f64 = 0.2;

/// Technical tokens per 100 words that saturate the density score.
const DENSITY_SATURATION: f64 = 15.0;

/// Stand-in for standards and tags when a type declares neither.
const NEUTRAL_VOCABULARY: f64 = 0.5;

/// Scores how much of a type's vocabulary appears in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminologyScorer;

impl SignalScorer for TerminologyScorer {
    fn signal(&self) -> Signal {
        Signal::Terminology
    }

    fn score(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        _config: &ScoringConfig,
    ) -> SignalScore {
        let density = profile.technical_density();
        let density_score = (density / DENSITY_SATURATION).min(1.0);

        let found_standards: Vec<&str> = definition
            .standards
            .iter()
            .filter(|s| profile.references_standard(s))
            .map(String::as_str)
            .collect();
        let found_tags = definition
            .tags
            .iter()
            .filter(|t| mentions(profile.text(), &normalize_text(t)))
            .count();

        let mut weighted = DENSITY_WEIGHT * density_score;
        let mut total_weight = DENSITY_WEIGHT;
        let mut factors = Vec::new();

        if definition.standards.is_empty() && definition.tags.is_empty() {
            weighted += (STANDARDS_WEIGHT + TAGS_WEIGHT) * NEUTRAL_VOCABULARY;
            total_weight += STANDARDS_WEIGHT + TAGS_WEIGHT;
        } else {
            if !definition.standards.is_empty() {
                let coverage = ratio_or(found_standards.len(), definition.standards.len(), 0.0);
                weighted += STANDARDS_WEIGHT * coverage;
                total_weight += STANDARDS_WEIGHT;
                factors.push(ScoreFactor::new(
                    "Standards",
                    coverage,
                    format!(
                        "{} of {} standards referenced",
                        found_standards.len(),
                        definition.standards.len()
                    ),
                ));
            }
            if !definition.tags.is_empty() {
                let coverage = ratio_or(found_tags, definition.tags.len(), 0.0);
                weighted += TAGS_WEIGHT * coverage;
                total_weight += TAGS_WEIGHT;
                factors.push(ScoreFactor::new(
                    "Domain terms",
                    coverage,
                    format!("{found_tags} of {} domain terms found", definition.tags.len()),
                ));
            }
        }
        factors.push(ScoreFactor::new(
            "Technical density",
            density_score,
            format!("{density:.1} technical tokens per 100 words"),
        ));

        let mut score = SignalScore::new(Signal::Terminology, weighted / total_weight);
        score.factors = factors;

        if !found_standards.is_empty() {
            score = score.with_reason(format!("References {}", found_standards.join(", ")));
        }
        if definition.standards.is_empty() && definition.tags.is_empty() {
            score = score.with_reason(format!(
                "{} declares no standards or domain terms; vocabulary is neutral",
                definition.name
            ));
        } else if found_tags > 0 && found_tags * 2 >= definition.tags.len() {
            score = score.with_reason(format!(
                "Uses {found_tags} of {} {} domain terms",
                definition.tags.len(),
                definition.name
            ));
        }
        if profile.word_count() == 0 {
            score = score.with_reason("Document has no text");
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctype_model::{Document, DocumentCategory, Section};

    fn score(doc: &Document, def: &TypeDefinition) -> SignalScore {
        TerminologyScorer.score(&DocumentProfile::new(doc), def, &ScoringConfig::default())
    }

    #[test]
    fn undeclared_vocabulary_is_neutral() {
        let def = TypeDefinition::new("t", "Plain", DocumentCategory::General);
        let result = score(&Document::new("d"), &def);
        // 0.8 * 0.5 + 0.2 * 0
        assert!((result.value - 0.4).abs() < 1e-9);
    }

    #[test]
    fn missing_component_is_renormalized() {
        let def = TypeDefinition::new("t", "Tagged", DocumentCategory::General)
            .with_tags(["risk", "finding"]);
        let doc = Document::new("d").with_section(Section::new(
            "Findings",
            "each risk and its findings are listed here",
        ));
        let result = score(&doc, &def);
        // tags 1.0 at weight 0.4, density 0 at 0.2: 0.4 / 0.6
        assert!((result.value - 0.4 / 0.6).abs() < 1e-9);
        assert_eq!(result.factor("Standards"), None);
    }

    #[test]
    fn standards_found_through_patterns() {
        let def = TypeDefinition::new("t", "Finance", DocumentCategory::Financial)
            .with_standards(["SOX", "IFRS"]);
        let doc = Document::new("d").with_section(Section::new(
            "Controls",
            "Controls were tested under Sarbanes-Oxley.",
        ));
        let result = score(&doc, &def);
        assert_eq!(result.factor("Standards"), Some(0.5));
        assert!(result.reasons.iter().any(|r| r == "References SOX"));
    }

    #[test]
    fn density_saturates() {
        let def = TypeDefinition::new("t", "Plain", DocumentCategory::General);
        let doc = Document::new("d").with_section(Section::new("", "API TLS SQL HTTP"));
        let result = score(&doc, &def);
        assert_eq!(result.factor("Technical density"), Some(1.0));
        assert!((result.value - 0.6).abs() < 1e-9);
    }
}
