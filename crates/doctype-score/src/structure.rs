//! Structure signal: section count, required coverage, and hierarchy.

use doctype_model::{ComplexityLevel, Signal, TypeDefinition};

use crate::config::ScoringConfig;
use crate::profile::DocumentProfile;
use crate::signal::{ScoreFactor, SignalScore, SignalScorer, ratio_or};

/// Neutral score for types that declare no sections.
pub const NEUTRAL_STRUCTURE: f64 = 0.5;

/// Types declaring at least this many sections are expected to nest them.
const HIERARCHY_SECTION_COUNT: usize = 8;

/// Compares a document's section layout with a type's declared sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureScorer;

impl SignalScorer for StructureScorer {
    fn signal(&self) -> Signal {
        Signal::Structure
    }

    fn score(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        config: &ScoringConfig,
    ) -> SignalScore {
        let expected = definition.section_count();
        if expected == 0 {
            return SignalScore::new(Signal::Structure, NEUTRAL_STRUCTURE).with_reason(format!(
                "{} declares no sections; structure is neutral",
                definition.name
            ));
        }

        let actual = profile.section_count();
        let count_ratio = ratio_or(actual.min(expected), actual.max(expected), 0.0);
        let count = 0.2 + 0.8 * count_ratio;

        let similarity = config.thresholds.section_similarity;
        let required = &definition.required_sections;
        let matched: Vec<&str> = required
            .iter()
            .filter(|name| profile.find_section(name, similarity).is_some())
            .map(String::as_str)
            .collect();
        let coverage = ratio_or(matched.len(), required.len(), 0.5);

        let document_nested = profile.document().is_hierarchical();
        let type_nested =
            definition.complexity == ComplexityLevel::High || expected >= HIERARCHY_SECTION_COUNT;
        let hierarchy = if document_nested == type_nested { 0.9 } else { 0.3 };

        let value = 0.5 * count + 0.3 * coverage + 0.2 * hierarchy;
        tracing::trace!(
            type_id = %definition.id,
            actual,
            expected,
            coverage,
            hierarchy,
            "Structure score"
        );

        let mut score = SignalScore::new(Signal::Structure, value)
            .with_factor(ScoreFactor::new(
                "Section count",
                count,
                format!("{actual} sections vs {expected} declared"),
            ))
            .with_factor(ScoreFactor::new(
                "Required coverage",
                coverage,
                format!("{} of {} required sections present", matched.len(), required.len()),
            ))
            .with_factor(ScoreFactor::new(
                "Hierarchy",
                hierarchy,
                if document_nested == type_nested {
                    "Nesting matches the type".to_string()
                } else {
                    "Nesting differs from the type".to_string()
                },
            ));

        if actual == 0 {
            score = score.with_reason("Document has no sections");
        } else if !required.is_empty() {
            if matched.len() == required.len() {
                score = score.with_reason(format!(
                    "All {} required sections of {} are present",
                    required.len(),
                    definition.name
                ));
            } else if !matched.is_empty() {
                score = score.with_reason(format!(
                    "{} of {} required sections of {} are present",
                    matched.len(),
                    required.len(),
                    definition.name
                ));
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctype_model::{Document, DocumentCategory, Section};

    fn score(doc: &Document, def: &TypeDefinition) -> SignalScore {
        StructureScorer.score(&DocumentProfile::new(doc), def, &ScoringConfig::default())
    }

    #[test]
    fn empty_type_is_neutral() {
        let doc = Document::new("d").with_section(Section::new("Intro", "text"));
        let def = TypeDefinition::new("empty", "Empty", DocumentCategory::General);
        let result = score(&doc, &def);
        assert_eq!(result.value, NEUTRAL_STRUCTURE);
        assert!(!result.value.is_nan());
    }

    #[test]
    fn exact_layout_scores_high() {
        let def = TypeDefinition::new("a", "Type A", DocumentCategory::Compliance)
            .with_required_sections(["Scope", "Findings", "Recommendations"])
            .with_optional_sections(["Appendix"]);
        let doc = Document::new("d")
            .with_section(Section::new("Scope", ""))
            .with_section(Section::new("Findings", ""))
            .with_section(Section::new("Recommendations", ""))
            .with_section(Section::new("Appendix", ""));
        let result = score(&doc, &def);
        // 0.5 * 1.0 + 0.3 * 1.0 + 0.2 * 0.9
        assert!((result.value - 0.98).abs() < 1e-9);
        assert_eq!(result.factor("Required coverage"), Some(1.0));
    }

    #[test]
    fn empty_document_scores_low() {
        let def = TypeDefinition::new("a", "Type A", DocumentCategory::Compliance)
            .with_required_sections(["Scope"]);
        let result = score(&Document::new("d"), &def);
        // count 0.2, coverage 0, hierarchy agrees (flat vs flat)
        assert!((result.value - (0.1 + 0.18)).abs() < 1e-9);
        assert_eq!(result.reasons, ["Document has no sections"]);
    }

    #[test]
    fn nesting_mismatch_is_penalized() {
        let def = TypeDefinition::new("a", "Type A", DocumentCategory::Technical)
            .with_required_sections(["Design"])
            .with_complexity(ComplexityLevel::High);
        let flat = Document::new("d").with_section(Section::new("Design", ""));
        let nested = Document::new("d").with_section(Section::new("Design", "").at_level(2));
        assert_eq!(score(&flat, &def).factor("Hierarchy"), Some(0.3));
        assert_eq!(score(&nested, &def).factor("Hierarchy"), Some(0.9));
    }
}
