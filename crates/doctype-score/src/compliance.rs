//! Compliance-marker signal: rule coverage, standard coverage, and severity.

use doctype_model::{ComplianceMarker, ComplianceRule, Signal, TypeDefinition};

use crate::config::ScoringConfig;
use crate::lexicon::standard_pattern_matches;
use crate::profile::DocumentProfile;
use crate::signal::{ScoreFactor, SignalScore, SignalScorer, ratio_or};
use crate::text::{contains_phrase, normalize_text};

/// Coverage value used when a type declares no rules or no standards.
const UNDECLARED_COVERAGE: f64 = 0.3;

/// Scores how well a document's compliance markers fit a type's rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceScorer;

impl ComplianceScorer {
    /// Whether the document references a compliance rule.
    fn rule_referenced(profile: &DocumentProfile<'_>, rule: &ComplianceRule) -> bool {
        let text = profile.text();
        let mentioned = [&rule.id, &rule.name]
            .into_iter()
            .chain(rule.keywords.iter())
            .any(|phrase| contains_phrase(text, &normalize_text(phrase)));
        if mentioned {
            return true;
        }

        let rule_standard = rule.standard.as_deref().map(normalize_text);
        let by_marker = profile.document().compliance_markers.iter().any(|marker| {
            marker.marker_type.eq_ignore_ascii_case(&rule.id)
                || match (&rule_standard, marker.standard.as_deref()) {
                    (Some(expected), Some(actual)) => normalize_text(actual) == *expected,
                    _ => false,
                }
        });
        by_marker
            || rule
                .standard
                .as_deref()
                .is_some_and(|standard| standard_pattern_matches(text, standard))
    }
}

impl SignalScorer for ComplianceScorer {
    fn signal(&self) -> Signal {
        Signal::Compliance
    }

    fn score(
        &self,
        profile: &DocumentProfile<'_>,
        definition: &TypeDefinition,
        config: &ScoringConfig,
    ) -> SignalScore {
        let rules = &definition.compliance_rules;
        let referenced_rules: Vec<&ComplianceRule> = rules
            .iter()
            .filter(|rule| Self::rule_referenced(profile, rule))
            .collect();
        let rule_coverage = ratio_or(referenced_rules.len(), rules.len(), UNDECLARED_COVERAGE);

        let standards = &definition.standards;
        let referenced_standards = standards
            .iter()
            .filter(|s| profile.references_standard(s))
            .count();
        let standard_coverage =
            ratio_or(referenced_standards, standards.len(), UNDECLARED_COVERAGE);

        let bands = config.thresholds.severity;
        let expects_critical = definition.expects_critical_markers();
        let has_critical = profile
            .document()
            .compliance_markers
            .iter()
            .any(ComplianceMarker::is_critical);
        let (severity, severity_note) = match (expects_critical, has_critical) {
            (true, true) => (bands.both, "Critical markers present as expected"),
            (false, false) => (bands.neither, "No critical markers expected or found"),
            (true, false) => (bands.expected_absent, "Expected critical markers are missing"),
            (false, true) => (bands.unexpected_present, "Unexpected critical markers found"),
        };

        let value = 0.45 * rule_coverage + 0.35 * standard_coverage + 0.2 * severity;
        let mut score = SignalScore::new(Signal::Compliance, value)
            .with_factor(ScoreFactor::new(
                "Rule coverage",
                rule_coverage,
                format!("{} of {} rules referenced", referenced_rules.len(), rules.len()),
            ))
            .with_factor(ScoreFactor::new(
                "Standard coverage",
                standard_coverage,
                format!(
                    "{referenced_standards} of {} standards referenced",
                    standards.len()
                ),
            ))
            .with_factor(ScoreFactor::new("Severity alignment", severity, severity_note));

        if !referenced_rules.is_empty() {
            let ids: Vec<&str> = referenced_rules.iter().map(|r| r.id.as_str()).collect();
            score = score.with_reason(format!("Compliance rules referenced: {}", ids.join(", ")));
        }
        if rules.is_empty() && standards.is_empty() {
            score = score.with_reason(format!(
                "{} declares no compliance rules or standards",
                definition.name
            ));
        }
        if expects_critical != has_critical {
            score = score.with_reason(severity_note);
        }
        score
    }
}
