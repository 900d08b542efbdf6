//! Property tests: every signal stays in [0, 1] for arbitrary inputs.

use doctype_model::{
    ComplexityLevel, ComplianceMarker, ComplianceRule, Document, DocumentCategory, Section,
    Severity, Signal, TerminologyEntry, TypeDefinition,
};
use doctype_score::{CompositeScorer, DocumentProfile};
use proptest::prelude::*;

const SECTION_NAMES: &[&str] = &[
    "Introduction",
    "Executive Summary",
    "Scope",
    "Methodology",
    "Findings",
    "Results",
    "Discussion",
    "Conclusion",
    "Appendix",
    "Revenue",
    "Parties",
    "Timeline",
];

const STANDARDS: &[&str] = &["ISO 27001", "GDPR", "SOX", "HIPAA", "Internal Standard 7"];

fn category() -> impl Strategy<Value = DocumentCategory> {
    prop::sample::select(DocumentCategory::ALL.to_vec())
}

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(vec![
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ])
}

fn section() -> impl Strategy<Value = Section> {
    (
        prop::sample::select(SECTION_NAMES),
        "[A-Za-z0-9 .,%≥:-]{0,80}",
        1u8..4,
    )
        .prop_map(|(title, content, level)| Section::new(title, content).at_level(level))
}

fn document() -> impl Strategy<Value = Document> {
    (
        prop::option::of("[A-Za-z ]{0,30}"),
        prop::collection::vec(section(), 0..8),
        prop::collection::vec("[A-Za-z0-9 ]{1,20}", 0..5),
        prop::collection::vec(
            (
                "[A-Z0-9-]{1,8}",
                "[a-z ]{0,30}",
                prop::option::of(prop::sample::select(STANDARDS)),
                prop::option::of(severity()),
            ),
            0..4,
        ),
        prop::option::of(prop::sample::select(vec!["legal", "technical", "nonsense"])),
    )
        .prop_map(|(title, sections, terms, markers, declared)| {
            let mut doc = Document::new("prop-doc");
            doc.title = title;
            doc.sections = sections;
            doc.terminology = terms.into_iter().map(TerminologyEntry::new).collect();
            doc.compliance_markers = markers
                .into_iter()
                .map(|(kind, text, standard, severity)| {
                    let mut marker = ComplianceMarker::new(kind, text);
                    marker.standard = standard.map(str::to_string);
                    marker.severity = severity;
                    marker
                })
                .collect();
            if let Some(category) = declared {
                doc.metadata.insert("category".to_string(), category.to_string().into());
            }
            doc
        })
}

fn definition() -> impl Strategy<Value = TypeDefinition> {
    (
        category(),
        prop::sample::subsequence(SECTION_NAMES, 0..6),
        prop::sample::subsequence(SECTION_NAMES, 0..3),
        prop::sample::subsequence(STANDARDS, 0..3),
        prop::collection::vec("[a-z]{3,10}", 0..4),
        prop::collection::vec(("[A-Z]{2,4}", severity()), 0..3),
        prop::sample::select(vec![
            ComplexityLevel::Low,
            ComplexityLevel::Medium,
            ComplexityLevel::High,
        ]),
    )
        .prop_map(
            |(category, required, optional, standards, tags, rules, complexity)| {
                let mut def = TypeDefinition::new("prop-type", "Prop Type", category)
                    .with_required_sections(required)
                    .with_optional_sections(optional)
                    .with_standards(standards)
                    .with_tags(tags)
                    .with_audience(["executives"])
                    .with_complexity(complexity);
                for (id, severity) in rules {
                    def = def.with_rule(ComplianceRule::new(id.clone(), id, severity));
                }
                def
            },
        )
}

proptest! {
    #[test]
    fn sub_scores_and_composite_are_bounded(doc in document(), def in definition()) {
        let scorer = CompositeScorer::default();
        let profile = DocumentProfile::new(&doc);

        for score in scorer.signal_scores(&profile, &def) {
            prop_assert!(score.value.is_finite());
            prop_assert!((0.0..=1.0).contains(&score.value), "{} = {}", score.signal, score.value);
        }

        let candidate = scorer.score(&profile, &def);
        prop_assert!((0.0..=1.0).contains(&candidate.composite_score));
        for signal in Signal::ALL {
            prop_assert!((0.0..=1.0).contains(&candidate.breakdown.get(signal)));
        }
    }

    #[test]
    fn scoring_is_repeatable(doc in document(), def in definition()) {
        let scorer = CompositeScorer::default();
        let first = scorer.score_document(&doc, &def);
        let second = scorer.score_document(&doc, &def);
        prop_assert_eq!(first, second);
    }
}
