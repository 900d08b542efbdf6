//! Tests for doctype-model types.

use chrono::{Duration, Utc};
use doctype_model::{
    AmbiguityLevel, ClassificationCandidate, ClassificationResult, ClassificationTimestamps,
    ComplianceRule, Document, DocumentCategory, ScoreBreakdown, Severity, TypeDefinition,
};

fn sample_result() -> ClassificationResult {
    let started = Utc::now();
    let mut first = ClassificationCandidate::new(
        "security-audit",
        "Security Audit Report",
        0.8123456789012345,
        ScoreBreakdown::new(0.91, 0.72, 0.66, 0.58, 0.81),
        vec!["Strong structure match (91%)".to_string()],
    );
    first.rank = 1;
    first.ranking_score = Some(0.7345678901234567);
    let mut second = ClassificationCandidate::new(
        "technical-spec",
        "Technical Specification",
        0.4123,
        ScoreBreakdown::new(0.4, 0.3, 0.38, 0.5, 0.45),
        vec![],
    );
    second.rank = 2;
    second.ranking_score = Some(0.41);
    ClassificationResult {
        id: ClassificationResult::generate_id(),
        document_id: "doc-42".to_string(),
        ranked_candidates: vec![first, second],
        confidence_score: 0.7419,
        ambiguity_level: AmbiguityLevel::None,
        reasons: vec!["Classification is clear".to_string()],
        timestamps: ClassificationTimestamps {
            started,
            completed: started + Duration::milliseconds(12),
        },
        refined: true,
    }
}

#[test]
fn result_round_trips_through_json() {
    let result = sample_result();
    result.validate().expect("sample result is valid");

    let json = serde_json::to_string(&result).expect("serialize result");
    let round: ClassificationResult = serde_json::from_str(&json).expect("deserialize result");

    assert_eq!(round, result);
    let order: Vec<&str> = round
        .ranked_candidates
        .iter()
        .map(|c| c.type_id.as_str())
        .collect();
    assert_eq!(order, ["security-audit", "technical-spec"]);
    assert_eq!(
        round.ranked_candidates[0].composite_score.to_bits(),
        result.ranked_candidates[0].composite_score.to_bits()
    );
}

#[test]
fn result_json_uses_kebab_case_ambiguity() {
    let mut result = sample_result();
    result.ambiguity_level = AmbiguityLevel::VeryHigh;
    let value: serde_json::Value = serde_json::to_value(&result).expect("to value");
    assert_eq!(value["ambiguity_level"], "very-high");
}

#[test]
fn type_definition_deserializes_with_defaults() {
    let json = r#"{
        "id": "incident-report",
        "name": "Incident Report",
        "category": "operational",
        "required_sections": ["Summary", "Timeline", "Root Cause"],
        "compliance_rules": [
            {"id": "IR-1", "name": "Notification", "severity": "critical", "keywords": ["notified"]}
        ]
    }"#;
    let ty: TypeDefinition = serde_json::from_str(json).expect("parse type");
    assert_eq!(ty.category, DocumentCategory::Operational);
    assert_eq!(ty.section_count(), 3);
    assert!(ty.expects_critical_markers());
    assert!(ty.standards.is_empty());
}

#[test]
fn type_builder_counts_sections() {
    let ty = TypeDefinition::new("a", "A", DocumentCategory::Technical)
        .with_required_sections(["Introduction", "Design"])
        .with_optional_sections(["Appendix"])
        .with_rule(ComplianceRule::new("R1", "Rule", Severity::Low));
    assert_eq!(ty.section_count(), 3);
    assert_eq!(
        ty.all_sections().collect::<Vec<_>>(),
        ["Introduction", "Design", "Appendix"]
    );
    assert!(!ty.expects_critical_markers());
}

#[test]
fn document_full_text_includes_every_source() {
    let doc: Document = serde_json::from_str(
        r#"{
            "id": "d",
            "title": "Quarterly Review",
            "sections": [{"title": "Overview", "content": "Revenue grew."}],
            "terminology": [{"term": "EBITDA"}],
            "compliance_markers": [{"type": "SOX", "text": "Sarbanes-Oxley section 404"}]
        }"#,
    )
    .expect("parse document");
    let text = doc.full_text();
    for needle in ["Quarterly Review", "Overview", "Revenue grew.", "EBITDA", "Sarbanes-Oxley"] {
        assert!(text.contains(needle), "missing {needle}");
    }
    assert_eq!(doc.sections[0].level, 1);
}
