//! Static lookup tables used by the scorers.
//!
//! All phrases are stored already normalized (see [`crate::text::normalize_text`]).

use doctype_model::DocumentCategory;

use crate::text::{contains_phrase, normalize_text};

/// Known standards and the phrases that reference them.
///
/// The first entry of each alias list is the canonical normalized name.
pub const STANDARD_PATTERNS: &[(&str, &[&str])] = &[
    ("ISO 27001", &["iso 27001", "iso iec 27001", "iso27001", "isms"]),
    ("ISO 9001", &["iso 9001", "iso9001", "quality management system"]),
    ("ISO 25010", &["iso 25010", "iso iec 25010", "software product quality"]),
    ("NIST SP 800-53", &["nist sp 800 53", "nist 800 53", "sp 800 53"]),
    ("NIST CSF", &["nist csf", "cybersecurity framework"]),
    ("SOC 2", &["soc 2", "soc2", "service organization control"]),
    ("GDPR", &["gdpr", "general data protection regulation"]),
    ("HIPAA", &["hipaa", "health insurance portability and accountability act"]),
    ("PCI DSS", &["pci dss", "payment card industry data security standard"]),
    ("SOX", &["sox", "sarbanes oxley"]),
    ("GAAP", &["gaap", "generally accepted accounting principles"]),
    ("IFRS", &["ifrs", "international financial reporting standards"]),
    ("ICH E3", &["ich e3", "structure and content of clinical study reports"]),
    ("ICH GCP", &["ich gcp", "ich e6", "good clinical practice"]),
    ("21 CFR Part 11", &["21 cfr part 11", "21 cfr 11", "part 11"]),
    ("ITIL", &["itil", "it infrastructure library"]),
    ("IEEE 830", &["ieee 830", "software requirements specification"]),
];

/// Alias phrases for a standard, if it is in the pattern table.
pub fn standard_aliases(standard: &str) -> Option<&'static [&'static str]> {
    let normalized = normalize_text(standard);
    STANDARD_PATTERNS
        .iter()
        .find(|(name, aliases)| {
            normalize_text(name) == normalized || aliases.contains(&normalized.as_str())
        })
        .map(|(_, aliases)| *aliases)
}

/// True when normalized `text` references `standard` through the pattern table.
pub fn standard_pattern_matches(text: &str, standard: &str) -> bool {
    standard_aliases(standard)
        .is_some_and(|aliases| aliases.iter().any(|alias| contains_phrase(text, alias)))
}

/// Keywords indicating a category. `General` has none.
pub fn category_indicators(category: DocumentCategory) -> &'static [&'static str] {
    match category {
        DocumentCategory::Technical => &[
            "architecture",
            "api",
            "implementation",
            "interface",
            "specification",
            "software",
            "deployment",
            "configuration",
            "protocol",
            "system design",
        ],
        DocumentCategory::Compliance => &[
            "compliance",
            "audit",
            "control",
            "regulation",
            "regulatory",
            "policy",
            "risk",
            "assessment",
            "certification",
            "remediation",
        ],
        DocumentCategory::Financial => &[
            "revenue",
            "balance sheet",
            "income",
            "expense",
            "fiscal",
            "budget",
            "cash flow",
            "assets",
            "liabilities",
            "profit",
        ],
        DocumentCategory::Legal => &[
            "agreement",
            "party",
            "parties",
            "hereby",
            "clause",
            "indemnify",
            "jurisdiction",
            "termination",
            "contract",
            "warranty",
        ],
        DocumentCategory::Medical => &[
            "patient",
            "clinical",
            "diagnosis",
            "treatment",
            "adverse event",
            "dosage",
            "trial",
            "therapy",
            "efficacy",
            "placebo",
        ],
        DocumentCategory::Research => &[
            "hypothesis",
            "methodology",
            "abstract",
            "literature",
            "experiment",
            "dataset",
            "statistical",
            "significance",
            "prior work",
            "peer review",
        ],
        DocumentCategory::Operational => &[
            "procedure",
            "step",
            "responsibilities",
            "incident",
            "workflow",
            "escalation",
            "runbook",
            "maintenance",
            "on call",
            "checklist",
        ],
        DocumentCategory::General => &[],
    }
}

/// Synonyms for common audience names.
const AUDIENCE_SYNONYMS: &[(&str, &[&str])] = &[
    ("executives", &["executive", "management", "leadership", "board"]),
    ("auditors", &["auditor", "audit committee", "assessor"]),
    ("engineers", &["engineer", "developer", "engineering team"]),
    ("architects", &["architect", "technical lead"]),
    ("regulators", &["regulator", "regulatory authority", "supervisory authority"]),
    ("clinicians", &["clinician", "physician", "investigator"]),
    ("legal", &["counsel", "attorney", "lawyer", "legal team"]),
    ("investors", &["investor", "shareholder"]),
    ("researchers", &["researcher", "scientist"]),
    ("academics", &["academic", "scholar"]),
    ("operations", &["operations team", "operator", "sre"]),
    ("staff", &["employee", "personnel"]),
    ("security team", &["security team", "security officer", "ciso"]),
    ("data protection officer", &["dpo", "privacy officer"]),
];

/// Synonyms for an audience (not including the audience itself).
pub fn audience_synonyms(audience: &str) -> &'static [&'static str] {
    let normalized = normalize_text(audience);
    AUDIENCE_SYNONYMS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, synonyms)| *synonyms)
        .unwrap_or_default()
}

/// Category-typical complexity index range (inclusive).
pub fn complexity_range(category: DocumentCategory) -> (f64, f64) {
    match category {
        DocumentCategory::Technical | DocumentCategory::Compliance | DocumentCategory::Medical => {
            (0.4, 0.9)
        }
        DocumentCategory::Financial => (0.3, 0.8),
        DocumentCategory::Legal | DocumentCategory::Research => (0.5, 1.0),
        DocumentCategory::Operational => (0.2, 0.6),
        DocumentCategory::General => (0.0, 1.0),
    }
}

/// Section templates per category used by the ordering scorer.
pub fn section_templates(category: DocumentCategory) -> &'static [&'static [&'static str]] {
    match category {
        DocumentCategory::Technical => &[
            &[
                "introduction",
                "requirements",
                "architecture",
                "design",
                "implementation",
                "testing",
            ],
            &["overview", "interfaces", "data model", "deployment"],
        ],
        DocumentCategory::Compliance => &[
            &["executive summary", "scope", "methodology", "findings", "recommendations"],
            &["introduction", "assessment", "risk analysis", "mitigation", "conclusion"],
        ],
        DocumentCategory::Financial => &[&[
            "executive summary",
            "financial overview",
            "revenue",
            "expenses",
            "outlook",
        ]],
        DocumentCategory::Legal => &[&[
            "parties",
            "definitions",
            "terms",
            "obligations",
            "termination",
            "signatures",
        ]],
        DocumentCategory::Medical => &[&[
            "synopsis",
            "introduction",
            "objectives",
            "methods",
            "results",
            "safety",
            "conclusions",
        ]],
        DocumentCategory::Research => &[&[
            "abstract",
            "introduction",
            "methods",
            "results",
            "discussion",
            "conclusion",
        ]],
        DocumentCategory::Operational => &[
            &["summary", "timeline", "impact", "root cause", "corrective actions"],
            &["purpose", "scope", "responsibilities", "procedure", "records"],
        ],
        DocumentCategory::General => &[],
    }
}

/// Logical role of a section within a document's flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRole {
    Introduction,
    Analysis,
    Conclusion,
}

const CONCLUSION_WORDS: &[&str] = &[
    "conclusion",
    "conclusions",
    "recommendations",
    "next steps",
    "outlook",
    "lessons learned",
    "closing remarks",
    "corrective actions",
];

const INTRODUCTION_WORDS: &[&str] = &[
    "introduction",
    "overview",
    "summary",
    "abstract",
    "synopsis",
    "purpose",
    "background",
    "scope",
    "preface",
];

const ANALYSIS_WORDS: &[&str] = &[
    "analysis",
    "methodology",
    "methods",
    "findings",
    "results",
    "evaluation",
    "assessment",
    "discussion",
    "design",
    "procedure",
    "timeline",
    "impact",
];

/// Classify a normalized section title by its flow role.
///
/// Conclusion words win over introduction words, which win over analysis
/// words, so "Summary of Findings" is read as an introduction.
pub fn section_role(title: &str) -> Option<SectionRole> {
    if CONCLUSION_WORDS.iter().any(|w| contains_phrase(title, w)) {
        Some(SectionRole::Conclusion)
    } else if INTRODUCTION_WORDS.iter().any(|w| contains_phrase(title, w)) {
        Some(SectionRole::Introduction)
    } else if ANALYSIS_WORDS.iter().any(|w| contains_phrase(title, w)) {
        Some(SectionRole::Analysis)
    } else {
        None
    }
}
