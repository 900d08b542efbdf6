//! Type-safe enumerations shared by documents, type definitions, and results.
//!
//! These enums replace the free-form strings emitted by upstream parsers and
//! catalog files. Parsing is case-insensitive and tolerant of the common
//! spellings found in catalog JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad category a document type belongs to.
///
/// The category drives the metadata scorer's keyword indicators, the
/// category-typical complexity range, and the ordering templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    /// Engineering and system documentation.
    Technical,
    /// Audit, control, and regulatory compliance reports.
    Compliance,
    /// Financial statements and budget reports.
    Financial,
    /// Contracts, policies, and legal opinions.
    Legal,
    /// Clinical and medical documentation.
    Medical,
    /// Research papers and study reports.
    Research,
    /// Procedures, runbooks, and operational reports.
    Operational,
    /// Anything without a more specific category.
    #[serde(other)]
    General,
}

impl DocumentCategory {
    /// All categories, in declaration order.
    pub const ALL: [DocumentCategory; 8] = [
        DocumentCategory::Technical,
        DocumentCategory::Compliance,
        DocumentCategory::Financial,
        DocumentCategory::Legal,
        DocumentCategory::Medical,
        DocumentCategory::Research,
        DocumentCategory::Operational,
        DocumentCategory::General,
    ];

    /// Returns the lowercase identifier used in catalog files.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Technical => "technical",
            DocumentCategory::Compliance => "compliance",
            DocumentCategory::Financial => "financial",
            DocumentCategory::Legal => "legal",
            DocumentCategory::Medical => "medical",
            DocumentCategory::Research => "research",
            DocumentCategory::Operational => "operational",
            DocumentCategory::General => "general",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        DocumentCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| format!("Unknown document category: {s}"))
    }
}

/// Declared text complexity of a document type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    /// Short, plain-language documents.
    Low,
    /// Typical business or technical prose.
    #[default]
    Medium,
    /// Long documents with dense, technical sentences.
    High,
}

impl ComplexityLevel {
    /// Returns the lowercase identifier used in catalog files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "low",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::High => "high",
        }
    }

    /// Expected value of the complexity index (0.0 to 1.0) for this level.
    pub fn expected_index(&self) -> f64 {
        match self {
            ComplexityLevel::Low => 0.25,
            ComplexityLevel::Medium => 0.5,
            ComplexityLevel::High => 0.8,
        }
    }

    /// Bucket a complexity index into a level.
    pub fn from_index(index: f64) -> Self {
        if index < 0.35 {
            ComplexityLevel::Low
        } else if index < 0.65 {
            ComplexityLevel::Medium
        } else {
            ComplexityLevel::High
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a compliance rule or of a marker found in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational or advisory.
    Low,
    /// Should be addressed.
    #[default]
    Medium,
    /// Must be addressed.
    High,
    /// Blocking; non-compliance invalidates the document.
    Critical,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "info" | "informational" => Some(Self::Low),
            "medium" | "moderate" | "warning" => Some(Self::Medium),
            "high" | "error" | "major" => Some(Self::High),
            "critical" | "blocker" | "reject" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// How reliable the top classification choice is.
///
/// Ordered from least to most ambiguous, so `level >= AmbiguityLevel::High`
/// reads as "needs human review".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityLevel {
    /// Clear winner.
    None,
    /// Winner is likely correct.
    Low,
    /// Runner-up is a plausible alternative.
    Medium,
    /// Top candidates are hard to tell apart.
    High,
    /// The decision should not be trusted automatically.
    VeryHigh,
}

impl AmbiguityLevel {
    /// Returns the identifier used in serialized results.
    pub fn as_str(&self) -> &'static str {
        match self {
            AmbiguityLevel::None => "none",
            AmbiguityLevel::Low => "low",
            AmbiguityLevel::Medium => "medium",
            AmbiguityLevel::High => "high",
            AmbiguityLevel::VeryHigh => "very-high",
        }
    }

    /// True when the result should be routed to human review.
    pub fn needs_review(&self) -> bool {
        matches!(self, AmbiguityLevel::High | AmbiguityLevel::VeryHigh)
    }

    /// One explanatory sentence for result reasons.
    pub fn description(&self) -> &'static str {
        match self {
            AmbiguityLevel::None => "Classification is clear: the top type leads by a wide margin.",
            AmbiguityLevel::Low => {
                "Classification is likely correct with a small chance of confusion."
            }
            AmbiguityLevel::Medium => {
                "Classification is moderately ambiguous: the runner-up is a plausible alternative."
            }
            AmbiguityLevel::High => {
                "Classification is highly ambiguous: several types score similarly."
            }
            AmbiguityLevel::VeryHigh => {
                "Classification is very ambiguous and should be reviewed manually."
            }
        }
    }
}

impl fmt::Display for AmbiguityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
