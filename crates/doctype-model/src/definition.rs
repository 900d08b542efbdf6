//! Document type definitions supplied by the type registry.

use serde::{Deserialize, Serialize};

use crate::enums::{ComplexityLevel, DocumentCategory, Severity};

/// A recognized document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Stable identifier (e.g., "security-audit-report").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Broad category.
    #[serde(default = "default_category")]
    pub category: DocumentCategory,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Section names a document of this type must contain, in expected order.
    #[serde(default)]
    pub required_sections: Vec<String>,
    /// Section names a document of this type may contain.
    #[serde(default)]
    pub optional_sections: Vec<String>,
    /// Compliance rules the type is checked against.
    #[serde(default)]
    pub compliance_rules: Vec<ComplianceRule>,
    /// Standards the type is expected to reference (e.g., "ISO 27001").
    #[serde(default)]
    pub standards: Vec<String>,
    /// Typical readers (e.g., "auditors", "executives").
    #[serde(default)]
    pub target_audience: Vec<String>,
    /// Declared text complexity.
    #[serde(default)]
    pub complexity: ComplexityLevel,
    /// Domain tag words characteristic of the type.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_category() -> DocumentCategory {
    DocumentCategory::General
}

impl TypeDefinition {
    /// Create a bare type definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: DocumentCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            required_sections: Vec::new(),
            optional_sections: Vec::new(),
            compliance_rules: Vec::new(),
            standards: Vec::new(),
            target_audience: Vec::new(),
            complexity: ComplexityLevel::default(),
            tags: Vec::new(),
        }
    }

    /// Set the required sections.
    #[must_use]
    pub fn with_required_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Set the optional sections.
    #[must_use]
    pub fn with_optional_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Set the declared standards.
    #[must_use]
    pub fn with_standards<I, S>(mut self, standards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.standards = standards.into_iter().map(Into::into).collect();
        self
    }

    /// Set the target audience.
    #[must_use]
    pub fn with_audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_audience = audience.into_iter().map(Into::into).collect();
        self
    }

    /// Set the domain tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Add a compliance rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ComplianceRule) -> Self {
        self.compliance_rules.push(rule);
        self
    }

    /// Set the declared complexity.
    #[must_use]
    pub fn with_complexity(mut self, complexity: ComplexityLevel) -> Self {
        self.complexity = complexity;
        self
    }

    /// Number of declared sections (required plus optional).
    pub fn section_count(&self) -> usize {
        self.required_sections.len() + self.optional_sections.len()
    }

    /// Required then optional section names.
    pub fn all_sections(&self) -> impl Iterator<Item = &str> {
        self.required_sections
            .iter()
            .chain(self.optional_sections.iter())
            .map(String::as_str)
    }

    /// True when any compliance rule is critical.
    pub fn expects_critical_markers(&self) -> bool {
        self.compliance_rules
            .iter()
            .any(|rule| rule.severity == Severity::Critical)
    }
}

/// A compliance rule declared by a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRule {
    /// Rule identifier (e.g., "HIPAA-164.312").
    pub id: String,
    /// Short rule name.
    #[serde(default)]
    pub name: String,
    /// Rule severity.
    #[serde(default)]
    pub severity: Severity,
    /// Standard the rule belongs to.
    #[serde(default)]
    pub standard: Option<String>,
    /// Phrases whose presence indicates the document addresses the rule.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ComplianceRule {
    /// Create a rule with no standard and no keywords.
    pub fn new(id: impl Into<String>, name: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            severity,
            standard: None,
            keywords: Vec::new(),
        }
    }

    /// Attach the owning standard.
    #[must_use]
    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    /// Set the rule keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}
