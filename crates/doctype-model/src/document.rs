//! Parsed document model.
//!
//! A [`Document`] is the structured output of the upstream parsing stage.
//! The classifier only reads it. Every collection field defaults to empty so
//! that partially populated parser output deserializes instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::Severity;

/// Free-form metadata as emitted by the parser. Values keep their JSON type.
pub type Metadata = BTreeMap<String, Value>;

/// Deserialize a field that may be `null` as its default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A parsed document ready for classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by the upstream parser.
    pub id: String,
    /// Optional document title.
    #[serde(default)]
    pub title: Option<String>,
    /// Detected sections in document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<Section>,
    /// Extracted terminology entries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub terminology: Vec<TerminologyEntry>,
    /// Compliance markers found in the text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub compliance_markers: Vec<ComplianceMarker>,
    /// Free-form metadata (author, audience, category hints, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

impl Document {
    /// Create an empty document with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a section.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a terminology entry.
    #[must_use]
    pub fn with_term(mut self, entry: TerminologyEntry) -> Self {
        self.terminology.push(entry);
        self
    }

    /// Append a compliance marker.
    #[must_use]
    pub fn with_marker(mut self, marker: ComplianceMarker) -> Self {
        self.compliance_markers.push(marker);
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Case-insensitive lookup of a string metadata value. Non-string values
    /// are ignored.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_str())
    }

    /// Deepest nesting level among sections (0 for a document without sections).
    pub fn max_depth(&self) -> u8 {
        self.sections.iter().map(|s| s.level).max().unwrap_or(0)
    }

    /// True if any section is nested below the top level.
    pub fn is_hierarchical(&self) -> bool {
        self.max_depth() > 1
    }

    /// All text the classifier may search: title, section titles and
    /// contents, terminology terms, and marker texts, separated by newlines.
    pub fn full_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(title) = &self.title {
            parts.push(title);
        }
        for section in &self.sections {
            parts.push(&section.title);
            parts.push(&section.content);
        }
        for entry in &self.terminology {
            parts.push(&entry.term);
        }
        for marker in &self.compliance_markers {
            parts.push(&marker.text);
        }
        parts.join("\n")
    }

    /// Body text only (section contents), used for complexity estimates.
    pub fn body_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A detected section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading.
    pub title: String,
    /// Section body text.
    #[serde(default)]
    pub content: String,
    /// Nesting level, 1 for top-level sections.
    #[serde(default = "default_level")]
    pub level: u8,
    /// Per-section metadata from the parser.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

fn default_level() -> u8 {
    1
}

impl Section {
    /// Create a top-level section.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            level: 1,
            metadata: Metadata::new(),
        }
    }

    /// Set the nesting level.
    #[must_use]
    pub fn at_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }
}

/// A term extracted by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminologyEntry {
    /// The term as it appears in the text.
    pub term: String,
    /// Number of occurrences.
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    /// Parser-assigned category (e.g., "standard", "acronym").
    #[serde(default)]
    pub category: Option<String>,
    /// Extraction confidence (0.0 to 1.0).
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_frequency() -> u32 {
    1
}

fn default_confidence() -> f64 {
    1.0
}

impl TerminologyEntry {
    /// Create an entry seen once with full confidence.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            frequency: 1,
            category: None,
            confidence: 1.0,
        }
    }
}

/// A compliance reference found in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceMarker {
    /// Marker type or rule identifier reported by the parser.
    #[serde(rename = "type")]
    pub marker_type: String,
    /// Text that triggered the marker.
    #[serde(default)]
    pub text: String,
    /// Referenced standard, if the parser resolved one.
    #[serde(default)]
    pub standard: Option<String>,
    /// Detection confidence (0.0 to 1.0).
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Severity the parser attached to the marker.
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl ComplianceMarker {
    /// Create a marker with full confidence and no severity.
    pub fn new(marker_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            marker_type: marker_type.into(),
            text: text.into(),
            standard: None,
            confidence: 1.0,
            severity: None,
        }
    }

    /// Attach the referenced standard.
    #[must_use]
    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    /// Attach a severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// True when the marker is flagged critical.
    pub fn is_critical(&self) -> bool {
        self.severity == Some(Severity::Critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_arrays_deserialize_as_empty() {
        let doc: Document = serde_json::from_str(r#"{"id": "doc-1"}"#).unwrap();
        assert_eq!(doc.id, "doc-1");
        assert!(doc.sections.is_empty());
        assert!(doc.terminology.is_empty());
        assert!(doc.compliance_markers.is_empty());
        assert_eq!(doc.max_depth(), 0);

        let doc: Document = serde_json::from_str(
            r#"{"id": "doc-2", "sections": null, "terminology": null,
                "compliance_markers": null, "metadata": null}"#,
        )
        .unwrap();
        assert!(doc.sections.is_empty());
        assert!(doc.terminology.is_empty());
        assert!(doc.compliance_markers.is_empty());
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn metadata_accepts_non_string_values() {
        let doc: Document = serde_json::from_str(
            r#"{
                "id": "doc-3",
                "metadata": {"pageCount": 12, "Category": "legal", "draft": true},
                "sections": [{"title": "Scope", "metadata": {"wordCount": 40}}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.metadata_value("category"), Some("legal"));
        assert_eq!(doc.metadata_value("pagecount"), None);
        assert_eq!(doc.metadata["pageCount"], 12);
        assert_eq!(doc.sections[0].metadata["wordCount"], 40);
    }

    #[test]
    fn hierarchy_requires_nested_section() {
        let flat = Document::new("a").with_section(Section::new("Intro", ""));
        assert!(!flat.is_hierarchical());
        let nested = flat.with_section(Section::new("Detail", "").at_level(2));
        assert!(nested.is_hierarchical());
    }

    #[test]
    fn marker_type_field_is_renamed() {
        let marker: ComplianceMarker =
            serde_json::from_str(r#"{"type": "HIPAA-164", "severity": "critical"}"#).unwrap();
        assert_eq!(marker.marker_type, "HIPAA-164");
        assert!(marker.is_critical());
        assert!((marker.confidence - 1.0).abs() < f64::EPSILON);
    }
}
