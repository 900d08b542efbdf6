//! Per-document features computed once and shared by every scorer.

use doctype_model::Document;

use crate::lexicon::standard_pattern_matches;
use crate::text::{
    contains_phrase, is_technical_token, normalize_text, normalized_section_matches,
    sentence_count, tokens,
};

/// Normalized view of a document.
///
/// Building a profile is the only text processing the engine does per
/// document; scoring against each type then reuses it.
#[derive(Debug, Clone)]
pub struct DocumentProfile<'a> {
    document: &'a Document,
    text: String,
    section_titles: Vec<String>,
    word_count: usize,
    technical_count: usize,
    body_words: usize,
    body_sentences: usize,
}

impl<'a> DocumentProfile<'a> {
    /// Compute the profile of a document.
    pub fn new(document: &'a Document) -> Self {
        let full_text = document.full_text();
        let mut word_count = 0;
        let mut technical_count = 0;
        for token in tokens(&full_text) {
            word_count += 1;
            if is_technical_token(token) {
                technical_count += 1;
            }
        }
        let body = document.body_text();

        Self {
            document,
            text: normalize_text(&full_text),
            section_titles: document
                .sections
                .iter()
                .map(|s| normalize_text(&s.title))
                .collect(),
            word_count,
            technical_count,
            body_words: tokens(&body).count(),
            body_sentences: sentence_count(&body),
        }
    }

    /// The underlying document.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Normalized document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized section titles, in document order.
    pub fn section_titles(&self) -> &[String] {
        &self.section_titles
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.section_titles.len()
    }

    /// Number of word tokens in the full text.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Technical tokens per 100 words (0 for empty text).
    pub fn technical_density(&self) -> f64 {
        if self.word_count == 0 {
            0.0
        } else {
            self.technical_count as f64 * 100.0 / self.word_count as f64
        }
    }

    /// Complexity index in [0, 1] from body length and sentence length.
    ///
    /// `None` when the body has no words.
    pub fn complexity_index(&self) -> Option<f64> {
        if self.body_words == 0 {
            return None;
        }
        let sentences = self.body_sentences.max(1);
        let avg_sentence = self.body_words as f64 / sentences as f64;
        let length = (self.body_words as f64 / 3000.0).min(1.0);
        let density = (avg_sentence / 30.0).min(1.0);
        Some(0.5 * length + 0.5 * density)
    }

    /// Index of the first section matching an expected section name.
    pub fn find_section(&self, expected: &str, min_similarity: f64) -> Option<usize> {
        let expected = normalize_text(expected);
        self.section_titles
            .iter()
            .position(|title| normalized_section_matches(title, &expected, min_similarity))
    }

    /// Whether a normalized phrase occurs in the document text.
    pub fn mentions_phrase(&self, phrase: &str) -> bool {
        contains_phrase(&self.text, &normalize_text(phrase))
    }

    /// Whether the document references a standard.
    ///
    /// Checks marker standard fields, terminology entries, the text itself,
    /// and the known-standard pattern table.
    pub fn references_standard(&self, standard: &str) -> bool {
        let normalized = normalize_text(standard);
        if normalized.is_empty() {
            return false;
        }
        let in_markers = self.document.compliance_markers.iter().any(|m| {
            m.standard
                .as_deref()
                .is_some_and(|s| normalize_text(s) == normalized)
        });
        let in_terms = self
            .document
            .terminology
            .iter()
            .any(|t| normalize_text(&t.term) == normalized);
        in_markers
            || in_terms
            || contains_phrase(&self.text, &normalized)
            || standard_pattern_matches(&self.text, standard)
    }
}
