//! Text normalization and token helpers shared by the scorers.

use rapidfuzz::distance::jaro_winkler;

/// Characters treated as word separators by [`normalize_text`].
const SEPARATORS: [char; 5] = ['_', '-', '.', '/', '\\'];

/// Characters that make a token a symbol token.
const SYMBOLS: [char; 9] = ['§', '%', '±', '≥', '≤', '=', '<', '>', 'µ'];

/// Punctuation stripped from both ends of a raw token.
const EDGE_PUNCTUATION: [char; 12] = [',', ';', ':', '!', '?', '(', ')', '[', ']', '"', '\'', '.'];

/// Normalize text for comparison.
///
/// Trims, lowercases, turns `_ - . / \` into spaces, and collapses runs of
/// whitespace.
pub fn normalize_text(value: &str) -> String {
    let lowered: String = value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when `needle` occurs in `haystack` on word boundaries.
///
/// Both arguments are expected to be normalized.
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Phrase match that also accepts a simple plural (`finding` → `findings`).
pub fn mentions(haystack: &str, needle: &str) -> bool {
    contains_phrase(haystack, needle) || contains_phrase(haystack, &format!("{needle}s"))
}

/// Whether a document section title matches an expected section name.
///
/// Matches when the normalized names are equal, one contains the other as a
/// whole-word phrase, or their Jaro-Winkler similarity reaches
/// `min_similarity`.
pub fn section_matches(actual: &str, expected: &str, min_similarity: f64) -> bool {
    let actual = normalize_text(actual);
    let expected = normalize_text(expected);
    normalized_section_matches(&actual, &expected, min_similarity)
}

/// [`section_matches`] for names that are already normalized.
pub fn normalized_section_matches(actual: &str, expected: &str, min_similarity: f64) -> bool {
    if actual.is_empty() || expected.is_empty() {
        return false;
    }
    if actual == expected
        || contains_phrase(actual, expected)
        || contains_phrase(expected, actual)
    {
        return true;
    }
    jaro_winkler::similarity(actual.chars(), expected.chars()) >= min_similarity
}

/// Split raw text into tokens, stripping edge punctuation.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c| EDGE_PUNCTUATION.contains(&c)))
        .filter(|token| !token.is_empty())
}

/// Whether a raw token counts as technical.
///
/// Technical tokens are acronyms (2-6 uppercase letters or digits with at
/// least two letters), long words (12+ chars), numeric patterns (a digit plus
/// `.`, `-` or `:`), and tokens containing a symbol such as `§` or `≥`.
pub fn is_technical_token(token: &str) -> bool {
    if token.chars().any(|c| SYMBOLS.contains(&c)) {
        return true;
    }
    let len = token.chars().count();
    if len >= 12 {
        return true;
    }
    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    if has_digit && token.contains(['.', '-', ':']) {
        return true;
    }
    (2..=6).contains(&len)
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        && token.chars().filter(char::is_ascii_uppercase).count() >= 2
}

/// Number of sentences in raw text.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or end of text.
/// Text with words but no terminator counts as one sentence.
pub fn sentence_count(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    for (i, c) in chars.iter().enumerate() {
        if matches!(c, '.' | '!' | '?') {
            let next = chars.get(i + 1);
            let ends = next.is_none_or(|n| n.is_whitespace());
            let prev_is_word = i > 0 && chars[i - 1].is_alphanumeric();
            if ends && prev_is_word {
                count += 1;
            }
        }
    }
    if count == 0 && tokens(text).next().is_some() {
        1
    } else {
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_replaces_separators() {
        assert_eq!(normalize_text("  Risk_Assessment/Plan "), "risk assessment plan");
        assert_eq!(normalize_text("NIST SP 800-53"), "nist sp 800 53");
        assert_eq!(normalize_text("a\\b.c"), "a b c");
    }

    #[test]
    fn phrase_respects_word_boundaries() {
        assert!(contains_phrase("the soc 2 report", "soc 2"));
        assert!(!contains_phrase("microscope slides", "scope"));
        assert!(!contains_phrase("anything", ""));
        assert!(mentions("three findings were raised", "finding"));
    }

    #[test]
    fn section_matching_variants() {
        assert!(section_matches("Executive Summary", "executive_summary", 0.88));
        assert!(section_matches("Summary", "Executive Summary", 0.88));
        assert!(section_matches("Recomendations", "Recommendations", 0.88));
        assert!(!section_matches("Budget", "Methodology", 0.88));
        assert!(!section_matches("", "Scope", 0.88));
    }

    #[test]
    fn section_containment_respects_word_boundaries() {
        assert!(!section_matches("Plan", "Explanation", 0.88));
        assert!(!section_matches("Art", "Smart Contracts", 0.88));
        assert!(section_matches("Cost", "Cost Estimates", 0.88));
        assert!(section_matches("Test Plan", "Plan", 0.88));
    }

    #[test]
    fn technical_token_kinds() {
        assert!(is_technical_token("NIST"));
        assert!(is_technical_token("AES256"));
        assert!(!is_technical_token("A1"));
        assert!(is_technical_token("interoperability"));
        assert!(is_technical_token("3.14"));
        assert!(is_technical_token("12:30"));
        assert!(is_technical_token("≥"));
        assert!(is_technical_token("95%"));
        assert!(!is_technical_token("report"));
        assert!(!is_technical_token("Report"));
    }

    #[test]
    fn tokens_strip_punctuation() {
        let collected: Vec<&str> = tokens("Hello, (world). \"ISO\"").collect();
        assert_eq!(collected, ["Hello", "world", "ISO"]);
    }

    #[test]
    fn sentences_counted() {
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("Version 1.2 is out"), 1);
        assert_eq!(sentence_count(""), 0);
        assert_eq!(sentence_count("..."), 0);
    }
}
