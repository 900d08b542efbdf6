//! Terminal rendering of results and catalogs.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use doctype_model::{ClassificationResult, Signal, TypeDefinition};

/// Column headers for the five signals, in breakdown order.
const SIGNAL_HEADERS: [&str; 5] = ["Struct", "Terms", "Compl", "Meta", "Order"];

/// Print a classification result: header lines, candidate table, reasons.
pub fn print_result(result: &ClassificationResult, top: usize) {
    for line in header_lines(result) {
        println!("{line}");
    }
    println!("{}", candidate_table(result, top));
    if !result.reasons.is_empty() {
        println!("Reasons:");
        for reason in &result.reasons {
            println!("  - {reason}");
        }
    }
}

/// Summary lines printed above the candidate table.
pub fn header_lines(result: &ClassificationResult) -> Vec<String> {
    let mut lines = vec![
        format!("Document: {}", result.document_id),
        format!("Result: {}", result.id),
        format!(
            "Type: {}",
            result
                .top_candidate()
                .map(|c| format!("{} ({})", c.type_name, c.type_id))
                .unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "Confidence: {} ({})",
            score(result.confidence_score),
            result.ambiguity_level.as_str()
        ),
    ];
    if result.refined {
        lines.push("Ranking: refined by breakdown consistency".to_string());
    }
    if result.needs_review() {
        lines.push("Review: required".to_string());
    }
    lines
}

/// Candidate table with one column per signal.
pub fn candidate_table(result: &ClassificationResult, top: usize) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#"), header_cell("Type"), header_cell("Score")];
    header.extend(SIGNAL_HEADERS.iter().copied().map(header_cell));
    if result.refined {
        header.push(header_cell("Ranking"));
    }
    table.set_header(header);
    apply_table_style(&mut table);

    for candidate in result.ranked_candidates.iter().take(top) {
        let mut row = vec![
            Cell::new(candidate.rank),
            Cell::new(&candidate.type_id),
            score_cell(candidate.composite_score),
        ];
        row.extend(
            Signal::ALL
                .iter()
                .map(|s| Cell::new(score(candidate.breakdown.get(*s)))),
        );
        if let Some(ranking) = candidate.ranking_score {
            row.push(Cell::new(score(ranking)));
        }
        table.add_row(row);
    }
    for index in 2..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

/// Catalog listing.
pub fn types_table(types: &[TypeDefinition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Category"),
        header_cell("Sections"),
        header_cell("Rules"),
    ]);
    apply_table_style(&mut table);
    for ty in types {
        table.add_row(vec![
            Cell::new(&ty.id).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(&ty.name),
            Cell::new(ty.category.as_str()),
            Cell::new(ty.section_count()),
            Cell::new(ty.compliance_rules.len()),
        ]);
    }
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    table
}

/// Two-decimal score text.
pub fn score(value: f64) -> String {
    format!("{value:.2}")
}

fn score_cell(value: f64) -> Cell {
    let cell = Cell::new(score(value));
    if value >= 0.7 {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else if value < 0.4 {
        cell.fg(Color::DarkGrey)
    } else {
        cell
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use doctype_model::{
        AmbiguityLevel, ClassificationCandidate, ClassificationTimestamps, ScoreBreakdown,
    };

    fn result() -> ClassificationResult {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let mut first = ClassificationCandidate::new(
            "security-audit-report",
            "Security Audit Report",
            0.873,
            ScoreBreakdown::new(0.95, 0.8, 0.9, 0.7, 0.85),
            Vec::new(),
        );
        first.rank = 1;
        let mut second = ClassificationCandidate::new(
            "incident-report",
            "Incident Report",
            0.41,
            ScoreBreakdown::new(0.4, 0.5, 0.3, 0.4, 0.5),
            Vec::new(),
        );
        second.rank = 2;
        ClassificationResult {
            id: "r-1".into(),
            document_id: "audit-q3".into(),
            ranked_candidates: vec![first, second],
            confidence_score: 0.81,
            ambiguity_level: AmbiguityLevel::None,
            reasons: vec!["Strong structure match (0.95)".into()],
            timestamps: ClassificationTimestamps {
                started: at,
                completed: at,
            },
            refined: false,
        }
    }

    #[test]
    fn header_summarizes_the_decision() {
        insta::assert_snapshot!(header_lines(&result()).join("\n"), @r"
        Document: audit-q3
        Result: r-1
        Type: Security Audit Report (security-audit-report)
        Confidence: 0.81 (none)
        ");
    }

    #[test]
    fn header_flags_review() {
        let mut result = result();
        result.ambiguity_level = AmbiguityLevel::VeryHigh;
        result.refined = true;
        let lines = header_lines(&result);
        assert_eq!(lines[3], "Confidence: 0.81 (very-high)");
        assert_eq!(lines[4], "Ranking: refined by breakdown consistency");
        assert_eq!(lines[5], "Review: required");
    }

    #[test]
    fn table_respects_top() {
        let table = candidate_table(&result(), 1);
        assert_eq!(table.column_count(), 8);
        assert_eq!(table.row_iter().count(), 1);
        let rendered = table.to_string();
        assert!(rendered.contains("security-audit-report"));
        assert!(!rendered.contains("incident-report"));
    }

    #[test]
    fn scores_have_two_decimals() {
        assert_eq!(score(0.873), "0.87");
        assert_eq!(score(1.0), "1.00");
    }
}
