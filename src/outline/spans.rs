//! Candidate span extraction.
//!
//! Walks every page's runs in order and keeps the ones that could plausibly
//! be headings, dropping table cells and separator noise early.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{SourceDocument, Span, TextRun};

/// Amounts, percentages and ranges: `1,234.56`, `45%`, `$10-20`, `2023/24`.
static NUMERIC_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[$€£¥]?\d[\d\s.,%$\-/]*$").expect("numeric cell pattern is valid")
});

/// Columnar alignment leaves runs of spaces inside a row.
static ALIGNED_COLUMNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("column gap pattern is valid"));

/// Row labels such as `(a) 1`, `Q1 2023`, `B 12`.
static ROW_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?[A-Za-z]{1,2}\)?\s*\d").expect("row label pattern is valid")
});

static SEPARATOR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\p{P}]+$").expect("separator pattern is valid"));

static NUMBERS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{N}\p{P}\s]+$").expect("number pattern is valid"));

/// Whether trimmed text looks like a table cell or row.
///
/// Text shorter than three characters is never table-like.
pub fn is_table_like(text: &str) -> bool {
    if text.chars().count() < 3 {
        return false;
    }
    NUMERIC_CELL.is_match(text) || ALIGNED_COLUMNS.is_match(text) || ROW_LABEL.is_match(text)
}

/// Whether trimmed text carries no words: separators only, or numerals
/// and punctuation only.
pub fn is_noise(text: &str) -> bool {
    SEPARATOR_ONLY.is_match(text) || NUMBERS_ONLY.is_match(text)
}

/// Turn one run into a span, or `None` if it is filtered out.
pub fn span_from_run(run: &TextRun, page: u32) -> Option<Span> {
    let text = run.text.trim();
    if text.is_empty() || is_table_like(text) || is_noise(text) {
        return None;
    }
    Some(Span::new(text, run.font_size, page).at(run.position))
}

/// Extract candidate spans from every page, in document order.
pub fn extract_spans(doc: &SourceDocument) -> Vec<Span> {
    let spans: Vec<Span> = doc
        .pages
        .iter()
        .flat_map(|page| {
            page.runs
                .iter()
                .filter_map(move |run| span_from_run(run, page.number))
        })
        .collect();

    log::debug!(
        "Kept {} of {} runs as candidate spans",
        spans.len(),
        doc.run_count()
    );
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourcePage;

    #[test]
    fn test_table_like_numbers() {
        assert!(is_table_like("1,234.56"));
        assert!(is_table_like("45%"));
        assert!(is_table_like("$10-20"));
        assert!(is_table_like("2023/24"));
        assert!(!is_table_like("12"));
        assert!(!is_table_like("2023 Results"));
    }

    #[test]
    fn test_table_like_layout() {
        assert!(is_table_like("Revenue   1200"));
        assert!(is_table_like("(a) 1"));
        assert!(is_table_like("Q1 2023"));
        assert!(!is_table_like("Chapter 1"));
        assert!(!is_table_like("Introduction"));
        assert!(!is_table_like("Ab"));
    }

    #[test]
    fn test_noise() {
        assert!(is_noise("..."));
        assert!(is_noise("— –"));
        assert!(is_noise("3.1."));
        assert!(is_noise("12"));
        assert!(!is_noise("1. Scope"));
        assert!(!is_noise("Overview"));
    }

    #[test]
    fn test_extract_spans_trims_and_filters() {
        let mut doc = SourceDocument::new();
        doc.add_page(
            SourcePage::new(1)
                .with_run(TextRun::new("  Introduction  ", 18.0, 72.0, 700.0))
                .with_run(TextRun::new("1,234.56", 12.0, 72.0, 680.0))
                .with_run(TextRun::new("   ", 12.0, 72.0, 660.0))
                .with_run(TextRun::new("....", 12.0, 72.0, 640.0)),
        );
        doc.add_page(SourcePage::new(2).with_run(TextRun::new("Method", 14.0, 72.0, 700.0)));

        let spans = extract_spans(&doc);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Introduction");
        assert_eq!(spans[0].page, 1);
        assert!((spans[0].position.y - 700.0).abs() < f32::EPSILON);
        assert_eq!(spans[1].text, "Method");
        assert_eq!(spans[1].page, 2);
    }

    #[test]
    fn test_extract_spans_empty_document() {
        assert!(extract_spans(&SourceDocument::new()).is_empty());
    }
}
