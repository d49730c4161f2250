//! Document title resolution.

use crate::config::OutlineConfig;
use crate::model::SourceDocument;

/// Resolve the document title.
///
/// The metadata title wins when it carries text. Otherwise the largest run
/// on the first page that is longer than `title_min_length` characters is
/// used, earliest first among equal sizes. Falls back to `config.untitled`.
pub fn resolve_title(doc: &SourceDocument, config: &OutlineConfig) -> String {
    if let Some(title) = doc.metadata.non_empty_title() {
        return title.to_string();
    }

    let Some(first_page) = doc.first_page() else {
        return config.untitled.clone();
    };

    let mut candidates: Vec<(f32, &str)> = first_page
        .runs
        .iter()
        .map(|run| (run.font_size, run.text.trim()))
        .filter(|(_, text)| text.chars().count() > config.title_min_length)
        .collect();

    // Stable: equal sizes keep document order.
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

    candidates
        .first()
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| config.untitled.clone())
}
