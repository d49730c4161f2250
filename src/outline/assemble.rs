//! Outline assembly.

use std::collections::HashSet;

use crate::model::{OutlineEntry, Span};

use super::classify::HeadingClassifier;
use super::cluster::ClusterMap;

/// Build the outline from spans in document order.
///
/// The first occurrence of each `(text, page)` decides; later repeats are
/// skipped whether or not the first one made it into the outline.
pub fn assemble_outline(
    spans: &[Span],
    clusters: &ClusterMap,
    classifier: &HeadingClassifier<'_>,
) -> Vec<OutlineEntry> {
    let mut seen = HashSet::new();
    let mut outline = Vec::new();
    let mut rejected = 0usize;

    for span in spans {
        let key = span.key();
        if !seen.insert(key.clone()) {
            continue;
        }

        let Some(level) = clusters.level_of(&key) else {
            continue;
        };

        if let Some(reason) = classifier.classify(&span.text) {
            log::trace!("Rejected {:?} on page {}: {}", span.text, span.page, reason);
            rejected += 1;
            continue;
        }

        outline.push(OutlineEntry::new(key.text, level, key.page));
    }

    log::debug!(
        "Assembled {} headings ({} tiered spans rejected)",
        outline.len(),
        rejected
    );
    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutlineConfig;
    use crate::model::Level;
    use crate::nlp::LexiconTagger;
    use std::sync::Arc;

    fn run(spans: &[Span]) -> Vec<OutlineEntry> {
        let config = OutlineConfig::default();
        let classifier = HeadingClassifier::new(&config, Arc::new(LexiconTagger::new()));
        let clusters = ClusterMap::build(spans, config.max_tiers);
        assemble_outline(spans, &clusters, &classifier)
    }

    #[test]
    fn test_keeps_document_order_and_levels() {
        let spans = vec![
            Span::new("Overview", 20.0, 1),
            Span::new("plain body text", 10.0, 1),
            Span::new("Details", 14.0, 1),
            Span::new("Conclusion", 20.0, 2),
        ];
        let outline = run(&spans);

        let got: Vec<(&str, u8, u32)> = outline
            .iter()
            .map(|e| (e.text.as_str(), e.level.rank(), e.page))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Overview", 1, 1),
                ("plain body text", 3, 1),
                ("Details", 2, 1),
                ("Conclusion", 1, 2)
            ]
        );
    }

    #[test]
    fn test_duplicates_on_same_page_collapse() {
        let spans = vec![
            Span::new("Results", 20.0, 1),
            Span::new("Results", 20.0, 1),
            Span::new("Results", 20.0, 2),
            Span::new("body", 10.0, 1),
        ];
        let outline = run(&spans);
        let results: Vec<&OutlineEntry> =
            outline.iter().filter(|e| e.text == "Results").collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].page, 1);
        assert_eq!(results[1].page, 2);
        assert!(results.iter().all(|e| e.level == Level::new(1).unwrap()));
        assert_eq!(outline.len(), 3);
    }

    #[test]
    fn test_rejected_spans_are_dropped() {
        let spans = vec![
            Span::new("Summary:", 20.0, 1),
            Span::new("of", 20.0, 1),
            Span::new("Findings", 20.0, 1),
            Span::new("body text here", 10.0, 1),
        ];
        let outline = run(&spans);
        let texts: Vec<&str> = outline.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Findings", "body text here"]);
    }
}
