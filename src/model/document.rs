//! Parsed document structure handed from the parser to the outline pipeline.

use super::TextRun;
use serde::{Deserialize, Serialize};

/// A parsed PDF: metadata plus the raw text runs of every page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Document metadata (title, version)
    pub metadata: Metadata,

    /// Pages in document order
    pub pages: Vec<SourcePage>,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&SourcePage> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// The first page, if the document has any.
    pub fn first_page(&self) -> Option<&SourcePage> {
        self.pages.first()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: SourcePage) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of text runs across all pages.
    pub fn run_count(&self) -> usize {
        self.pages.iter().map(|p| p.runs.len()).sum()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Title from the document information dictionary
    pub title: Option<String>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,
}

impl Metadata {
    /// The metadata title, trimmed, if it carries any text.
    pub fn non_empty_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// One page of raw text runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Text runs in content-stream order
    pub runs: Vec<TextRun>,
}

impl SourcePage {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            runs: Vec::new(),
        }
    }

    /// Builder-style helper that appends a run.
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }
}
