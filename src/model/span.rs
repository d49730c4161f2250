//! Text runs and spans.

use serde::{Deserialize, Serialize};

/// Origin of a run on its page, in PDF user space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A raw text-showing run as produced by the parser, before filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content (untrimmed)
    pub text: String,
    /// Rendered font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Origin of the run
    pub position: Position,
    /// Estimated advance width of the run
    pub width: f32,
}

impl TextRun {
    /// Create a new run with no font name and no width estimate.
    pub fn new(text: impl Into<String>, font_size: f32, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: String::new(),
            position: Position::new(x, y),
            width: 0.0,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the advance width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Right edge of the run.
    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }
}

/// A candidate heading span: one trimmed, filtered run with its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Trimmed text, never empty
    pub text: String,
    /// Rendered font size in points
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page: u32,
    /// Origin of the run on the page
    pub position: Position,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            page,
            position: Position::default(),
        }
    }

    /// Set the position.
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// The `(text, page)` identity used for deduplication.
    pub fn key(&self) -> SpanKey {
        SpanKey {
            text: self.text.clone(),
            page: self.page,
        }
    }
}

/// Identity of a span within a document: its exact text on its page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanKey {
    /// Exact span text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}
