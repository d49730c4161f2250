//! # pdfoutline
//!
//! Infer a document outline (title plus H1..H3 headings) from a PDF's
//! visual layout, without relying on embedded bookmarks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_outline("report.pdf")?;
//!
//!     println!("{}", result.title);
//!     for entry in &result.outline {
//!         println!("{} {} (p. {})", entry.level, entry.text, entry.page);
//!     }
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## How headings are found
//!
//! - **Spans**: every text run is a candidate unless it looks like a table
//!   cell or carries no words
//! - **Tiers**: font sizes are clustered (exact 1-D k-means) into at most
//!   three tiers, largest first
//! - **Filters**: tiered spans that are too short, stop words, colon labels
//!   or lack a content word are dropped
//! - **Batch**: whole directories can be processed in parallel with Rayon

pub mod batch;
pub mod config;
pub mod detect;
pub mod error;
pub mod model;
pub mod nlp;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchFailure, BatchItem, BatchReport, BatchRunner};
pub use config::OutlineConfig;
pub use detect::{has_pdf_extension, pdf_version};
pub use error::{Error, Result};
pub use model::{
    Level, Metadata, OutlineEntry, OutlineResult, SourceDocument, SourcePage, Span, TextRun,
};
pub use nlp::{LexiconTagger, PosTag, PosTagger, StopWords};
pub use outline::{OutlineAnalysis, OutlineExtractor, Rejection};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Infer the outline of a PDF file with the default configuration.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline;
///
/// let result = extract_outline("document.pdf").unwrap();
/// println!("{} headings", result.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    OutlineExtractor::new().extract_file(path)
}

/// Infer the outline of a PDF held in memory.
pub fn extract_outline_from_bytes(data: &[u8]) -> Result<OutlineResult> {
    OutlineExtractor::new().extract_bytes(data)
}

/// Infer the outline of a PDF read from a reader.
pub fn extract_outline_from_reader<R: Read>(reader: R) -> Result<OutlineResult> {
    OutlineExtractor::new().extract_reader(reader)
}

/// Parse a PDF file into pages of text runs.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<SourceDocument> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<SourceDocument> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
