//! PDF parsing module.

pub mod backend;
mod content;
mod options;
mod pdf_parser;

pub use backend::{LopdfBackend, PdfBackend};
pub use content::{extract_page_runs, merge_adjacent_runs};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
