//! Document model types.

mod document;
mod outline;
mod span;

pub use document::{Metadata, SourceDocument, SourcePage};
pub use outline::{Level, OutlineEntry, OutlineResult};
pub use span::{Position, Span, SpanKey, TextRun};
