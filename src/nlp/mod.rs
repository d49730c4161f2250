//! Lightweight natural-language helpers used by the heading filters.

mod stopwords;
mod tagger;
mod tokenize;

pub use stopwords::StopWords;
pub use tagger::{LexiconTagger, PosTag, PosTagger};
pub use tokenize::tokenize;
