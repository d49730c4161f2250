//! False-heading rejection.

use std::fmt;
use std::sync::Arc;

use crate::config::OutlineConfig;
use crate::nlp::{tokenize, PosTagger};

/// Why a tiered span was not accepted as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Fewer characters than the configured minimum
    TooShort,
    /// The whole text is a stop word
    StopWord,
    /// No noun, proper noun, verb or adjective among the tokens
    NoContentWord,
    /// Ends with a colon, so it labels what follows
    TrailingColon,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::TooShort => "too short",
            Rejection::StopWord => "stop word",
            Rejection::NoContentWord => "no content word",
            Rejection::TrailingColon => "trailing colon",
        };
        f.write_str(reason)
    }
}

/// Decides whether a span's text reads like a heading.
///
/// Rules run in a fixed order and the first one that fires is reported.
#[derive(Clone)]
pub struct HeadingClassifier<'a> {
    config: &'a OutlineConfig,
    tagger: Arc<dyn PosTagger>,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier over a configuration and a tagger.
    pub fn new(config: &'a OutlineConfig, tagger: Arc<dyn PosTagger>) -> Self {
        Self { config, tagger }
    }

    /// Return the first rule that rejects `text`, or `None` if it is accepted.
    pub fn classify(&self, text: &str) -> Option<Rejection> {
        if text.chars().count() < self.config.min_heading_length {
            return Some(Rejection::TooShort);
        }

        if self.config.stop_words.contains(text) {
            return Some(Rejection::StopWord);
        }

        let tokens = tokenize(text);
        if !tokens.is_empty() {
            let tags = self.tagger.tag(&tokens);
            if !tags.iter().any(|tag| tag.is_content_bearing()) {
                return Some(Rejection::NoContentWord);
            }
        }

        if text.ends_with(':') {
            return Some(Rejection::TrailingColon);
        }

        None
    }

    /// Whether `text` is accepted as a heading.
    pub fn is_heading(&self, text: &str) -> bool {
        self.classify(text).is_none()
    }
}
