//! Outline configuration.

use crate::error::{Error, Result};
use crate::nlp::StopWords;

/// Tunable parameters of outline inference.
///
/// Built once and passed by reference into every pipeline stage.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Minimum heading length in characters
    pub min_heading_length: usize,

    /// Maximum number of heading tiers (H1..Hn)
    pub max_tiers: usize,

    /// First-page runs must be strictly longer than this to become the title
    pub title_min_length: usize,

    /// Title used when neither metadata nor the first page yield one
    pub untitled: String,

    /// Words that are never headings on their own
    pub stop_words: StopWords,
}

impl OutlineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum heading length.
    pub fn with_min_heading_length(mut self, len: usize) -> Self {
        self.min_heading_length = len;
        self
    }

    /// Set the maximum number of tiers.
    pub fn with_max_tiers(mut self, tiers: usize) -> Self {
        self.max_tiers = tiers;
        self
    }

    /// Set the title length threshold.
    pub fn with_title_min_length(mut self, len: usize) -> Self {
        self.title_min_length = len;
        self
    }

    /// Set the fallback title.
    pub fn with_untitled(mut self, title: impl Into<String>) -> Self {
        self.untitled = title.into();
        self
    }

    /// Replace the stop-word set.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Check that the configuration can drive the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.max_tiers == 0 {
            return Err(Error::InvalidConfig(
                "max_tiers must be at least 1".to_string(),
            ));
        }
        if self.min_heading_length == 0 {
            return Err(Error::InvalidConfig(
                "min_heading_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            min_heading_length: 4,
            max_tiers: 3,
            title_min_length: 5,
            untitled: "Untitled".to_string(),
            stop_words: StopWords::english(),
        }
    }
}
