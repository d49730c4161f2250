//! Outline output types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A heading level. `Level(1)` is the most prominent tier and renders as `H1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    /// Create a level from its 1-based rank. Returns `None` for zero.
    pub fn new(rank: u8) -> Option<Self> {
        (rank > 0).then_some(Self(rank))
    }

    /// Level for the tier at `index` in a descending list of tiers.
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u8::try_from(index + 1).unwrap_or(u8::MAX))
    }

    /// The 1-based rank (1 for H1).
    pub fn rank(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('H')
            .or_else(|| s.strip_prefix('h'))
            .and_then(|rank| rank.parse::<u8>().ok())
            .and_then(Level::new)
            .ok_or_else(|| format!("invalid heading level: {s:?}"))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level (H1 = largest tier)
    pub level: Level,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new entry.
    pub fn new(text: impl Into<String>, level: Level, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The result of outline inference for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Resolved document title
    pub title: String,
    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl OutlineResult {
    /// Create a new result.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Number of headings in the outline.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Entries at a given level.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter().filter(move |e| e.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display_and_parse() {
        let h2 = Level::new(2).unwrap();
        assert_eq!(h2.to_string(), "H2");
        assert_eq!("H2".parse::<Level>().unwrap(), h2);
        assert!("H0".parse::<Level>().is_err());
        assert!("X1".parse::<Level>().is_err());
        assert!(Level::new(0).is_none());
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::from_index(0) < Level::from_index(1));
        assert_eq!(Level::from_index(2).rank(), 3);
    }

    #[test]
    fn test_entry_serializes_level_as_string() {
        let entry = OutlineEntry::new("Introduction", Level::from_index(0), 1);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"H1","text":"Introduction","page":1}"#);

        let back: OutlineEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
