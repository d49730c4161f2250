//! Word tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Words keep internal apostrophes, hyphens, periods and slashes
/// ("don't", "state-of-the-art", "3.5", "e.g"); every other non-space
/// character is a token on its own.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}]+(?:['’./\-][\p{L}\p{M}\p{N}]+)*|\S")
        .expect("token pattern is valid")
});

/// Split text into word and punctuation tokens.
///
/// Whitespace-only or empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}
