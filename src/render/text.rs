//! Plain text rendering for outline results.

use std::fmt::Write;

use crate::model::OutlineResult;

/// Render an outline as an indented listing.
///
/// The title comes first, then one line per heading, indented two spaces
/// per level below H1.
pub fn to_text(result: &OutlineResult) -> String {
    let mut output = String::new();
    output.push_str(&result.title);
    output.push('\n');

    for entry in &result.outline {
        let indent = usize::from(entry.level.rank().saturating_sub(1)) * 2;
        let _ = writeln!(
            output,
            "{:indent$}{} {} (p. {})",
            "",
            entry.level,
            entry.text,
            entry.page,
            indent = indent
        );
    }

    output
}
