//! Indentation levels for note lines.
//!
//! Notes typed on a PC nest with tabs. Notes typed on a phone nest with a
//! varying number of spaces, so spaces are bucketed instead of counted.

use super::clean::clean_lines;

/// A cleaned note line with its nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeveledLine<'a> {
    /// Line content without surrounding whitespace
    pub text: &'a str,
    pub level: usize,
}

/// Nesting depth of a raw line: tab count when tabs are present, otherwise
/// 0, 1 (two spaces or more) or 2 (six spaces or more).
pub fn indent_level(line: &str) -> usize {
    let mut tabs = 0;
    let mut spaces = 0;
    for ch in line.chars() {
        match ch {
            '\t' => tabs += 1,
            ' ' => spaces += 1,
            _ => break,
        }
    }

    if tabs > 0 {
        tabs
    } else if spaces >= 6 {
        2
    } else if spaces >= 2 {
        1
    } else {
        0
    }
}

/// Clean a note body and pair every remaining line with its level.
pub fn structure_note(body: &str) -> Vec<LeveledLine<'_>> {
    clean_lines(body)
        .map(|line| LeveledLine {
            text: line.trim(),
            level: indent_level(line),
        })
        .collect()
}
