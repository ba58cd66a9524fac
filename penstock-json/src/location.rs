//! Byte-offset to line/column conversion.
//!
//! The parsers and the validator work in byte offsets; editors want line and
//! column positions. `SourceLocation` builds a line-start table once per
//! document and converts offsets with a binary search.

use std::fmt;

/// A line:column position in source text, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Fast conversion from byte offsets to line/column positions.
pub struct SourceLocation {
    /// Byte offsets where each line starts.
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);
        let column = byte_offset - self.line_starts[line];
        Position::new(line, column)
    }

    /// Total number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_positions() {
        let loc = SourceLocation::new("{\"a\": 1}");
        assert_eq!(loc.byte_to_position(0), Position::new(0, 0));
        assert_eq!(loc.byte_to_position(6), Position::new(0, 6));
        assert_eq!(loc.line_count(), 1);
    }

    #[test]
    fn positions_across_lines() {
        let source = "{\n  \"a\": 1\n}";
        let loc = SourceLocation::new(source);
        assert_eq!(loc.byte_to_position(0), Position::new(0, 0));
        assert_eq!(loc.byte_to_position(2), Position::new(1, 0));
        assert_eq!(loc.byte_to_position(4), Position::new(1, 2));
        assert_eq!(loc.byte_to_position(11), Position::new(2, 0));
        assert_eq!(loc.line_count(), 3);
    }

    #[test]
    fn offset_at_end_of_text_maps_to_final_line() {
        let source = "{}\n";
        let loc = SourceLocation::new(source);
        assert_eq!(loc.byte_to_position(source.len()), Position::new(1, 0));
    }
}
