//! Byte offset to line/column conversion.
//!
//! The AST stores byte offsets; diagnostics are shown with 1-based
//! line and column numbers.

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column, counted in characters
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Line map for efficient offset -> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];

        for i in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                // \r\n - the \n will create the line start
                continue;
            }
            line_starts.push((i + 1) as u32);
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a Position (line, character).
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");

        Position {
            line: line as u32,
            character: slice.chars().count() as u32,
        }
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the text of a line without its terminator.
    pub fn line_text<'a>(&self, line: usize, source: &'a str) -> Option<&'a str> {
        let start = *self.line_starts.get(line)? as usize;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(source.len(), |&next| next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }
}
