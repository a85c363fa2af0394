//! Line/column lookup for byte offsets.

use serde::Serialize;

/// A 1-based line and column pair, as printed in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// Precomputed line start offsets for a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build the line table. Only `\n` terminates lines; a preceding `\r` is
    /// counted as part of the line it ends.
    pub fn build(text: &str) -> LineMap {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr::memchr_iter(b'\n', text.as_bytes()).map(|i| (i + 1) as u32));
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a 1-based line/column location.
    ///
    /// Columns count bytes; offsets past the end clamp to the last line.
    pub fn location(&self, offset: u32) -> Location {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_index).copied().unwrap_or(0);
        Location {
            line: line_index as u32 + 1,
            column: offset.saturating_sub(line_start) + 1,
        }
    }
}
