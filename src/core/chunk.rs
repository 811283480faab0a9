//! Chunk representation.
//!
//! A chunk is a line-addressed subrange of the source text. Chunks
//! carry only their line span; text is rendered on demand through the
//! [`TextIndex`] so the splitter stays lazy and cheap.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::index::TextIndex;

/// A line-addressed chunk of the source text.
///
/// Line spans are 1-based and inclusive. Consecutive chunks produced by
/// the splitter share a configured number of overlapping lines.
///
/// # Examples
///
/// ```
/// use gist_rs::{Chunk, TextIndex};
///
/// let index = TextIndex::new("alpha\nbeta\ngamma");
/// let chunk = Chunk::new(0, 1, 2);
/// assert_eq!(chunk.line_count(), 2);
/// assert_eq!(chunk.numbered_text(&index), "1 | alpha\n2 | beta\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sequential index within the source (0-based).
    pub index: usize,

    /// First line of the chunk (1-based, inclusive).
    pub start_line: usize,

    /// Last line of the chunk (1-based, inclusive).
    pub end_line: usize,
}

impl Chunk {
    /// Creates a new chunk span.
    #[must_use]
    pub const fn new(index: usize, start_line: usize, end_line: usize) -> Self {
        Self {
            index,
            start_line,
            end_line,
        }
    }

    /// Returns the number of lines covered by the chunk.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Checks whether the chunk covers the given 1-based line.
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Renders the chunk with `N | content` line-number prefixes.
    ///
    /// Line numbers are global to the source text, so ranges reported
    /// against the rendering address the original document directly.
    #[must_use]
    pub fn numbered_text(&self, index: &TextIndex<'_>) -> String {
        render_numbered(index, self.start_line, self.end_line)
    }

    /// Renders the chunk for scoring, with preceding context.
    ///
    /// Up to `context_lines` lines before the chunk are prepended inside
    /// a marked context block. The context is advisory for the scoring
    /// capability; candidate ranges are expected to address the chunk
    /// body.
    #[must_use]
    pub fn scoring_view(&self, index: &TextIndex<'_>, context_lines: usize) -> String {
        let body = self.numbered_text(index);
        if self.start_line <= 1 || context_lines == 0 {
            return body;
        }
        let context_start = self.start_line.saturating_sub(context_lines).max(1);
        let mut out = String::with_capacity(body.len() + 256);
        out.push_str("--- [context begin] ---\n");
        out.push_str(&render_numbered(index, context_start, self.start_line - 1));
        out.push_str("--- [context end] ---\n\n");
        out.push_str(&body);
        out
    }
}

/// Renders an inclusive line span with `N | content` prefixes.
fn render_numbered(index: &TextIndex<'_>, start_line: usize, end_line: usize) -> String {
    let mut out = String::new();
    for line_number in start_line..=end_line.min(index.line_count()) {
        let _ = writeln!(out, "{} | {}", line_number, index.line(line_number));
    }
    out
}
