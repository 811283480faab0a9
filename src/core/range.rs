//! Scored line ranges.
//!
//! A [`ScoredRange`] is one candidate extract reported by the scoring
//! capability: an inclusive 1-based line span, a relevance score in
//! `[0, 1]`, and the raw `"start-end"` label it was parsed from. Text
//! is resolved lazily against the [`crate::TextIndex`].

use serde::{Deserialize, Serialize};

use crate::index::TextIndex;

/// A candidate extract with an inclusive line span and relevance score.
///
/// # Examples
///
/// ```
/// use gist_rs::ScoredRange;
///
/// let a = ScoredRange::new("1-10", 1, 10, 0.9);
/// let b = ScoredRange::new("5-15", 5, 15, 0.95);
/// let c = ScoredRange::new("20-30", 20, 30, 0.5);
/// assert!(a.overlaps(&b));
/// assert!(!a.overlaps(&c));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRange {
    /// Raw `"start-end"` label as reported by the scoring capability.
    pub label: String,

    /// First line of the extract (1-based, inclusive).
    pub start_line: usize,

    /// Last line of the extract (1-based, inclusive, `>= start_line`).
    pub end_line: usize,

    /// Relevance score in `[0, 1]`; higher is more relevant.
    pub score: f64,

    /// Resolved text, populated once the range has been looked up.
    pub text: Option<String>,
}

impl ScoredRange {
    /// Creates a scored range from already-validated parts.
    #[must_use]
    pub fn new(label: impl Into<String>, start_line: usize, end_line: usize, score: f64) -> Self {
        Self {
            label: label.into(),
            start_line,
            end_line,
            score,
            text: None,
        }
    }

    /// Parses and validates a raw `"start-end"` label.
    ///
    /// Returns `None` when the label is malformed or violates the line
    /// invariants (`end >= start >= 1`). Score bounds are checked by
    /// the extraction worker, not here.
    #[must_use]
    pub fn parse(label: &str, score: f64) -> Option<Self> {
        let (start_part, end_part) = label.split_once('-')?;
        let start_line: usize = start_part.trim().parse().ok()?;
        let end_line: usize = end_part.trim().parse().ok()?;
        if start_line == 0 || end_line < start_line {
            return None;
        }
        Some(Self::new(label, start_line, end_line, score))
    }

    /// Checks whether two inclusive line intervals intersect.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_line <= other.end_line && self.end_line >= other.start_line
    }

    /// Returns the number of lines spanned.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Resolves and caches the literal text for this range.
    ///
    /// Returns the resolved text; empty when the span addresses nothing.
    pub fn resolve(&mut self, index: &TextIndex<'_>) -> &str {
        if self.text.is_none() {
            self.text = Some(index.lines_inclusive(self.start_line, self.end_line).to_string());
        }
        self.text.as_deref().unwrap_or("")
    }

    /// Returns the resolved text if present, without resolving.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
