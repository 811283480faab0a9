//! Line-addressed text index.
//!
//! Resolves 1-based line ranges back to literal text. The index is a
//! pure lookup structure: invalid or out-of-range requests resolve to
//! the empty string rather than failing.

/// A line-addressed view over a source text.
///
/// Line numbers are 1-based. Ranges use an exclusive end line, so
/// `resolve(2, 4)` returns lines 2 and 3. Use [`TextIndex::lines_inclusive`]
/// for the inclusive spans carried by scored ranges.
///
/// # Examples
///
/// ```
/// use gist_rs::TextIndex;
///
/// let index = TextIndex::new("alpha\nbeta\ngamma");
/// assert_eq!(index.line_count(), 3);
/// assert_eq!(index.resolve(2, 4), "beta\ngamma");
/// assert_eq!(index.resolve(0, 2), "");
/// ```
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    /// Byte offset of the start of each line, in order.
    line_starts: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    /// Builds an index over the given text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = Vec::with_capacity(128);
        line_starts.push(0);
        for (pos, _) in text.match_indices('\n') {
            line_starts.push(pos + 1);
        }
        Self { text, line_starts }
    }

    /// Returns the underlying text.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Returns the logical line count.
    ///
    /// A trailing newline does not start an additional logical line
    /// unless content follows it; the count matches `split('\n')`.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolves `[start_line, end_line)` to literal text.
    ///
    /// Returns the empty string for any invalid request: `start_line`
    /// of zero, `end_line <= start_line`, or `start_line` past the end
    /// of the text. An `end_line` past the end is clamped.
    #[must_use]
    pub fn resolve(&self, start_line: usize, end_line: usize) -> &'a str {
        let count = self.line_count();
        if start_line == 0 || start_line > count || end_line <= start_line {
            return "";
        }
        let start = self.line_starts[start_line - 1];
        let end = if end_line > count {
            self.text.len()
        } else {
            // Exclude the trailing newline of the last requested line.
            self.line_starts[end_line - 1]
        };
        let slice = &self.text[start..end];
        slice.strip_suffix('\n').unwrap_or(slice)
    }

    /// Resolves an inclusive line span to literal text.
    ///
    /// Equivalent to `resolve(start_line, end_line + 1)`; tolerant of
    /// invalid spans in the same way.
    #[must_use]
    pub fn lines_inclusive(&self, start_line: usize, end_line: usize) -> &'a str {
        if end_line == usize::MAX {
            return self.resolve(start_line, usize::MAX);
        }
        self.resolve(start_line, end_line + 1)
    }

    /// Returns a single line without its trailing newline.
    #[must_use]
    pub fn line(&self, line_number: usize) -> &'a str {
        self.lines_inclusive(line_number, line_number)
    }

    /// Returns the byte length of a single line including its newline.
    ///
    /// Used by the chunk splitter to enforce byte caps. Returns zero
    /// for out-of-range lines.
    #[must_use]
    pub fn line_byte_len(&self, line_number: usize) -> usize {
        let count = self.line_count();
        if line_number == 0 || line_number > count {
            return 0;
        }
        let start = self.line_starts[line_number - 1];
        let end = if line_number == count {
            self.text.len()
        } else {
            self.line_starts[line_number]
        };
        end - start
    }
}
