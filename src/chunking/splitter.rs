//! Line-based chunk splitter.

use crate::chunking::{DEFAULT_MAX_CHUNK_BYTES, DEFAULT_OVERLAP_LINES};
use crate::core::Chunk;
use crate::error::{Result, SetupError};
use crate::index::TextIndex;

/// Minimum number of lines targeted per chunk.
///
/// Keeps chunks from degenerating into slivers on texts with very long
/// lines; the byte cap still wins when the lines are truly oversized.
const MIN_TARGET_LINES: usize = 50;

/// Per-line byte allowance added on top of the measured average.
///
/// The number-prefix rendering adds `N | ` to every line, so the raw
/// average undercounts what scoring actually sees.
const LINE_OVERHEAD_BYTES: usize = 10;

/// Splits source text into overlapping, byte-bounded line chunks.
///
/// The target lines per chunk is derived from the measured average line
/// length, so short-lined prose and long-lined logs both land near the
/// byte cap. Consecutive chunks share [`LineChunker::overlap_lines`]
/// lines so extracts near a boundary are visible to both sides.
///
/// # Examples
///
/// ```
/// use gist_rs::{LineChunker, TextIndex};
///
/// let text = "line one\nline two\nline three";
/// let index = TextIndex::new(text);
/// let chunks: Vec<_> = LineChunker::new().split(&index).unwrap().collect();
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].start_line, 1);
/// assert_eq!(chunks[0].end_line, 3);
/// ```
#[derive(Debug, Clone)]
pub struct LineChunker {
    max_chunk_bytes: usize,
    overlap_lines: usize,
}

impl Default for LineChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl LineChunker {
    /// Creates a splitter with the default byte cap and overlap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
            overlap_lines: DEFAULT_OVERLAP_LINES,
        }
    }

    /// Sets the maximum chunk size in bytes.
    #[must_use]
    pub const fn with_max_chunk_bytes(mut self, max_chunk_bytes: usize) -> Self {
        self.max_chunk_bytes = max_chunk_bytes;
        self
    }

    /// Sets the number of lines shared between consecutive chunks.
    #[must_use]
    pub const fn with_overlap_lines(mut self, overlap_lines: usize) -> Self {
        self.overlap_lines = overlap_lines;
        self
    }

    /// Splits the indexed text into a lazy sequence of chunk spans.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::EmptyText`] for an empty source and
    /// [`SetupError::OverlapTooLarge`] when the configured overlap
    /// would prevent the splitter from making progress.
    pub fn split<'i, 'a>(&self, index: &'i TextIndex<'a>) -> Result<Spans<'i, 'a>> {
        if index.text().is_empty() {
            return Err(SetupError::EmptyText.into());
        }
        if self.max_chunk_bytes == 0 {
            return Err(SetupError::InvalidConfig {
                reason: "max_chunk_bytes must be positive".to_string(),
            }
            .into());
        }

        let line_count = index.line_count();
        let avg_line_bytes = (index.text().len() / line_count).max(1);
        let target_lines = (self.max_chunk_bytes / (avg_line_bytes + LINE_OVERHEAD_BYTES))
            .max(MIN_TARGET_LINES);
        if self.overlap_lines >= target_lines {
            return Err(SetupError::OverlapTooLarge {
                overlap: self.overlap_lines,
                lines: target_lines,
            }
            .into());
        }

        Ok(Spans {
            index,
            max_chunk_bytes: self.max_chunk_bytes,
            overlap_lines: self.overlap_lines,
            target_lines,
            next_start: 1,
            next_index: 0,
        })
    }
}

/// Lazy iterator over chunk spans produced by [`LineChunker::split`].
#[derive(Debug)]
pub struct Spans<'i, 'a> {
    index: &'i TextIndex<'a>,
    max_chunk_bytes: usize,
    overlap_lines: usize,
    target_lines: usize,
    next_start: usize,
    next_index: usize,
}

impl Iterator for Spans<'_, '_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let line_count = self.index.line_count();
        if self.next_start > line_count {
            return None;
        }

        let start = self.next_start;
        let mut end = start;
        let mut bytes = 0usize;
        while end <= line_count && end - start < self.target_lines {
            let line_bytes = self.index.line_byte_len(end);
            // The first line is always taken, even when oversized, so
            // the iterator is guaranteed to advance.
            if bytes > 0 && bytes + line_bytes > self.max_chunk_bytes {
                break;
            }
            bytes += line_bytes;
            end += 1;
        }
        let end_line = (end - 1).max(start);

        let chunk = Chunk::new(self.next_index, start, end_line);
        self.next_index += 1;
        self.next_start = if end_line >= line_count {
            line_count + 1
        } else {
            // Rewind by the overlap, but never behind the last start.
            (end_line + 1)
                .saturating_sub(self.overlap_lines)
                .max(start + 1)
        };
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chunks_for(text: &str, chunker: &LineChunker) -> Vec<Chunk> {
        let index = TextIndex::new(text);
        chunker
            .split(&index)
            .map(|spans| spans.collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = chunks_for("one\ntwo\nthree", &LineChunker::new());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], Chunk::new(0, 1, 3));
    }

    #[test]
    fn test_empty_text_is_setup_error() {
        let index = TextIndex::new("");
        let err = LineChunker::new().split(&index).map(|_| ()).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Setup(SetupError::EmptyText)
        ));
    }

    #[test]
    fn test_overlap_too_large_is_setup_error() {
        let index = TextIndex::new("one\ntwo\nthree");
        let chunker = LineChunker::new().with_overlap_lines(500);
        let err = chunker.split(&index).map(|_| ()).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Setup(SetupError::OverlapTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_byte_cap_is_setup_error() {
        let index = TextIndex::new("one");
        let chunker = LineChunker::new().with_max_chunk_bytes(0);
        assert!(chunker.split(&index).is_err());
    }

    #[test]
    fn test_chunks_cover_all_lines_in_order() {
        let text = (1..=500)
            .map(|n| format!("line number {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunker = LineChunker::new()
            .with_max_chunk_bytes(1024)
            .with_overlap_lines(5);
        let chunks = chunks_for(&text, &chunker);

        assert!(chunks.len() > 1);
        assert_eq!(chunks[0].start_line, 1);
        assert_eq!(chunks.last().map(|c| c.end_line), Some(500));
        for (i, pair) in chunks.windows(2).enumerate() {
            assert_eq!(pair[0].index, i);
            // No gap between consecutive chunks.
            assert!(pair[1].start_line <= pair[0].end_line + 1);
            assert!(pair[1].start_line > pair[0].start_line);
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let text = (1..=300)
            .map(|n| format!("line {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunker = LineChunker::new()
            .with_max_chunk_bytes(600)
            .with_overlap_lines(5);
        let chunks = chunks_for(&text, &chunker);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].start_line, pair[0].end_line + 1 - 5);
        }
    }

    #[test]
    fn test_byte_cap_respected() {
        let text = (1..=200)
            .map(|n| format!("some padding content line {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let index = TextIndex::new(&text);
        let chunker = LineChunker::new()
            .with_max_chunk_bytes(512)
            .with_overlap_lines(2);
        let spans = chunker.split(&index).unwrap();
        for chunk in spans {
            let raw: usize = (chunk.start_line..=chunk.end_line)
                .map(|line| index.line_byte_len(line))
                .sum();
            assert!(raw <= 512, "chunk {chunk:?} holds {raw} bytes");
        }
    }

    #[test]
    fn test_oversized_single_line_still_advances() {
        let long = "x".repeat(4096);
        let text = format!("{long}\n{long}\n{long}");
        let chunker = LineChunker::new()
            .with_max_chunk_bytes(1024)
            .with_overlap_lines(0);
        let chunks = chunks_for(&text, &chunker);
        assert_eq!(chunks.len(), 3);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.start_line, i + 1);
            assert_eq!(chunk.end_line, i + 1);
        }
    }

    proptest! {
        #[test]
        fn prop_chunks_terminate_and_cover(
            line_lens in prop::collection::vec(0usize..80, 1..200),
            max_bytes in 64usize..4096,
            overlap in 0usize..10,
        ) {
            let text = line_lens
                .iter()
                .map(|len| "a".repeat(*len))
                .collect::<Vec<_>>()
                .join("\n");
            let index = TextIndex::new(&text);
            let chunker = LineChunker::new()
                .with_max_chunk_bytes(max_bytes)
                .with_overlap_lines(overlap);
            let chunks: Vec<Chunk> = chunker.split(&index).unwrap().collect();

            prop_assert!(!chunks.is_empty());
            prop_assert_eq!(chunks[0].start_line, 1);
            prop_assert_eq!(chunks.last().map(|c| c.end_line), Some(index.line_count()));
            for pair in chunks.windows(2) {
                prop_assert!(pair[1].start_line > pair[0].start_line);
                prop_assert!(pair[1].start_line <= pair[0].end_line + 1);
            }
        }
    }
}
