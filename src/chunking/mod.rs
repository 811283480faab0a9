//! Chunk splitting.
//!
//! Splits large source texts into bounded, overlapping line-addressed
//! chunks. The splitter is lazy: it yields [`crate::Chunk`] spans and
//! never materializes chunk text itself.

pub mod splitter;

pub use splitter::{LineChunker, Spans};

/// Default maximum chunk size in bytes.
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 30 * 1024;

/// Default number of lines shared between consecutive chunks.
pub const DEFAULT_OVERLAP_LINES: usize = 20;

/// Default cap on the number of chunks submitted for scoring.
pub const DEFAULT_MAX_CHUNKS: usize = 20;

/// Default number of preceding context lines in a scoring view.
pub const DEFAULT_SCORING_CONTEXT_LINES: usize = 128;
