//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::chunking::{
    DEFAULT_MAX_CHUNK_BYTES, DEFAULT_MAX_CHUNKS, DEFAULT_OVERLAP_LINES,
    DEFAULT_SCORING_CONTEXT_LINES,
};
use crate::error::SetupError;
use crate::scoring::{DEFAULT_MAX_LINES, DEFAULT_MAX_RANGES, DEFAULT_MIN_LINES, DEFAULT_MIN_SCORE};

/// Default number of chunks scored concurrently.
pub const DEFAULT_MAX_CONCURRENT_SCORES: usize = 4;

/// Tunable knobs for the digest pipeline.
///
/// Every field has a sensible default; construct with
/// [`EngineConfig::default`] and override what you need.
///
/// # Examples
///
/// ```
/// use gist_rs::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_max_chunks(10)
///     .with_min_score(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum chunk size in bytes.
    pub max_chunk_bytes: usize,

    /// Lines shared between consecutive chunks.
    pub overlap_lines: usize,

    /// Cap on chunks submitted for scoring; the rest are dropped.
    pub max_chunks: usize,

    /// Preceding context lines included in each scoring view.
    pub scoring_context_lines: usize,

    /// Cap on candidate ranges per chunk.
    pub max_ranges: usize,

    /// Minimum lines per extract.
    pub min_lines: usize,

    /// Maximum lines per extract.
    pub max_lines: usize,

    /// Relevance threshold, inclusive.
    pub min_score: f64,

    /// How many chunks are scored at once.
    pub max_concurrent_scores: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
            overlap_lines: DEFAULT_OVERLAP_LINES,
            max_chunks: DEFAULT_MAX_CHUNKS,
            scoring_context_lines: DEFAULT_SCORING_CONTEXT_LINES,
            max_ranges: DEFAULT_MAX_RANGES,
            min_lines: DEFAULT_MIN_LINES,
            max_lines: DEFAULT_MAX_LINES,
            min_score: DEFAULT_MIN_SCORE,
            max_concurrent_scores: DEFAULT_MAX_CONCURRENT_SCORES,
        }
    }
}

impl EngineConfig {
    /// Sets the maximum chunk size in bytes.
    #[must_use]
    pub const fn with_max_chunk_bytes(mut self, max_chunk_bytes: usize) -> Self {
        self.max_chunk_bytes = max_chunk_bytes;
        self
    }

    /// Sets the lines shared between consecutive chunks.
    #[must_use]
    pub const fn with_overlap_lines(mut self, overlap_lines: usize) -> Self {
        self.overlap_lines = overlap_lines;
        self
    }

    /// Sets the cap on chunks submitted for scoring.
    #[must_use]
    pub const fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Sets the preceding context lines per scoring view.
    #[must_use]
    pub const fn with_scoring_context_lines(mut self, scoring_context_lines: usize) -> Self {
        self.scoring_context_lines = scoring_context_lines;
        self
    }

    /// Sets the cap on candidate ranges per chunk.
    #[must_use]
    pub const fn with_max_ranges(mut self, max_ranges: usize) -> Self {
        self.max_ranges = max_ranges;
        self
    }

    /// Sets the extract length bounds in lines.
    #[must_use]
    pub const fn with_line_bounds(mut self, min_lines: usize, max_lines: usize) -> Self {
        self.min_lines = min_lines;
        self.max_lines = max_lines;
        self
    }

    /// Sets the inclusive relevance threshold.
    #[must_use]
    pub const fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Sets the number of chunks scored concurrently.
    #[must_use]
    pub const fn with_max_concurrent_scores(mut self, max_concurrent_scores: usize) -> Self {
        self.max_concurrent_scores = max_concurrent_scores;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.max_chunk_bytes == 0 {
            return Err(invalid("max_chunk_bytes must be positive"));
        }
        if self.max_chunks == 0 {
            return Err(invalid("max_chunks must be positive"));
        }
        if self.max_ranges == 0 {
            return Err(invalid("max_ranges must be positive"));
        }
        if self.min_lines == 0 {
            return Err(invalid("min_lines must be positive"));
        }
        if self.max_lines < self.min_lines {
            return Err(invalid("max_lines must be >= min_lines"));
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 || self.min_score > 1.0 {
            return Err(invalid("min_score must be within [0, 1]"));
        }
        if self.max_concurrent_scores == 0 {
            return Err(invalid("max_concurrent_scores must be positive"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> SetupError {
    SetupError::InvalidConfig {
        reason: reason.to_string(),
    }
}
