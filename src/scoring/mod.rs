//! Relevance scoring seam.
//!
//! The engine is agnostic about what actually scores a chunk; anything
//! that can take a [`ScoreRequest`] and stream back candidate ranges
//! implements [`Scorer`]. Candidates arrive either incrementally, one
//! [`ScoreEvent::Candidate`] at a time, or as the authoritative batch
//! in [`ScoreEvent::Complete`].

pub mod worker;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::core::ScoredRange;
use crate::error::ScoreError;

pub use worker::extract_ranges;

/// Default cap on candidate ranges requested per chunk.
pub const DEFAULT_MAX_RANGES: usize = 8;

/// Default minimum lines per extract.
pub const DEFAULT_MIN_LINES: usize = 3;

/// Default maximum lines per extract.
pub const DEFAULT_MAX_LINES: usize = 20;

/// Default relevance threshold; candidates below it are dropped.
pub const DEFAULT_MIN_SCORE: f64 = 0.4;

/// A candidate as reported on the wire, before validation.
///
/// # Examples
///
/// ```
/// use gist_rs::scoring::RawCandidate;
///
/// let raw: RawCandidate = serde_json::from_str(
///     r#"{"range": "18-32", "score": 0.87}"#,
/// ).unwrap();
/// assert_eq!(raw.range, "18-32");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Inclusive line span in `"start-end"` form.
    pub range: String,

    /// Relevance score; expected in `[0, 1]`.
    pub score: f64,
}

impl RawCandidate {
    /// Parses a JSON array of candidates, the batch wire format.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Protocol`] when the payload is not a valid
    /// candidate array.
    pub fn parse_batch(payload: &str) -> Result<Vec<Self>, ScoreError> {
        serde_json::from_str(payload).map_err(ScoreError::from)
    }
}

/// One event in a scoring stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreEvent {
    /// A single candidate, reported as soon as it is available.
    Candidate(RawCandidate),

    /// The authoritative final batch for the chunk.
    ///
    /// When present, this supersedes any incremental candidates seen
    /// earlier in the stream.
    Complete(Vec<RawCandidate>),
}

/// A stream of scoring events for one chunk.
pub type ScoreStream = BoxStream<'static, ScoreEvent>;

/// Everything a scorer needs to judge one chunk.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    /// What the digest is for; relevance is judged against this.
    pub destination: String,

    /// The chunk rendered with line-number prefixes and context.
    pub chunk_text: String,

    /// Text already extracted from other chunks, when any.
    pub already_extracted: Option<String>,

    /// Cap on candidates to report.
    pub max_ranges: usize,

    /// Minimum lines per candidate.
    pub min_lines: usize,

    /// Maximum lines per candidate.
    pub max_lines: usize,

    /// First line of the chunk body (1-based).
    pub chunk_start_line: usize,

    /// Last line of the chunk body (1-based, inclusive).
    pub chunk_end_line: usize,
}

/// Scores a chunk of text against a destination.
#[async_trait]
pub trait Scorer: Send + Sync + std::fmt::Debug {
    /// Starts scoring one chunk, returning the event stream.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Transport`] when the scoring capability
    /// cannot be reached at all.
    async fn score(&self, request: ScoreRequest) -> Result<ScoreStream, ScoreError>;
}

/// Validation bounds applied to raw candidates.
#[derive(Debug, Clone, Copy)]
pub struct CandidateBounds {
    /// Minimum lines per extract.
    pub min_lines: usize,

    /// Maximum lines per extract.
    pub max_lines: usize,

    /// Minimum acceptable score (inclusive).
    pub min_score: f64,
}

impl Default for CandidateBounds {
    fn default() -> Self {
        Self {
            min_lines: DEFAULT_MIN_LINES,
            max_lines: DEFAULT_MAX_LINES,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// Validates one raw candidate against the bounds.
///
/// Returns `None` for anything malformed or out of bounds; rejected
/// candidates are skipped, never surfaced as errors.
#[must_use]
pub fn validate(raw: &RawCandidate, bounds: &CandidateBounds) -> Option<ScoredRange> {
    if !raw.score.is_finite() || raw.score < bounds.min_score || raw.score > 1.0 {
        return None;
    }
    let range = ScoredRange::parse(&raw.range, raw.score)?;
    let lines = range.line_count();
    if lines < bounds.min_lines || lines > bounds.max_lines {
        return None;
    }
    Some(range)
}
