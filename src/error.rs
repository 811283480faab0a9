//! Error types for digestion operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! engine operations. The taxonomy mirrors how failures are handled:
//! input errors are fatal and returned to the caller, setup and run
//! errors are recovered through the fallback shrinker, and scoring
//! errors are recovered per chunk.

use thiserror::Error;

/// Result type alias for digestion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the digestion engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Input errors (unusable source text). Fatal, returned to the caller.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Setup errors (pipeline could not be constructed). Recovered via fallback.
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    /// Run errors (pipeline failed mid-execution). Recovered via fallback.
    #[error("run error: {0}")]
    Run(#[from] RunError),

    /// Scoring capability errors. Recovered per chunk, never propagated.
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoreError),

    /// The caller cancelled the in-flight digestion.
    #[error("digestion cancelled")]
    Cancelled,
}

/// Input-specific errors. The only category surfaced to callers.
#[derive(Error, Debug)]
pub enum InputError {
    /// The source text is structurally empty.
    #[error("source text is empty")]
    EmptySource,

    /// The source could not be read into text.
    #[error("failed to read source: {reason}")]
    ReadFailed {
        /// Reason for failure.
        reason: String,
    },
}

/// Setup-specific errors for pipeline construction.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Invalid engine configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// The chunk splitter received empty text.
    #[error("cannot chunk empty text")]
    EmptyText,

    /// Overlap exceeds the lines available per chunk.
    #[error("overlap {overlap} must be less than lines per chunk {lines}")]
    OverlapTooLarge {
        /// Overlap in lines.
        overlap: usize,
        /// Lines per chunk.
        lines: usize,
    },
}

/// Run-specific errors for mid-pipeline failures.
#[derive(Error, Debug)]
pub enum RunError {
    /// A chunk worker task failed outside the scoring path.
    #[error("chunk {index} worker failed: {reason}")]
    WorkerFailed {
        /// Index of the failing chunk.
        index: usize,
        /// Reason for failure.
        reason: String,
    },

    /// Aggregation state was unusable.
    #[error("aggregation failed: {0}")]
    Aggregation(String),
}

/// Scoring-capability errors for a single chunk.
///
/// These never leave the extraction worker: a chunk whose scoring call
/// fails contributes zero ranges and the pipeline continues.
#[derive(Error, Debug)]
pub enum ScoreError {
    /// Transport failure while invoking the scoring capability.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The scoring capability returned an unparseable payload.
    #[error("protocol failure: {0}")]
    Protocol(String),

    /// The candidate stream ended without a completion batch.
    #[error("candidate stream ended without completion")]
    MissingCompletion,
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        Self::ReadFailed {
            reason: err.to_string(),
        }
    }
}
