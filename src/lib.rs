//! # gist-rs
//!
//! Relevance-guided text compression.
//!
//! Given an arbitrarily large text and a destination (a description of
//! what is relevant), gist-rs produces a byte-budgeted digest holding
//! only the passages an external relevance-scoring capability judges
//! most pertinent, with overlapping extracts deduplicated.
//!
//! ## Features
//!
//! - **Bounded Chunking**: lazy, overlapping, line-numbered chunks with
//!   byte and count caps
//! - **Concurrent Scoring**: chunks scored in parallel through a
//!   pluggable async [`Scorer`] seam, with cross-chunk dedup hints
//! - **Greedy Dedup**: overlapping ranges resolved by score priority
//! - **Budget Packing**: digest assembly that never exceeds the byte
//!   budget
//! - **Deterministic Fallback**: head truncation whenever scoring is
//!   unavailable
//!
//! ## Example
//!
//! ```no_run
//! # use gist_rs::{Engine, EngineConfig, Scorer, Result};
//! # async fn example(scorer: impl Scorer + 'static) -> Result<()> {
//! let engine = Engine::new(scorer)
//!     .with_config(EngineConfig::default().with_max_chunks(10));
//! let digest = engine
//!     .digest("...large text...", "how are retries configured?", 10_240)
//!     .await?;
//! # let _ = digest;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod aggregate;
pub mod cancel;
pub mod chunking;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod fallback;
pub mod index;
pub mod pack;
pub mod scoring;
pub mod source;

// Re-export commonly used types at crate root
pub use error::{Error, InputError, Result, RunError, ScoreError, SetupError};

// Re-export core domain types
pub use core::{Chunk, ExtractedBuffer, ScoredRange};

// Re-export pipeline entry points
pub use cancel::CancelToken;
pub use config::EngineConfig;
pub use engine::{BUDGET_FLOOR_BYTES, DEFAULT_BUDGET_BYTES, Engine};
pub use index::TextIndex;
pub use source::SourceText;

// Re-export the seams callers implement
pub use evidence::{ChannelSink, EvidenceEvent, EvidenceSink, NullSink};
pub use scoring::{ScoreEvent, ScoreRequest, ScoreStream, Scorer};

// Re-export chunking types
pub use chunking::{LineChunker, Spans};
