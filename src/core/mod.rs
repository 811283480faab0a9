//! Core domain types.
//!
//! Chunks, scored ranges, and the bounded dedup-hint buffer. These are
//! the values that flow between the splitter, extraction workers, and
//! the aggregation engine.

pub mod chunk;
pub mod extracted;
pub mod range;

pub use chunk::Chunk;
pub use extracted::ExtractedBuffer;
pub use range::ScoredRange;
