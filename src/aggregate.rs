//! Aggregation and dedup.
//!
//! Workers run concurrently and report their ranges here. The
//! aggregator is the single point of shared mutable state in the
//! pipeline: one mutex, held only for short appends and snapshots,
//! never across a scoring call.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::core::{ExtractedBuffer, ScoredRange};

/// Outcome of a finished aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    /// Deduplicated ranges in score-priority order.
    pub ranges: Vec<ScoredRange>,

    /// Number of chunks dropped because the chunk cap was hit.
    pub dropped_chunks: usize,
}

/// Collects ranges from concurrent workers and dedups them at the end.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    ranges: Vec<ScoredRange>,
    hints: ExtractedBuffer,
    dropped_chunks: usize,
}

impl Aggregator {
    /// Creates an empty aggregator with the default hint capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the already-extracted hint for a new scoring request.
    #[must_use]
    pub fn hint_snapshot(&self) -> Option<String> {
        self.lock().hints.snapshot()
    }

    /// Absorbs one worker's validated ranges.
    ///
    /// Resolved texts are recorded in the hint buffer so later scoring
    /// requests can avoid re-extracting the same content.
    pub fn absorb(&self, ranges: Vec<ScoredRange>) {
        if ranges.is_empty() {
            return;
        }
        let mut state = self.lock();
        for range in &ranges {
            if let Some(text) = range.text() {
                state.hints.append(text);
            }
        }
        state.ranges.extend(ranges);
    }

    /// Records chunks that were dropped by the chunk cap.
    pub fn mark_oversize(&self, dropped_chunks: usize) {
        self.lock().dropped_chunks += dropped_chunks;
    }

    /// Finishes aggregation: dedups and orders the collected ranges.
    pub fn finish(self) -> AggregateOutcome {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let before = state.ranges.len();
        let ranges = dedup_ranges(state.ranges);
        debug!(kept = ranges.len(), discarded = before - ranges.len(), "dedup finished");
        AggregateOutcome {
            ranges,
            dropped_chunks: state.dropped_chunks,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Dedups overlapping ranges, keeping the highest-scored of each pile.
///
/// Ranges are ordered by score descending and accepted greedily; a
/// candidate is kept only when it overlaps none of the already-accepted
/// ranges. Ties break toward the earlier span, which keeps the result
/// deterministic across runs.
#[must_use]
pub fn dedup_ranges(mut ranges: Vec<ScoredRange>) -> Vec<ScoredRange> {
    ranges.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.start_line.cmp(&b.start_line))
            .then_with(|| a.end_line.cmp(&b.end_line))
    });
    let mut accepted: Vec<ScoredRange> = Vec::with_capacity(ranges.len());
    for candidate in ranges {
        if accepted.iter().all(|kept| !kept.overlaps(&candidate)) {
            accepted.push(candidate);
        }
    }
    accepted
}
