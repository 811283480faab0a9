//! Budget packing.
//!
//! Turns the deduplicated, score-ordered ranges into the final digest
//! string. Packing is greedy in score order: passages are appended
//! until the next one would push the extracted byte total past the
//! budget, at which point a marker notes how many were left out.

use std::fmt::Write as _;

use tracing::debug;

use crate::core::ScoredRange;

/// Assembles digests under a byte budget.
#[derive(Debug, Clone, Copy)]
pub struct BudgetPacker {
    max_bytes: usize,
}

impl BudgetPacker {
    /// Creates a packer for the given extracted-byte budget.
    #[must_use]
    pub const fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Packs ranges into a digest.
    ///
    /// Ranges are consumed in the order given, which the aggregation
    /// step has already sorted by score. Ranges without resolved text
    /// are skipped. An empty input packs to an empty string. Everything
    /// before the truncation marker counts against the budget, so the
    /// digest body never exceeds it.
    #[must_use]
    pub fn pack(&self, ranges: &[ScoredRange], source_bytes: usize) -> String {
        if ranges.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Extracted {} most relevant passages from {} bytes of source:\n",
            ranges.len(),
            source_bytes,
        );

        for (i, range) in ranges.iter().enumerate() {
            let Some(text) = range.text().filter(|text| !text.is_empty()) else {
                continue;
            };
            let banner = format!(
                "=== [{}] Score: {:.2} (lines {}-{}) ===\n",
                i + 1,
                range.score,
                range.start_line,
                range.end_line,
            );
            // Entry trailer is "\n\n".
            if out.len() + banner.len() + text.len() + 2 > self.max_bytes {
                let _ = writeln!(
                    out,
                    "\n[... byte budget of {} reached, {} passages omitted ...]",
                    self.max_bytes,
                    ranges.len() - i,
                );
                debug!(packed = i, omitted = ranges.len() - i, "budget reached");
                break;
            }
            out.push_str(&banner);
            out.push_str(text);
            out.push_str("\n\n");
        }
        out
    }
}
