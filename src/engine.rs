//! Digest engine.
//!
//! Orchestrates the whole pipeline: index the source, split it into
//! chunks, score the chunks concurrently, aggregate and dedup the
//! results, then pack a digest under the byte budget. Anything that
//! breaks after input validation degrades to the head-truncation
//! fallback rather than failing the call.

use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::aggregate::Aggregator;
use crate::cancel::CancelToken;
use crate::chunking::LineChunker;
use crate::config::EngineConfig;
use crate::core::Chunk;
use crate::error::{Error, InputError, Result};
use crate::evidence::{EvidenceSink, NullSink};
use crate::fallback;
use crate::index::TextIndex;
use crate::pack::BudgetPacker;
use crate::scoring::{CandidateBounds, ScoreRequest, Scorer, worker::extract_ranges};
use crate::source::SourceText;

/// Digest budget used when the caller's request is absent or tiny.
pub const DEFAULT_BUDGET_BYTES: usize = 10 * 1024;

/// Requested budgets at or below this are replaced with the default.
pub const BUDGET_FLOOR_BYTES: usize = 1024;

/// The relevance-guided digest engine.
///
/// # Examples
///
/// ```no_run
/// # use gist_rs::{Engine, Scorer, Result};
/// # async fn example(scorer: impl Scorer + 'static) -> Result<()> {
/// let engine = Engine::new(scorer);
/// let digest = engine
///     .digest("the full source text", "what does it say about retries?", 10_240)
///     .await?;
/// # let _ = digest;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    scorer: Arc<dyn Scorer>,
    sink: Arc<dyn EvidenceSink>,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with default configuration and no evidence
    /// consumer.
    pub fn new(scorer: impl Scorer + 'static) -> Self {
        Self {
            scorer: Arc::new(scorer),
            sink: Arc::new(NullSink),
            config: EngineConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches an evidence sink for streaming accepted extracts.
    #[must_use]
    pub fn with_evidence_sink(mut self, sink: impl EvidenceSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Digests a source down to at most `budget_bytes` of extracts.
    ///
    /// `destination` states what the digest is for; relevance is judged
    /// against it. Budgets at or below [`BUDGET_FLOOR_BYTES`] are
    /// replaced with [`DEFAULT_BUDGET_BYTES`]. A source already well
    /// under budget is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptySource`] for an empty source. All
    /// later failures degrade to the truncation fallback instead of
    /// erroring.
    pub async fn digest(
        &self,
        source: impl Into<SourceText>,
        destination: &str,
        budget_bytes: usize,
    ) -> Result<String> {
        self.digest_with_cancel(source, destination, budget_bytes, &CancelToken::new())
            .await
    }

    /// Like [`Engine::digest`], observing the given cancellation token.
    ///
    /// # Errors
    ///
    /// In addition to the [`Engine::digest`] errors, returns
    /// [`Error::Cancelled`] when the token trips before the digest is
    /// assembled; no partial digest is produced.
    pub async fn digest_with_cancel(
        &self,
        source: impl Into<SourceText>,
        destination: &str,
        budget_bytes: usize,
        cancel: &CancelToken,
    ) -> Result<String> {
        let source = source.into();
        if source.is_empty() {
            return Err(InputError::EmptySource.into());
        }
        let budget = if budget_bytes <= BUDGET_FLOOR_BYTES {
            debug!(requested = budget_bytes, "budget below floor, using default");
            DEFAULT_BUDGET_BYTES
        } else {
            budget_bytes
        };
        if source.len() < budget / 2 {
            debug!(bytes = source.len(), budget, "source under budget, returned unchanged");
            return Ok(source.into_inner());
        }
        let text = source.as_str();

        // The safety net is computed up front so a failing pipeline
        // always has something to return.
        let fallback_digest = fallback::shrink(text, budget);

        if let Err(err) = self.config.validate() {
            warn!(error = %err, "invalid configuration, falling back to truncation");
            return Ok(fallback_digest);
        }

        match self.run_pipeline(text, destination, budget, cancel).await {
            Ok(Some(digest)) => Ok(digest),
            Ok(None) => {
                warn!("no relevant passages found");
                Ok(String::new())
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(err) => {
                warn!(error = %err, "pipeline failed, falling back to truncation");
                Ok(fallback_digest)
            }
        }
    }

    async fn run_pipeline(
        &self,
        text: &str,
        destination: &str,
        budget: usize,
        cancel: &CancelToken,
    ) -> Result<Option<String>> {
        let config = &self.config;
        let index = TextIndex::new(text);
        let chunker = LineChunker::new()
            .with_max_chunk_bytes(config.max_chunk_bytes)
            .with_overlap_lines(config.overlap_lines);

        let mut chunks: Vec<Chunk> = Vec::with_capacity(config.max_chunks);
        let mut dropped = 0usize;
        for chunk in chunker.split(&index)? {
            if chunks.len() < config.max_chunks {
                chunks.push(chunk);
            } else {
                dropped += 1;
            }
        }
        info!(
            bytes = text.len(),
            lines = index.line_count(),
            chunks = chunks.len(),
            dropped,
            "scoring started"
        );

        let aggregator = Aggregator::new();
        if dropped > 0 {
            warn!(dropped, cap = config.max_chunks, "chunk cap reached, tail not scored");
            aggregator.mark_oversize(dropped);
        }

        let bounds = CandidateBounds {
            min_lines: config.min_lines,
            max_lines: config.max_lines,
            min_score: config.min_score,
        };
        futures_util::stream::iter(chunks)
            .for_each_concurrent(Some(config.max_concurrent_scores), |chunk| {
                let index = &index;
                let aggregator = &aggregator;
                let bounds = &bounds;
                let scorer = self.scorer.as_ref();
                let sink = self.sink.as_ref();
                async move {
                    if cancel.is_cancelled() {
                        return;
                    }
                    let request = ScoreRequest {
                        destination: destination.to_string(),
                        chunk_text: chunk.scoring_view(index, config.scoring_context_lines),
                        already_extracted: aggregator.hint_snapshot(),
                        max_ranges: config.max_ranges,
                        min_lines: config.min_lines,
                        max_lines: config.max_lines,
                        chunk_start_line: chunk.start_line,
                        chunk_end_line: chunk.end_line,
                    };
                    let ranges =
                        extract_ranges(scorer, chunk.index, request, index, bounds, sink, cancel)
                            .await;
                    aggregator.absorb(ranges);
                }
            })
            .await;

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let outcome = aggregator.finish();
        if outcome.ranges.is_empty() {
            return Ok(None);
        }
        let digest = BudgetPacker::new(budget).pack(&outcome.ranges, text.len());
        info!(
            from_bytes = text.len(),
            to_bytes = digest.len(),
            passages = outcome.ranges.len(),
            "digest assembled"
        );
        Ok(Some(digest))
    }
}
