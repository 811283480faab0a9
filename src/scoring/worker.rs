//! Per-chunk extraction worker.
//!
//! Drives one scoring stream to completion and turns it into validated
//! ranges. Scoring failures never escape: a chunk whose scorer breaks
//! simply contributes nothing to the digest.

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::core::ScoredRange;
use crate::evidence::{EvidenceEvent, EvidenceSink};
use crate::index::TextIndex;
use crate::scoring::{CandidateBounds, ScoreEvent, ScoreRequest, Scorer, validate};

/// Scores one chunk and returns its validated, text-resolved ranges.
///
/// Incremental candidates are validated and offered to the evidence
/// sink as they arrive; the final [`ScoreEvent::Complete`] batch is
/// authoritative for what the chunk actually contributes. A stream
/// that ends without a completion, errors on start, or gets cancelled
/// yields an empty result.
pub async fn extract_ranges(
    scorer: &dyn Scorer,
    chunk_index: usize,
    request: ScoreRequest,
    index: &TextIndex<'_>,
    bounds: &CandidateBounds,
    sink: &dyn EvidenceSink,
    cancel: &CancelToken,
) -> Vec<ScoredRange> {
    let max_ranges = request.max_ranges;
    let mut stream = match scorer.score(request).await {
        Ok(stream) => stream,
        Err(err) => {
            warn!(chunk = chunk_index, error = %err, "scoring failed, chunk skipped");
            return Vec::new();
        }
    };

    let mut complete = None;
    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            event = stream.next() => match event {
                Some(event) => event,
                None => break,
            },
        };
        match event {
            ScoreEvent::Candidate(raw) => {
                if let Some(mut range) = validate(&raw, bounds) {
                    range.resolve(index);
                    sink.offer(EvidenceEvent { chunk_index, range });
                } else {
                    debug!(chunk = chunk_index, range = %raw.range, "candidate rejected");
                }
            }
            ScoreEvent::Complete(batch) => {
                complete = Some(batch);
                break;
            }
        }
    }

    if cancel.is_cancelled() {
        return Vec::new();
    }
    let Some(batch) = complete else {
        warn!(chunk = chunk_index, "scoring stream ended without a final batch");
        return Vec::new();
    };

    batch
        .iter()
        .filter_map(|raw| validate(raw, bounds))
        .take(max_ranges)
        .map(|mut range| {
            range.resolve(index);
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures_util::stream;
    use std::sync::Mutex;

    use crate::error::ScoreError;
    use crate::evidence::NullSink;
    use crate::scoring::{RawCandidate, ScoreStream};

    #[derive(Debug)]
    struct ScriptedScorer {
        events: Mutex<Option<Vec<ScoreEvent>>>,
        fail: bool,
    }

    impl ScriptedScorer {
        fn events(events: Vec<ScoreEvent>) -> Self {
            Self {
                events: Mutex::new(Some(events)),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                events: Mutex::new(None),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl Scorer for ScriptedScorer {
        async fn score(&self, _request: ScoreRequest) -> Result<ScoreStream, ScoreError> {
            if self.fail {
                return Err(ScoreError::Transport("connection refused".to_string()));
            }
            let events = self
                .events
                .lock()
                .unwrap()
                .take()
                .unwrap_or_default();
            Ok(stream::iter(events).boxed())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingSink {
        events: Mutex<Vec<EvidenceEvent>>,
    }

    impl EvidenceSink for RecordingSink {
        fn offer(&self, event: EvidenceEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn raw(range: &str, score: f64) -> RawCandidate {
        RawCandidate {
            range: range.to_string(),
            score,
        }
    }

    fn request() -> ScoreRequest {
        ScoreRequest {
            destination: "what the text says about timeouts".to_string(),
            chunk_text: String::new(),
            already_extracted: None,
            max_ranges: 8,
            min_lines: 3,
            max_lines: 20,
            chunk_start_line: 1,
            chunk_end_line: 40,
        }
    }

    const SAMPLE: &str = "l1\nl2\nl3\nl4\nl5\nl6\nl7\nl8\nl9\nl10";

    #[tokio::test]
    async fn test_complete_batch_is_authoritative() {
        let scorer = ScriptedScorer::events(vec![
            ScoreEvent::Candidate(raw("1-3", 0.9)),
            ScoreEvent::Complete(vec![raw("4-7", 0.8)]),
        ]);
        let index = TextIndex::new(SAMPLE);
        let ranges = extract_ranges(
            &scorer,
            0,
            request(),
            &index,
            &CandidateBounds::default(),
            &NullSink,
            &CancelToken::new(),
        )
        .await;

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start_line, 4);
        assert_eq!(ranges[0].text(), Some("l4\nl5\nl6\nl7"));
    }

    #[tokio::test]
    async fn test_missing_completion_yields_nothing() {
        let scorer = ScriptedScorer::events(vec![ScoreEvent::Candidate(raw("1-3", 0.9))]);
        let index = TextIndex::new(SAMPLE);
        let ranges = extract_ranges(
            &scorer,
            0,
            request(),
            &index,
            &CandidateBounds::default(),
            &NullSink,
            &CancelToken::new(),
        )
        .await;
        assert!(ranges.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_yields_nothing() {
        let scorer = ScriptedScorer::failing();
        let index = TextIndex::new(SAMPLE);
        let ranges = extract_ranges(
            &scorer,
            3,
            request(),
            &index,
            &CandidateBounds::default(),
            &NullSink,
            &CancelToken::new(),
        )
        .await;
        assert!(ranges.is_empty());
    }

    #[tokio::test]
    async fn test_incremental_candidates_reach_the_sink() {
        let scorer = ScriptedScorer::events(vec![
            ScoreEvent::Candidate(raw("1-3", 0.9)),
            ScoreEvent::Candidate(raw("bad", 0.9)),
            ScoreEvent::Complete(vec![]),
        ]);
        let index = TextIndex::new(SAMPLE);
        let sink = RecordingSink::default();
        extract_ranges(
            &scorer,
            5,
            request(),
            &index,
            &CandidateBounds::default(),
            &sink,
            &CancelToken::new(),
        )
        .await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].chunk_index, 5);
        assert_eq!(events[0].range.text(), Some("l1\nl2\nl3"));
    }

    #[tokio::test]
    async fn test_batch_capped_at_max_ranges() {
        let batch: Vec<RawCandidate> = vec![
            raw("1-3", 0.9),
            raw("4-6", 0.8),
            raw("7-9", 0.7),
        ];
        let scorer = ScriptedScorer::events(vec![ScoreEvent::Complete(batch)]);
        let index = TextIndex::new(SAMPLE);
        let mut req = request();
        req.max_ranges = 2;
        let ranges = extract_ranges(
            &scorer,
            0,
            req,
            &index,
            &CandidateBounds::default(),
            &NullSink,
            &CancelToken::new(),
        )
        .await;
        assert_eq!(ranges.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_batch_entries_are_skipped() {
        let batch = vec![raw("1-3", 0.9), raw("0-4", 0.9), raw("4-6", 0.1)];
        let scorer = ScriptedScorer::events(vec![ScoreEvent::Complete(batch)]);
        let index = TextIndex::new(SAMPLE);
        let ranges = extract_ranges(
            &scorer,
            0,
            request(),
            &index,
            &CandidateBounds::default(),
            &NullSink,
            &CancelToken::new(),
        )
        .await;
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start_line, 1);
    }

    #[tokio::test]
    async fn test_cancelled_worker_yields_nothing() {
        let scorer = ScriptedScorer::events(vec![ScoreEvent::Complete(vec![raw("1-3", 0.9)])]);
        let index = TextIndex::new(SAMPLE);
        let cancel = CancelToken::new();
        cancel.cancel();
        let ranges = extract_ranges(
            &scorer,
            0,
            request(),
            &index,
            &CandidateBounds::default(),
            &NullSink,
            &cancel,
        )
        .await;
        assert!(ranges.is_empty());
    }
}
