//! Evidence emission.
//!
//! Accepted extracts can be streamed out as they are found, before the
//! final digest is packed. Emission is strictly fire-and-forget: a slow
//! or absent consumer never blocks or fails the pipeline.

use tokio::sync::mpsc;
use tracing::trace;

use crate::core::ScoredRange;

/// One accepted extract, reported as soon as a worker validates it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceEvent {
    /// Index of the chunk the extract came from.
    pub chunk_index: usize,

    /// The validated range, with its text resolved.
    pub range: ScoredRange,
}

/// Receives evidence events from extraction workers.
///
/// Implementations must not block: `offer` is called from the scoring
/// hot path and a dropped event is preferable to a stalled worker.
pub trait EvidenceSink: Send + Sync + std::fmt::Debug {
    /// Offers one event to the sink. Best effort; may drop.
    fn offer(&self, event: EvidenceEvent);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EvidenceSink for NullSink {
    fn offer(&self, _event: EvidenceEvent) {}
}

/// A sink backed by a bounded channel.
///
/// Events are delivered with `try_send`; when the channel is full or
/// the receiver is gone, the event is dropped and traced.
///
/// # Examples
///
/// ```
/// use gist_rs::evidence::ChannelSink;
///
/// let (sink, receiver) = ChannelSink::channel(64);
/// # drop(sink);
/// # drop(receiver);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::Sender<EvidenceEvent>,
}

impl ChannelSink {
    /// Creates a sink and its receiving half with the given capacity.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EvidenceEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl EvidenceSink for ChannelSink {
    fn offer(&self, event: EvidenceEvent) {
        if let Err(err) = self.sender.try_send(event) {
            trace!(reason = %err, "evidence event dropped");
        }
    }
}
