//! Cooperative cancellation.

use std::sync::Arc;

use tokio::sync::watch;

/// A cloneable cancellation flag shared across the pipeline.
///
/// Cancellation is cooperative: workers check the token between
/// scoring events and stop issuing new work once it trips. A token
/// never un-cancels.
///
/// # Examples
///
/// ```
/// use gist_rs::CancelToken;
///
/// let token = CancelToken::new();
/// assert!(!token.is_cancelled());
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Trips the token. All clones observe the cancellation.
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }

    /// Checks the flag without waiting.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Waits until the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // The sender lives in self, so wait_for cannot see a closed
        // channel while this borrow is alive.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}
