//! Bounded dedup-hint buffer.
//!
//! Extraction workers record the text they have already pulled so that
//! later scoring requests can be told what not to repeat. The buffer is
//! append-only and capped; once full it silently stops accepting, which
//! keeps the hint cheap on pathological inputs.

/// Default capacity of the already-extracted hint buffer, in bytes.
pub const DEFAULT_HINT_CAPACITY: usize = 8 * 1024;

/// An append-only, byte-capped record of already-extracted text.
///
/// Appends that would overflow the capacity are truncated at a char
/// boundary; once the buffer is full, further appends are dropped.
/// The hint is advisory, so losing the tail is acceptable.
///
/// # Examples
///
/// ```
/// use gist_rs::ExtractedBuffer;
///
/// let mut buffer = ExtractedBuffer::with_capacity(16);
/// buffer.append("first extract");
/// buffer.append("second extract");
/// assert!(buffer.len() <= 16);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractedBuffer {
    content: String,
    capacity: usize,
}

impl Default for ExtractedBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HINT_CAPACITY)
    }
}

impl ExtractedBuffer {
    /// Creates a buffer with the given byte capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            content: String::new(),
            capacity,
        }
    }

    /// Appends text, separated from prior content by a newline.
    ///
    /// Text that does not fit is truncated at a char boundary; a full
    /// buffer drops the append entirely. Empty text is ignored.
    pub fn append(&mut self, text: &str) {
        if text.is_empty() || self.is_full() {
            return;
        }
        if !self.content.is_empty() {
            self.content.push('\n');
        }
        let remaining = self.capacity.saturating_sub(self.content.len());
        if text.len() <= remaining {
            self.content.push_str(text);
        } else {
            self.content.push_str(truncate_at_char_boundary(text, remaining));
        }
    }

    /// Checks whether the buffer has reached capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.content.len() >= self.capacity
    }

    /// Returns the current byte length of the buffered content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Checks whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the buffered content, or `None` when empty.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        if self.content.is_empty() {
            None
        } else {
            Some(self.content.clone())
        }
    }
}

/// Truncates to at most `max_bytes`, backing off to a char boundary.
fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
