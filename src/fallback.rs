//! Deterministic fallback.
//!
//! When scoring cannot run at all, the digest degrades to a plain head
//! truncation of the source. The cut lands on a grapheme boundary so a
//! multi-byte character is never split.

use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to a truncated fallback digest.
pub const TRUNCATION_NOTICE: &str = "\n\n[... content truncated ...]\n";

/// Produces a head-truncated rendition of the source.
///
/// The kept prefix is bounded by half the byte budget, leaving room
/// for whatever the caller wraps around the digest. Text that already
/// fits is returned unchanged, without the notice.
///
/// # Examples
///
/// ```
/// use gist_rs::fallback;
///
/// let digest = fallback::shrink("short text", 10_240);
/// assert_eq!(digest, "short text");
/// ```
#[must_use]
pub fn shrink(text: &str, budget_bytes: usize) -> String {
    let limit = budget_bytes / 2;
    if text.len() <= limit {
        return text.to_string();
    }

    let mut cut = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        if offset + grapheme.len() > limit {
            break;
        }
        cut = offset + grapheme.len();
    }

    let mut out = String::with_capacity(cut + TRUNCATION_NOTICE.len());
    out.push_str(&text[..cut]);
    out.push_str(TRUNCATION_NOTICE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(shrink("hello", 1000), "hello");
    }

    #[test]
    fn test_long_text_truncated_with_notice() {
        let text = "z".repeat(2000);
        let digest = shrink(&text, 1000);
        assert!(digest.ends_with(TRUNCATION_NOTICE));
        assert_eq!(digest.len(), 500 + TRUNCATION_NOTICE.len());
    }

    #[test]
    fn test_exact_limit_unchanged() {
        let text = "z".repeat(500);
        assert_eq!(shrink(&text, 1000), text);
    }

    #[test]
    fn test_cut_respects_grapheme_boundary() {
        // Family emoji is a multi-scalar grapheme cluster; the cut must
        // keep it whole or drop it entirely.
        let cluster = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let text = cluster.repeat(100);
        let digest = shrink(&text, 100);
        let kept = digest.strip_suffix(TRUNCATION_NOTICE).unwrap();
        assert_eq!(kept.len() % cluster.len(), 0);
    }

    #[test]
    fn test_zero_budget_keeps_nothing() {
        let digest = shrink("some text here", 0);
        assert_eq!(digest, TRUNCATION_NOTICE);
    }

    proptest! {
        #[test]
        fn prop_shrink_is_bounded(text in "\\PC{0,400}", budget in 0usize..600) {
            let digest = shrink(&text, budget);
            if text.len() <= budget / 2 {
                prop_assert_eq!(digest, text);
            } else {
                prop_assert!(digest.len() <= budget / 2 + TRUNCATION_NOTICE.len());
                prop_assert!(digest.ends_with(TRUNCATION_NOTICE));
            }
        }
    }
}
