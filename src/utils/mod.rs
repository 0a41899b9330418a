//! Utility functions and helpers.

pub mod html;
pub mod http;
pub mod url;

use unicode_segmentation::UnicodeSegmentation;

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max` user-perceived characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.grapheme_indices(true).nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
