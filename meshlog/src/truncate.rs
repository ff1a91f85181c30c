//! Length bounding for formatted payloads.
//!
//! The formatter never shortens its output; call sites decide how much of it to
//! show. Two separate thresholds are in use:
//! [`FIELD_LIMIT`] for one entry of a payload breakdown and [`OBJECT_LIMIT`]
//! for a whole-object dump. Both can be overridden through
//! [`FormatConfig`](crate::config::FormatConfig).
//!
//! Lengths are counted in characters, so truncation never splits a code point.

use std::fmt;

/// Threshold for a single field of a payload breakdown.
pub const FIELD_LIMIT: usize = 500;

/// Threshold for a full-object dump.
pub const OBJECT_LIMIT: usize = 2000;

/// Result of bounding a string at a character threshold.
///
/// Displays as the original text when it fit, or as the head followed by a
/// marker carrying the original length:
///
/// ```rust
/// use meshlog::truncate::truncate;
///
/// let t = truncate("abcdef", 3);
/// assert_eq!(t.to_string(), "abc... [TRUNCATED, 6 chars total]");
/// assert_eq!(truncate("abc", 3).to_string(), "abc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation<'a> {
    head: &'a str,
    original_len: usize,
    truncated: bool,
}

impl<'a> Truncation<'a> {
    /// The retained text: everything, or exactly `limit` characters.
    #[must_use]
    pub const fn head(&self) -> &'a str {
        self.head
    }

    /// Character count of the text before truncation.
    #[must_use]
    pub const fn original_len(&self) -> usize {
        self.original_len
    }

    /// Whether any text was cut.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for Truncation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.truncated {
            write!(
                f,
                "{}... [TRUNCATED, {} chars total]",
                self.head, self.original_len
            )
        } else {
            f.write_str(self.head)
        }
    }
}

/// Bound `text` at `limit` characters.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> Truncation<'_> {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => Truncation {
            head: &text[..cut],
            original_len: text.chars().count(),
            truncated: true,
        },
        None => Truncation {
            head: text,
            original_len: text.chars().count(),
            truncated: false,
        },
    }
}
