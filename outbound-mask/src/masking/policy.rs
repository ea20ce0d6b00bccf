//! Masking primitives for string values.
//!
//! These are pure string transformations. They do not traverse payloads, pick
//! fields, or decide what counts as sensitive. Both are total: malformed
//! arguments produce the input unchanged rather than an error.

use std::borrow::Cow;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// Default sensitive pattern: a single-quoted `'password'` key assigned a
/// single-quoted value, matched non-greedily up to the closing quote.
pub const DEFAULT_SENSITIVE_PATTERN: &str = r"'password'\s*=\s*'.+?'";

/// Default token substituted for every sensitive-pattern match.
pub const DEFAULT_MASK_TOKEN: &str = "'password'='******'";

/// Default character used by positional masking.
pub const DEFAULT_MASK_CHAR: char = '*';

/// Replaces every non-overlapping match of `pattern` in `text` with `mask`.
///
/// The mask is inserted literally; `$` in the token is not a capture reference.
/// Text before, between and after matches is preserved. Returns
/// `Cow::Borrowed` when nothing matched.
pub fn mask_pattern<'a>(text: &'a str, pattern: &Regex, mask: &str) -> Cow<'a, str> {
    pattern.replace_all(text, NoExpand(mask))
}

/// Replaces every character at index `from <= i < to` with `mask_char`.
///
/// Indices count Unicode scalar values. The input is returned unchanged when
/// `from == 0`, `to < from`, or `to` exceeds the character count; the range
/// is never clamped.
pub fn mask_range(text: &str, from: usize, to: usize, mask_char: char) -> Cow<'_, str> {
    if from == 0 || to < from || to == from {
        return Cow::Borrowed(text);
    }
    let total = text.chars().count();
    if to > total {
        return Cow::Borrowed(text);
    }

    let masked = text
        .chars()
        .enumerate()
        .map(|(index, ch)| if (from..to).contains(&index) { mask_char } else { ch })
        .collect();
    Cow::Owned(masked)
}

/// Bounds for positional masking, derived from the length of each value.
///
/// The masked range for a value of `len` characters is
/// `from..(numerator * len / denominator)` using integer division. The
/// defaults (`2`, `2/3`) leave a two character prefix and roughly the last
/// third visible. This is an obfuscation for operators, not a security control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialMask {
    /// First masked index.
    pub from: usize,
    /// Numerator of the end-of-range ratio.
    pub numerator: usize,
    /// Denominator of the end-of-range ratio. Must be non-zero.
    pub denominator: usize,
    /// Symbol written over the masked range.
    pub mask_char: char,
}

impl PartialMask {
    /// Constructs bounds that mask `from..(numerator * len / denominator)`.
    #[must_use]
    pub fn new(from: usize, numerator: usize, denominator: usize) -> Self {
        Self {
            from,
            numerator,
            denominator,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Returns the half-open `(from, to)` range for a value of `len` characters.
    ///
    /// A zero denominator yields an empty range at `from`, which `mask_range`
    /// treats as a no-op.
    #[must_use]
    pub fn range_for(&self, len: usize) -> (usize, usize) {
        let to = self
            .numerator
            .saturating_mul(len)
            .checked_div(self.denominator)
            .unwrap_or(self.from);
        (self.from, to)
    }

    /// Applies the bounds to `text`.
    #[must_use]
    pub fn apply_to<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let (from, to) = self.range_for(text.chars().count());
        mask_range(text, from, to, self.mask_char)
    }
}

impl Default for PartialMask {
    fn default() -> Self {
        Self::new(2, 2, 3)
    }
}
