//! The compiled masker and the traits that route fields to it.
//!
//! - [`Masker`]: configuration compiled once (pattern, token, partial bounds)
//! - [`MaskText`]: types that *are* maskable text (`String`, `Option<String>`)
//! - [`MaskTarget`]: types that *contain* maskable text (records, lists)
//!
//! `#[derive(Masked)]` generates `MaskTarget` for records by calling
//! `MaskText::mask_pattern` / `MaskText::mask_partial` on annotated fields and
//! `MaskTarget::mask_with` on nested ones.

use std::borrow::Cow;

use regex::Regex;

use super::policy::{mask_pattern, mask_range, PartialMask};
use crate::{config::MaskingConfig, error::ConfigError};

// =============================================================================
// Masker - compiled configuration
// =============================================================================

/// Masking configuration compiled for use on the response path.
///
/// Built once from a [`MaskingConfig`]; immutable and shareable afterwards.
#[derive(Clone, Debug)]
pub struct Masker {
    /// Pattern and mask token. `None` when either is unset, which turns full
    /// masking into a no-op.
    full: Option<(Regex, String)>,
    partial: PartialMask,
}

impl Masker {
    /// Compiles `config`.
    ///
    /// A malformed sensitive pattern or a zero partial-mask denominator is the
    /// only failure this crate reports.
    pub fn new(config: &MaskingConfig) -> Result<Self, ConfigError> {
        if config.partial.denominator == 0 {
            return Err(ConfigError::InvalidPartialMask("denominator must be non-zero"));
        }

        let full = match (&config.sensitive_pattern, &config.mask_token) {
            (Some(pattern), Some(token)) => {
                let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                Some((regex, token.clone()))
            }
            _ => None,
        };

        Ok(Self {
            full,
            partial: config.partial,
        })
    }

    /// Returns `true` when full masking is configured.
    pub fn has_pattern(&self) -> bool {
        self.full.is_some()
    }

    /// Returns the positional masking bounds.
    pub fn partial(&self) -> &PartialMask {
        &self.partial
    }

    /// Replaces every sensitive-pattern match in `text` with the mask token.
    ///
    /// Returns `text` unchanged when nothing matches or the pattern is unset.
    pub fn mask_full<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.full {
            Some((pattern, token)) => mask_pattern(text, pattern, token),
            None => Cow::Borrowed(text),
        }
    }

    /// Masks characters `from..to` of `text` with the configured mask character.
    pub fn mask_partial<'a>(&self, text: &'a str, from: usize, to: usize) -> Cow<'a, str> {
        mask_range(text, from, to, self.partial.mask_char)
    }

    /// Masks `text` using the configured partial bounds for its length.
    pub fn mask_credential<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.partial.apply_to(text)
    }
}

// =============================================================================
// MaskText - values that ARE sensitive text
// =============================================================================

/// Text that can be masked in place.
///
/// Absent values (`None`) are left untouched, which is how "no input" is
/// expressed for the masking primitives.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not maskable text",
    label = "#[mask(pattern)] and #[mask(partial)] need a `MaskText` field",
    note = "use `String`, `Option<String>` or `Vec<String>`",
    note = "if `{Self}` is a record that derives `Masked`, use bare `#[mask]` to walk into it"
)]
pub trait MaskText {
    /// Applies full pattern masking.
    fn mask_pattern(&mut self, masker: &Masker);
    /// Applies positional masking using the masker's partial bounds.
    fn mask_partial(&mut self, masker: &Masker);
}

impl MaskText for String {
    fn mask_pattern(&mut self, masker: &Masker) {
        let masked = match masker.mask_full(self.as_str()) {
            Cow::Owned(masked) => masked,
            Cow::Borrowed(_) => return,
        };
        *self = masked;
    }

    fn mask_partial(&mut self, masker: &Masker) {
        let masked = match masker.mask_credential(self.as_str()) {
            Cow::Owned(masked) => masked,
            Cow::Borrowed(_) => return,
        };
        *self = masked;
    }
}

impl<T> MaskText for Option<T>
where
    T: MaskText,
{
    fn mask_pattern(&mut self, masker: &Masker) {
        if let Some(value) = self {
            value.mask_pattern(masker);
        }
    }

    fn mask_partial(&mut self, masker: &Masker) {
        if let Some(value) = self {
            value.mask_partial(masker);
        }
    }
}

impl<T> MaskText for Vec<T>
where
    T: MaskText,
{
    fn mask_pattern(&mut self, masker: &Masker) {
        for value in self {
            value.mask_pattern(masker);
        }
    }

    fn mask_partial(&mut self, masker: &Masker) {
        for value in self {
            value.mask_partial(masker);
        }
    }
}

// =============================================================================
// MaskTarget - values that CONTAIN sensitive text
// =============================================================================

/// A value whose sensitive fields can be masked in place.
///
/// Implemented by `#[derive(Masked)]` for records and here for the containers
/// they are delivered in. Containers visit every element exactly once, in
/// order, and never add, drop or reorder elements.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `MaskTarget`",
    label = "this type cannot be walked for sensitive fields",
    note = "use `#[derive(Masked)]` on the type definition",
    note = "or use `#[mask(pattern)]` / `#[mask(partial)]` if this is a text value"
)]
pub trait MaskTarget {
    /// Masks every annotated field reachable from `self`.
    fn mask_with(&mut self, masker: &Masker);
}

impl<T> MaskTarget for [T]
where
    T: MaskTarget,
{
    fn mask_with(&mut self, masker: &Masker) {
        for value in self {
            value.mask_with(masker);
        }
    }
}

impl<T> MaskTarget for Vec<T>
where
    T: MaskTarget,
{
    fn mask_with(&mut self, masker: &Masker) {
        self.as_mut_slice().mask_with(masker);
    }
}

impl<T> MaskTarget for Option<T>
where
    T: MaskTarget,
{
    fn mask_with(&mut self, masker: &Masker) {
        if let Some(value) = self {
            value.mask_with(masker);
        }
    }
}

impl<T> MaskTarget for Box<T>
where
    T: MaskTarget + ?Sized,
{
    fn mask_with(&mut self, masker: &Masker) {
        (**self).mask_with(masker);
    }
}
