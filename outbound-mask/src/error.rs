//! Configuration errors.
//!
//! Masking itself never fails; the only hard failure is a configuration that
//! cannot be compiled when the masker is built.

use thiserror::Error;

/// Errors raised while loading or compiling a [`crate::MaskingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sensitive pattern is not a valid regular expression.
    #[error("invalid sensitive pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The partial-mask bounds cannot produce a range.
    #[error("invalid partial mask: {0}")]
    InvalidPartialMask(&'static str),

    /// The configuration document could not be parsed.
    #[error("failed to parse masking config: {0}")]
    Parse(#[from] serde_json::Error),
}
