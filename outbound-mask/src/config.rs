//! Masking configuration.
//!
//! The sensitive pattern, mask token and partial-mask bounds are read once at
//! startup and compiled into a [`crate::Masker`]. There is no runtime
//! reconfiguration; build a new masker instead.

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    masking::{PartialMask, DEFAULT_MASK_TOKEN, DEFAULT_SENSITIVE_PATTERN},
};

/// Static masking configuration.
///
/// `Default` reproduces the built-in constants. Setting either
/// `sensitive_pattern` or `mask_token` to `None` disables full masking, while
/// positional masking keeps working.
///
/// ```rust
/// use outbound_mask::MaskingConfig;
///
/// let config = MaskingConfig::from_json_str(r#"{ "mask_token": "'password'='<hidden>'" }"#)
///     .unwrap();
/// assert_eq!(config.mask_token.as_deref(), Some("'password'='<hidden>'"));
/// assert!(config.sensitive_pattern.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// Regular expression matching a credential assignment.
    pub sensitive_pattern: Option<String>,
    /// Replacement for every pattern match, inserted literally.
    pub mask_token: Option<String>,
    /// Bounds for positional masking of credential fields.
    pub partial: PartialMask,
}

impl MaskingConfig {
    /// Parses a JSON configuration document. Missing keys take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Replaces the sensitive pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.sensitive_pattern = Some(pattern.into());
        self
    }

    /// Replaces the mask token.
    #[must_use]
    pub fn with_mask_token(mut self, token: impl Into<String>) -> Self {
        self.mask_token = Some(token.into());
        self
    }

    /// Replaces the partial-mask bounds.
    #[must_use]
    pub fn with_partial(mut self, partial: PartialMask) -> Self {
        self.partial = partial;
        self
    }
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            sensitive_pattern: Some(DEFAULT_SENSITIVE_PATTERN.to_string()),
            mask_token: Some(DEFAULT_MASK_TOKEN.to_string()),
            partial: PartialMask::default(),
        }
    }
}
