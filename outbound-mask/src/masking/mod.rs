//! Masking primitives, the compiled masker, and traversal traits.
//!
//! - **`policy`**: pure string transformations (`mask_pattern`, `mask_range`,
//!   `PartialMask`)
//! - **`target`**: the `Masker` built from configuration, plus the `MaskText`
//!   and `MaskTarget` traits that `#[derive(Masked)]` targets

mod policy;
mod target;

pub use policy::{
    mask_pattern, mask_range, PartialMask, DEFAULT_MASK_CHAR, DEFAULT_MASK_TOKEN,
    DEFAULT_SENSITIVE_PATTERN,
};
pub use target::{MaskTarget, MaskText, Masker};
