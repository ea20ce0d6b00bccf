//! Response sanitization for outbound API payloads.
//!
//! This crate separates:
//! - **Classification**: which known payload a response carries.
//! - **Masking**: which fields of that payload are sensitive, and how they are
//!   masked (full pattern substitution or positional masking).
//!
//! A [`ResponseInterceptor`] sits between the handlers that build responses and
//! the transport layer that serializes them. Call
//! [`ResponseInterceptor::process`] on each outbound [`ResponseEnvelope`], or
//! wrap a handler with [`ResponseInterceptor::guard`].
//!
//! Key rules:
//! - Use `#[mask(pattern)]` for text that may embed `'password'='...'` assignments.
//! - Use `#[mask(partial)]` for credentials that should stay recognizable.
//! - Use `#[mask]` to walk into nested records.
//! - Unannotated fields pass through unchanged.
//! - `Debug` prints `"[MASKED]"` for annotated fields outside of tests.
//!
//! What this crate does:
//! - compiles a [`MaskingConfig`] into a [`Masker`]
//! - classifies type-erased payloads into a closed [`PayloadKind`]
//! - masks string fields in place
//!
//! What it does not do:
//! - decide what counts as sensitive beyond the configured pattern
//! - encrypt or securely erase data
//! - touch request bodies
//!
//! The `Masked` derive macro lives in `outbound-mask-derive` and is re-exported.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use outbound_mask_derive::Masked;

#[allow(unused_extern_crates)]
extern crate self as outbound_mask;

// Module declarations
mod classify;
mod config;
mod envelope;
mod error;
mod interceptor;
mod masking;
mod model;
mod redact;
pub mod slog;

// Re-exports
pub use classify::{classify, PayloadKind};
pub use config::MaskingConfig;
pub use envelope::{
    ApiResult, Payload, ProTableResult, ResponseEnvelope, CODE_ERROR, CODE_SUCCESS,
};
pub use error::ConfigError;
pub use interceptor::ResponseInterceptor;
pub use masking::{
    mask_pattern, mask_range, MaskTarget, MaskText, Masker, PartialMask, DEFAULT_MASK_CHAR,
    DEFAULT_MASK_TOKEN, DEFAULT_SENSITIVE_PATTERN,
};
pub use model::{DataBase, ExplainResult, History, JobInfoDetail, SqlExplainResult};
pub use redact::redact;
