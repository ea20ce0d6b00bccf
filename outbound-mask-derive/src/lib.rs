//! Derive macros for `outbound-mask`.
//!
//! This crate generates the in-place masking code behind `#[derive(Masked)]`. It:
//! - reads `#[mask(...)]` field attributes
//! - emits a `MaskTarget` implementation that hands each annotated field to the
//!   runtime `Masker`
//!
//! It does **not** compile patterns or decide what the mask looks like. Those
//! live in the main `outbound-mask` crate and are applied at runtime.

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
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_struct;
mod generics;
mod strategy;
use derive_struct::derive_struct;
use generics::add_bounds;

/// Derives `outbound_mask::MaskTarget` (and a masking-aware `Debug`) for structs.
///
/// `#[mask]` is a field attribute only; placing it on the struct is an error.
///
/// # Field Attributes
///
/// - **No annotation**: the field is never touched. Identifiers, timestamps and
///   external types pass through as-is.
///
/// - `#[mask]`: the field is a nested `MaskTarget` (a record deriving `Masked`,
///   or an `Option`/`Vec`/`Box` of one) and is walked.
///
/// - `#[mask(pattern)]`: every occurrence of the configured sensitive pattern in
///   the text is replaced by the mask token. The field type must implement
///   `MaskText` (`String`, `Option<String>`, `Vec<String>`, ...).
///
/// - `#[mask(partial)]`: a positional character range of the text is replaced by
///   the mask character, using the `PartialMask` bounds of the masker.
///
/// Enums and unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `Debug`: when *not* building with `cfg(any(test, feature = "testing"))`,
///   `pattern` and `partial` fields are formatted as `"[MASKED]"` rather than
///   their values. Walked fields use their own `Debug`.
#[proc_macro_derive(Masked, attributes(mask))]
pub fn derive_masked(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the outbound-mask crate root.
///
/// Handles crate renaming (e.g., `mask = { package = "outbound-mask", ... }`)
/// and internal usage (when the derive is used inside outbound-mask itself).
fn crate_root() -> TokenStream {
    match crate_name("outbound-mask") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::outbound_mask },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

/// Masking is chosen per field; a struct-level `#[mask]` has no meaning.
fn reject_container_attrs(attrs: &[syn::Attribute]) -> Result<()> {
    match attrs.iter().find(|attr| attr.path().is_ident("mask")) {
        Some(attr) => Err(syn::Error::new_spanned(
            attr,
            "#[mask] is a field attribute; annotate the fields to mask instead",
        )),
        None => Ok(()),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    reject_container_attrs(&attrs)?;

    let output = match &data {
        Data::Struct(data) => derive_struct(&ident, data, &generics)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Masked` can only be derived for structs",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Masked` cannot be derived for unions",
            ));
        }
    };

    let target_path = crate_path("MaskTarget");
    let text_path = crate_path("MaskText");
    let masker_path = crate_path("Masker");
    let debug_path = quote! { ::core::fmt::Debug };

    let mask_generics = add_bounds(generics.clone(), &output.walked_generics, &target_path);
    let mask_generics = add_bounds(mask_generics, &output.text_generics, &text_path);
    let (impl_generics, ty_generics, where_clause) = mask_generics.split_for_impl();

    let debug_masked_generics =
        add_bounds(generics.clone(), &output.debug_masked_generics, &debug_path);
    let (masked_impl_generics, masked_ty_generics, masked_where_clause) =
        debug_masked_generics.split_for_impl();
    let debug_unmasked_generics =
        add_bounds(generics.clone(), &output.debug_unmasked_generics, &debug_path);
    let (unmasked_impl_generics, unmasked_ty_generics, unmasked_where_clause) =
        debug_unmasked_generics.split_for_impl();

    let mask_body = &output.mask_body;
    let debug_masked_body = &output.debug_masked_body;
    let debug_unmasked_body = &output.debug_unmasked_body;

    let debug_impl = quote! {
        #[cfg(any(test, feature = "testing"))]
        impl #unmasked_impl_generics ::core::fmt::Debug for #ident #unmasked_ty_generics #unmasked_where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #debug_unmasked_body
            }
        }

        #[cfg(not(any(test, feature = "testing")))]
        impl #masked_impl_generics ::core::fmt::Debug for #ident #masked_ty_generics #masked_where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #debug_masked_body
            }
        }
    };

    Ok(quote! {
        impl #impl_generics #target_path for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn mask_with(&mut self, masker: &#masker_path) {
                #mask_body
            }
        }

        #debug_impl
    })
}
