//! Struct-specific `MaskTarget` derivation.
//!
//! This module generates in-place masking for struct fields and collects the
//! generic parameters that require trait bounds.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned, ToTokens};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    crate_path,
    generics::collect_generics_from_type,
    strategy::{parse_field_strategy, Strategy},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) mask_body: TokenStream,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) text_generics: Vec<Ident>,
    pub(crate) debug_masked_body: TokenStream,
    pub(crate) debug_masked_generics: Vec<Ident>,
    pub(crate) debug_unmasked_body: TokenStream,
    pub(crate) debug_unmasked_generics: Vec<Ident>,
}

#[derive(Default)]
struct Collected {
    transforms: Vec<TokenStream>,
    walked_generics: Vec<Ident>,
    text_generics: Vec<Ident>,
    debug_masked_fields: Vec<TokenStream>,
    debug_masked_generics: Vec<Ident>,
    debug_unmasked_fields: Vec<TokenStream>,
    debug_unmasked_generics: Vec<Ident>,
}

impl Collected {
    fn push_field(
        &mut self,
        generics: &syn::Generics,
        field: &syn::Field,
        member: &syn::Member,
    ) -> Result<()> {
        let span = field.span();
        let ty = &field.ty;
        let strategy = parse_field_strategy(&field.attrs)?;

        self.transforms.push(field_transform(member, span, strategy));

        match strategy {
            Strategy::PassThrough => {
                collect_generics_from_type(ty, generics, &mut self.debug_masked_generics);
            }
            Strategy::Walk => {
                collect_generics_from_type(ty, generics, &mut self.walked_generics);
                collect_generics_from_type(ty, generics, &mut self.debug_masked_generics);
            }
            Strategy::Pattern | Strategy::Partial => {
                collect_generics_from_type(ty, generics, &mut self.text_generics);
            }
        }
        collect_generics_from_type(ty, generics, &mut self.debug_unmasked_generics);

        let masked_value = if strategy.hides_value() {
            quote_spanned! { span => &"[MASKED]" }
        } else {
            quote_spanned! { span => &self.#member }
        };
        let unmasked_value = quote_spanned! { span => &self.#member };
        match member {
            syn::Member::Named(ident) => {
                self.debug_masked_fields.push(quote_spanned! { span =>
                    debug.field(stringify!(#ident), #masked_value);
                });
                self.debug_unmasked_fields.push(quote_spanned! { span =>
                    debug.field(stringify!(#ident), #unmasked_value);
                });
            }
            syn::Member::Unnamed(_) => {
                self.debug_masked_fields.push(quote_spanned! { span =>
                    debug.field(#masked_value);
                });
                self.debug_unmasked_fields.push(quote_spanned! { span =>
                    debug.field(#unmasked_value);
                });
            }
        }
        Ok(())
    }
}

/// Generates the masking statement for a single field.
///
/// | Annotation | Behavior |
/// |------------|----------|
/// | None | Nothing is emitted |
/// | `#[mask]` | `MaskTarget::mask_with` on the field |
/// | `#[mask(pattern)]` | `MaskText::mask_pattern` on the field |
/// | `#[mask(partial)]` | `MaskText::mask_partial` on the field |
fn field_transform(member: &syn::Member, span: Span, strategy: Strategy) -> TokenStream {
    let member = member.to_token_stream();
    match strategy {
        Strategy::PassThrough => quote! {},
        Strategy::Walk => {
            let target = crate_path("MaskTarget");
            quote_spanned! { span =>
                #target::mask_with(&mut self.#member, masker);
            }
        }
        Strategy::Pattern => {
            let text = crate_path("MaskText");
            quote_spanned! { span =>
                #text::mask_pattern(&mut self.#member, masker);
            }
        }
        Strategy::Partial => {
            let text = crate_path("MaskText");
            quote_spanned! { span =>
                #text::mask_partial(&mut self.#member, masker);
            }
        }
    }
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: &DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let mut collected = Collected::default();

    let (debug_open, named) = match &data.fields {
        Fields::Named(fields) => {
            for field in &fields.named {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
                collected.push_field(generics, field, &syn::Member::Named(ident))?;
            }
            (quote! { f.debug_struct(stringify!(#name)) }, true)
        }
        Fields::Unnamed(fields) => {
            for (index, field) in fields.unnamed.iter().enumerate() {
                let member = syn::Member::Unnamed(syn::Index::from(index));
                collected.push_field(generics, field, &member)?;
            }
            (quote! { f.debug_tuple(stringify!(#name)) }, false)
        }
        Fields::Unit => (quote! { f.debug_tuple(stringify!(#name)) }, false),
    };

    let Collected {
        transforms,
        walked_generics,
        text_generics,
        debug_masked_fields,
        debug_masked_generics,
        debug_unmasked_fields,
        debug_unmasked_generics,
    } = collected;

    let debug_body = |fields: &[TokenStream]| {
        if named || !fields.is_empty() {
            quote! {
                let mut debug = #debug_open;
                #(#fields)*
                debug.finish()
            }
        } else {
            quote! { f.write_str(stringify!(#name)) }
        }
    };

    Ok(StructDeriveOutput {
        mask_body: quote! { #(#transforms)* },
        walked_generics,
        text_generics,
        debug_masked_body: debug_body(&debug_masked_fields),
        debug_masked_generics,
        debug_unmasked_body: debug_body(&debug_unmasked_fields),
        debug_unmasked_generics,
    })
}
