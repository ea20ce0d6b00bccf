//! Parsing of `#[mask(...)]` field attributes.
//!
//! This module maps attribute syntax to masking decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// Field masking strategy based on `#[mask(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `PassThrough` | Field is left untouched |
/// | `#[mask]` | `Walk` | Walk into a nested `MaskTarget` |
/// | `#[mask(pattern)]` | `Pattern` | Replace every sensitive-pattern match |
/// | `#[mask(partial)]` | `Partial` | Mask a positional character range |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// No annotation: the field is never touched.
    PassThrough,
    /// Bare `#[mask]`: the field is itself a `MaskTarget` (record, list, option).
    Walk,
    /// `#[mask(pattern)]`: full regex substitution through `MaskText::mask_pattern`.
    Pattern,
    /// `#[mask(partial)]`: positional masking through `MaskText::mask_partial`.
    Partial,
}

impl Strategy {
    /// Whether the generated `Debug` prints `"[MASKED]"` in place of the value.
    ///
    /// Walked fields print through their own `Debug`, which masks in turn.
    pub(crate) fn hides_value(self) -> bool {
        matches!(self, Strategy::Pattern | Strategy::Partial)
    }
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[mask] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                set_strategy(&mut strategy, Strategy::Walk, attr.span())?;
            }
            Meta::List(list) => {
                let next = match syn::parse2::<syn::Ident>(list.tokens.clone()) {
                    Ok(ident) if ident == "pattern" => Strategy::Pattern,
                    Ok(ident) if ident == "partial" => Strategy::Partial,
                    _ => {
                        return Err(syn::Error::new(
                            attr.span(),
                            "expected a masking strategy: #[mask(pattern)] or #[mask(partial)]",
                        ));
                    }
                };
                set_strategy(&mut strategy, next, attr.span())?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::PassThrough))
}
