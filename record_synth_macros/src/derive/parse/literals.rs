//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr, Token};

/// Parses a literal from an attribute using `extractor`.
///
/// `expected` names the literal kind in the error raised when the
/// extractor rejects it.
fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from an attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a flag written either bare (`frozen`) or as `frozen = bool`.
pub(crate) fn flag(meta: &ParseNestedMeta, key: &str) -> Result<bool, syn::Error> {
    if meta.input.peek(Token![=]) {
        parse_lit(meta, key, "bool", |lit| match lit {
            Lit::Bool(b) => Some(b.value),
            _ => None,
        })
    } else {
        Ok(true)
    }
}
