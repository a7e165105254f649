//! Parsing of `#[dataclass(...)]` attributes.
//!
//! Unknown keys are rejected rather than ignored: a misspelt option would
//! otherwise silently synthesize a different class.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr};

mod input;
mod literals;
#[cfg(test)]
mod tests;

pub(crate) use input::parse_input;
use literals::{flag, lit_str};

/// Option flags accepted on the struct, in the order the runtime lists them.
pub(crate) const OPTION_FLAGS: [&str; 12] = [
    "init",
    "repr",
    "eq",
    "frozen",
    "order",
    "unsafe_hash",
    "match_args",
    "kw_only",
    "kwargs",
    "slots",
    "iter",
    "hide_internals",
];

/// A struct declaring a data class.
pub(crate) struct Declaration {
    pub ident: syn::Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<DeclaredField>,
}

/// One named field of the declaring struct.
pub(crate) struct DeclaredField {
    pub name: String,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

/// Struct-level `#[dataclass(...)]` metadata.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Option flags in the order written; a repeated flag keeps its last value.
    pub flags: Vec<(syn::Ident, bool)>,
    pub bases: Vec<syn::Path>,
    pub name: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[dataclass(...)]` metadata.
///
/// - `default` supplies an expression of the field's type.
/// - `factory` names a function producing a fresh default per instance.
/// - `type_tag` replaces the tag derived from the field's Rust type.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub default: Option<Expr>,
    pub factory: Option<syn::Path>,
    pub type_tag: Option<String>,
}

/// Iterate all `#[dataclass(...)]` attributes once and apply a callback.
fn parse_dataclass<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("dataclass")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn key_of(meta: &ParseNestedMeta) -> Option<String> {
    meta.path.get_ident().map(ToString::to_string)
}

fn parse_path(meta: &ParseNestedMeta, key: &str) -> syn::Result<syn::Path> {
    let s = lit_str(meta, key)?;
    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))
}

/// Extracts `#[dataclass(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_dataclass(attrs, |meta| {
        let key = key_of(meta);
        match key.as_deref() {
            Some("base") => {
                out.bases.push(meta.value()?.parse()?);
                Ok(())
            }
            Some("name") => {
                out.name = Some(lit_str(meta, "name")?.value());
                Ok(())
            }
            Some("crate") => {
                out.crate_path = Some(parse_path(meta, "crate")?);
                Ok(())
            }
            Some(option) if OPTION_FLAGS.contains(&option) => {
                let value = flag(meta, option)?;
                let ident = meta.path.require_ident()?.clone();
                out.flags.retain(|(seen, _)| *seen != ident);
                out.flags.push((ident, value));
                Ok(())
            }
            Some(other) => Err(meta.error(format!("unknown dataclass option `{other}`"))),
            None => Err(meta.error("expected a dataclass option name")),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[dataclass(...)]` attributes.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_dataclass(attrs, |meta| {
        let key = key_of(meta);
        match key.as_deref() {
            Some("default") => {
                if out.factory.is_some() {
                    return Err(meta.error("`default` and `factory` are mutually exclusive"));
                }
                out.default = Some(meta.value()?.parse()?);
                Ok(())
            }
            Some("factory") => {
                if out.default.is_some() {
                    return Err(meta.error("`default` and `factory` are mutually exclusive"));
                }
                out.factory = Some(meta.value()?.parse()?);
                Ok(())
            }
            Some("type_tag") => {
                out.type_tag = Some(lit_str(meta, "type_tag")?.value());
                Ok(())
            }
            Some(other) => Err(meta.error(format!("unknown dataclass field option `{other}`"))),
            None => Err(meta.error("expected a dataclass field option name")),
        }
    })?;
    Ok(out)
}
