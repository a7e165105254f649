//! Input parsing for the `DataClass` derive macro.
//!
//! Gathers the struct identifier, its fields and all attribute metadata in
//! one pass so expansion fails fast with a useful span.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::{Declaration, DeclaredField, parse_field_attrs, parse_struct_attrs};

/// Collect the declaration carried by `input`.
///
/// Enums, unions, tuple and unit structs are rejected, as are generic
/// structs: the synthesized class is shared by every use of the type.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<Declaration, syn::Error> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "DataClass cannot be derived for generic structs",
        ));
    }
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "DataClass requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &ident,
                "DataClass can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(field_ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "DataClass requires named fields"));
        };
        fields.push(DeclaredField {
            name: field_ident.unraw().to_string(),
            ty: field.ty.clone(),
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }
    Ok(Declaration {
        ident,
        attrs,
        fields,
    })
}
