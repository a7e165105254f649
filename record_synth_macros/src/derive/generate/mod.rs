//! Token generation for `#[derive(DataClass)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use super::crate_path;
use super::parse::{Declaration, DeclaredField};


/// Render `ty` as a compact type tag, e.g. `Vec<String>`.
///
/// Token spacing is dropped except between two identifier characters.
pub(crate) fn type_tag_text(ty: &syn::Type) -> String {
    let spaced = quote!(#ty).to_string();
    let mut out = String::with_capacity(spaced.len());
    let mut chars = spaced.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let before = out.chars().next_back().is_some_and(is_ident_char);
            let after = chars.peek().copied().is_some_and(is_ident_char);
            if before && after {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn field_tokens(field: &DeclaredField, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;
    let type_tag = field
        .attrs
        .type_tag
        .clone()
        .unwrap_or_else(|| type_tag_text(ty));
    let annotate = quote! { body.annotate(#name, #type_tag); };
    let default = if let Some(expr) = &field.attrs.default {
        quote! {
            body.assign(#name, {
                let value: #ty = #expr;
                #krate::Value::from(value)
            });
        }
    } else if let Some(factory) = &field.attrs.factory {
        quote! {
            body.assign_factory(#name, || {
                let value: #ty = #factory();
                #krate::Value::from(value)
            });
        }
    } else {
        TokenStream::new()
    };
    quote! { #annotate #default }
}

/// Generate the `DeclaredClass` implementation for `declaration`.
pub(crate) fn declared_class_impl(declaration: &Declaration) -> TokenStream {
    let attrs = &declaration.attrs;
    let krate = crate_path::resolve(attrs.crate_path.as_ref());
    let ident = &declaration.ident;
    let class_name = attrs
        .name
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());
    let bases = attrs.bases.iter().map(|base| {
        quote! { body.inherit(<#base as #krate::DeclaredClass>::data_class()?); }
    });
    let fields = declaration
        .fields
        .iter()
        .map(|field| field_tokens(field, &krate));
    let flags = attrs.flags.iter().map(|(flag, on)| quote! { .#flag(#on) });

    quote! {
        impl #krate::DeclaredClass for #ident {
            fn class_body() -> #krate::SynthResult<#krate::ClassBody> {
                let mut body = #krate::ClassBody::new(#class_name);
                #( #bases )*
                #( #fields )*
                ::core::result::Result::Ok(body)
            }

            fn options() -> #krate::OptionOverrides {
                #krate::OptionOverrides::new() #( #flags )*
            }

            fn data_class() -> #krate::SynthResult<::std::sync::Arc<#krate::Class>> {
                static CLASS: ::std::sync::OnceLock<
                    #krate::SynthResult<::std::sync::Arc<#krate::Class>>,
                > = ::std::sync::OnceLock::new();
                CLASS
                    .get_or_init(|| {
                        let body = <Self as #krate::DeclaredClass>::class_body()?;
                        #krate::dataclass(body, &<Self as #krate::DeclaredClass>::options())
                    })
                    .clone()
            }
        }
    }
}
