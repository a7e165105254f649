//! Expansion of `#[derive(DataClass)]`.

use proc_macro2::TokenStream;

mod crate_path;
mod generate;
mod parse;

/// Parse `input` and produce the `DeclaredClass` implementation.
pub(crate) fn expand(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let declaration = parse::parse_input(input)?;
    Ok(generate::declared_class_impl(&declaration))
}
