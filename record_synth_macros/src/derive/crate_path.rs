//! Crate path resolution for dependency aliasing.
//!
//! Converts the optional `#[dataclass(crate = "...")]` value into the path
//! generated code uses in place of `record_synth::`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path, defaulting to `::record_synth`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::record_synth }, |path| quote! { #path })
}
