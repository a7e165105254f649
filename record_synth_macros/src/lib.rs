//! Procedural macros for `record_synth`.
//!
//! [`DataClass`] declares a data class from a Rust struct: each named field
//! becomes an annotated field of the class body, and `#[dataclass(...)]`
//! attributes supply options, bases and defaults. The generated
//! `DeclaredClass` implementation synthesizes the class once and hands out
//! the shared result on every later call.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `record_synth::DeclaredClass` for a struct with named fields.
///
/// Struct attributes:
///
/// - the option flags `init`, `repr`, `eq`, `frozen`, `order`,
///   `unsafe_hash`, `match_args`, `kw_only`, `kwargs`, `slots`, `iter` and
///   `hide_internals`, written bare or as `flag = bool`;
/// - `base = Path`, repeatable, naming another `DeclaredClass` to inherit;
/// - `name = "..."` to rename the class;
/// - `crate = "..."` when `record_synth` is imported under another name.
///
/// Field attributes: `default = expr`, `factory = path` and
/// `type_tag = "..."`.
#[proc_macro_derive(DataClass, attributes(dataclass))]
pub fn derive_data_class(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
