//! Tests for `#[dataclass(...)]` attribute parsing.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::{parse_field_attrs, parse_input, parse_struct_attrs};

fn flags_of(input: &DeriveInput) -> Result<Vec<(String, bool)>> {
    let attrs = parse_struct_attrs(&input.attrs).map_err(|e| anyhow!(e.to_string()))?;
    Ok(attrs
        .flags
        .into_iter()
        .map(|(ident, on)| (ident.to_string(), on))
        .collect())
}

#[rstest]
fn bare_and_explicit_flags_are_recorded() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[dataclass(frozen, order = true, repr = false)]
        struct Point { x: i64 }
    };
    let flags = flags_of(&input)?;
    ensure!(
        flags
            == [
                ("frozen".to_owned(), true),
                ("order".to_owned(), true),
                ("repr".to_owned(), false),
            ],
        "unexpected flags: {flags:?}"
    );
    Ok(())
}

#[rstest]
fn repeated_flag_keeps_last_value() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[dataclass(eq)]
        #[dataclass(eq = false)]
        struct Point { x: i64 }
    };
    let flags = flags_of(&input)?;
    ensure!(flags == [("eq".to_owned(), false)], "unexpected flags: {flags:?}");
    Ok(())
}

#[rstest]
fn bases_name_and_crate_are_parsed() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[dataclass(base = shapes::Shape, base = Tagged, name = "Point2D", crate = "synth")]
        struct Point { x: i64 }
    };
    let attrs = parse_struct_attrs(&input.attrs).map_err(|e| anyhow!(e.to_string()))?;
    let bases: Vec<String> = attrs
        .bases
        .iter()
        .map(|path| quote::quote!(#path).to_string())
        .collect();
    ensure!(
        bases == ["shapes :: Shape", "Tagged"],
        "unexpected bases: {bases:?}"
    );
    ensure!(attrs.name.as_deref() == Some("Point2D"), "name not parsed");
    ensure!(attrs.crate_path.is_some(), "crate path not parsed");
    Ok(())
}

#[rstest]
#[case::unknown_key(parse_quote!(#[dataclass(frozzen)]), "unknown dataclass option `frozzen`")]
#[case::non_bool(parse_quote!(#[dataclass(order = "yes")]), "order must be a bool")]
#[case::non_string_name(parse_quote!(#[dataclass(name = 3)]), "name must be a string")]
fn invalid_struct_attrs_are_rejected(
    #[case] attr: syn::Attribute,
    #[case] expected: &str,
) -> Result<()> {
    let Err(err) = parse_struct_attrs(&[attr]) else {
        return Err(anyhow!("expected `{expected}`"));
    };
    ensure!(err.to_string() == expected, "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn field_default_and_type_tag_are_parsed() -> Result<()> {
    let field: syn::Field = parse_quote! {
        #[dataclass(default = 3, type_tag = "int")]
        x: i64
    };
    let attrs = parse_field_attrs(&field.attrs).map_err(|e| anyhow!(e.to_string()))?;
    ensure!(attrs.default.is_some(), "default not parsed");
    ensure!(attrs.factory.is_none(), "factory unexpectedly set");
    ensure!(attrs.type_tag.as_deref() == Some("int"), "type tag not parsed");
    Ok(())
}

#[rstest]
#[case::default_then_factory(parse_quote!(#[dataclass(default = 1, factory = make)]))]
#[case::factory_then_default(parse_quote!(#[dataclass(factory = make, default = 1)]))]
fn default_and_factory_are_exclusive(#[case] attr: syn::Attribute) -> Result<()> {
    let Err(err) = parse_field_attrs(&[attr]) else {
        return Err(anyhow!("expected exclusivity error"));
    };
    ensure!(
        err.to_string() == "`default` and `factory` are mutually exclusive",
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn unrelated_attributes_are_ignored() -> Result<()> {
    let field: syn::Field = parse_quote! {
        #[serde(rename = "other")]
        x: i64
    };
    let attrs = parse_field_attrs(&field.attrs).map_err(|e| anyhow!(e.to_string()))?;
    ensure!(attrs.default.is_none() && attrs.type_tag.is_none(), "nothing should parse");
    Ok(())
}

#[rstest]
fn raw_identifiers_lose_their_prefix() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Keyword { r#type: String, value: i64 }
    };
    let declaration = parse_input(&input).map_err(|e| anyhow!(e.to_string()))?;
    let names: Vec<&str> = declaration.fields.iter().map(|f| f.name.as_str()).collect();
    ensure!(names == ["type", "value"], "unexpected names: {names:?}");
    Ok(())
}

#[rstest]
#[case::tuple(parse_quote!(struct Pair(i64, i64);), "DataClass requires named fields")]
#[case::unit(parse_quote!(struct Unit;), "DataClass requires named fields")]
#[case::enumeration(
    parse_quote!(enum Shape { Circle }),
    "DataClass can only be derived for structs"
)]
#[case::generic(
    parse_quote!(struct Boxed<T> { inner: T }),
    "DataClass cannot be derived for generic structs"
)]
fn unsupported_inputs_are_rejected(#[case] input: DeriveInput, #[case] expected: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected `{expected}`"));
    };
    ensure!(err.to_string() == expected, "unexpected error: {err}");
    Ok(())
}
