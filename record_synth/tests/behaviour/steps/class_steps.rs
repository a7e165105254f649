//! Steps that declare and synthesize classes.

use anyhow::{Result, anyhow, ensure};
use record_synth::{SynthError, Value};
use rstest_bdd_macros::{given, then, when};

use super::helpers::{current_class, recorded_error, synthesize};
use crate::fixtures::{Declaration, SynthContext};

fn add_field(
    synth_context: &SynthContext,
    field: String,
    type_tag: &str,
    default: Option<Value>,
) -> Result<()> {
    let mut declaration = synth_context
        .declaration
        .take()
        .ok_or_else(|| anyhow!("no class is being declared"))?;
    declaration.fields.push((field, type_tag.to_owned(), default));
    synth_context.declaration.set(declaration);
    Ok(())
}

#[given("a class named {name}")]
fn class_named(synth_context: &SynthContext, name: String) {
    synth_context.declaration.set(Declaration::named(&name));
}

#[given("a subclass named {name} of {base}")]
fn subclass_named(synth_context: &SynthContext, name: String, base: String) -> Result<()> {
    let base_class = synth_context
        .classes
        .with_ref(|classes| classes.get(&base).cloned())
        .flatten()
        .ok_or_else(|| anyhow!("base {base} has not been synthesized"))?;
    let mut declaration = Declaration::named(&name);
    declaration.bases.push(base_class);
    synth_context.declaration.set(declaration);
    Ok(())
}

#[given("a required field {field} of type {type_tag}")]
fn required_field(synth_context: &SynthContext, field: String, type_tag: String) -> Result<()> {
    add_field(synth_context, field, &type_tag, None)
}

#[given("a field {field} of type {type_tag} defaulting to {value:i64}")]
fn defaulted_field(
    synth_context: &SynthContext,
    field: String,
    type_tag: String,
    value: i64,
) -> Result<()> {
    add_field(synth_context, field, &type_tag, Some(Value::Int(value)))
}

#[given("a text field {field} defaulting to {value}")]
fn text_field(synth_context: &SynthContext, field: String, value: String) -> Result<()> {
    add_field(synth_context, field, "str", Some(Value::Str(value)))
}

#[given("the class is declared as a base with default options")]
fn base_with_defaults(synth_context: &SynthContext) -> Result<()> {
    synthesize(synth_context, "")?.map_err(|err| anyhow!("base failed: {err}"))?;
    Ok(())
}

#[given("the class is declared as a base with options {options}")]
fn base_with_options(synth_context: &SynthContext, options: String) -> Result<()> {
    synthesize(synth_context, &options)?.map_err(|err| anyhow!("base failed: {err}"))?;
    Ok(())
}

fn synthesize_recording(synth_context: &SynthContext, options: &str) -> Result<()> {
    if let Err(err) = synthesize(synth_context, options)? {
        synth_context.error.set(err);
    }
    Ok(())
}

#[when("the class is synthesized with default options")]
fn synthesized_with_defaults(synth_context: &SynthContext) -> Result<()> {
    synthesize_recording(synth_context, "")
}

#[when("the class is synthesized with options {options}")]
fn synthesized_with_options(synth_context: &SynthContext, options: String) -> Result<()> {
    synthesize_recording(synth_context, &options)
}

#[then("synthesis fails with a configuration error")]
fn fails_with_configuration_error(synth_context: &SynthContext) -> Result<()> {
    let err = recorded_error(synth_context)?;
    ensure!(
        matches!(err.as_ref(), SynthError::Configuration { .. }),
        "unexpected error {err}"
    );
    ensure!(synth_context.class.is_empty(), "no class may be produced");
    Ok(())
}

#[then("synthesis fails with an option document error")]
fn fails_with_document_error(synth_context: &SynthContext) -> Result<()> {
    let err = recorded_error(synth_context)?;
    ensure!(
        matches!(err.as_ref(), SynthError::OptionsDocument { .. }),
        "unexpected error {err}"
    );
    Ok(())
}

#[then("the field names are {names}")]
fn field_names_are(synth_context: &SynthContext, names: String) -> Result<()> {
    let class = current_class(synth_context)?;
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    let actual = class.field_names();
    ensure!(actual == expected, "unexpected fields {actual:?}");
    Ok(())
}
