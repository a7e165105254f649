//! Steps that construct and inspect instances.

use anyhow::{Context, Result, anyhow, ensure};
use record_synth::{Arguments, SynthError};
use rstest_bdd_macros::{then, when};

use super::helpers::{current_class, recorded_error};
use crate::fixtures::SynthContext;

fn construct(synth_context: &SynthContext, args: Arguments) -> Result<()> {
    let class = current_class(synth_context)?;
    match class.construct(args) {
        Ok(instance) => synth_context.instance.set(instance),
        Err(err) => synth_context.error.set(err),
    }
    Ok(())
}

#[when("an instance is constructed with arguments {args}")]
fn constructed_with_arguments(synth_context: &SynthContext, args: String) -> Result<()> {
    let mut arguments = Arguments::new();
    for arg in args.split(',').map(str::trim) {
        let value: i64 = arg
            .parse()
            .with_context(|| format!("argument {arg} is not an integer"))?;
        arguments = arguments.arg(value);
    }
    construct(synth_context, arguments)
}

#[when("an instance is constructed with no arguments")]
fn constructed_without_arguments(synth_context: &SynthContext) -> Result<()> {
    construct(synth_context, Arguments::new())
}

#[when("field {field} is assigned {value:i64}")]
fn field_assigned(synth_context: &SynthContext, field: String, value: i64) -> Result<()> {
    let mut instance = synth_context
        .instance
        .take()
        .ok_or_else(|| anyhow!("no instance has been constructed"))?;
    if let Err(err) = instance.set(&field, value) {
        synth_context.error.set(err);
    }
    synth_context.instance.set(instance);
    Ok(())
}

#[then("the representation is {expected}")]
fn representation_is(synth_context: &SynthContext, expected: String) -> Result<()> {
    let repr = synth_context
        .instance
        .with_ref(ToString::to_string)
        .ok_or_else(|| anyhow!("no instance has been constructed"))?;
    ensure!(repr == expected, "unexpected representation {repr}");
    Ok(())
}

#[then("construction fails with {message}")]
fn construction_fails(synth_context: &SynthContext, message: String) -> Result<()> {
    let err = recorded_error(synth_context)?;
    ensure!(err.to_string() == message, "unexpected error {err}");
    ensure!(synth_context.instance.is_empty(), "no instance may be produced");
    Ok(())
}

#[then("the assignment fails with an immutability error")]
fn assignment_fails(synth_context: &SynthContext) -> Result<()> {
    let err = recorded_error(synth_context)?;
    ensure!(
        matches!(err.as_ref(), SynthError::ImmutableField { .. }),
        "unexpected error {err}"
    );
    Ok(())
}

#[then("equal instances share a hash")]
fn equal_instances_share_hash(synth_context: &SynthContext) -> Result<()> {
    let class = current_class(synth_context)?;
    let a = class.construct(Arguments::new().arg(1))?;
    let b = class.construct(Arguments::new().arg(1))?;
    ensure!(a.equals(&b), "instances must be equal");
    ensure!(a.hash_value()? == b.hash_value()?, "equal instances must hash alike");
    Ok(())
}

#[then("instances are unhashable")]
fn instances_are_unhashable(synth_context: &SynthContext) -> Result<()> {
    let class = current_class(synth_context)?;
    let instance = class.construct(Arguments::new().arg(1))?;
    let err = instance
        .hash_value()
        .err()
        .ok_or_else(|| anyhow!("instance unexpectedly hashable"))?;
    ensure!(
        matches!(err.as_ref(), SynthError::Unhashable { .. }),
        "unexpected error {err}"
    );
    Ok(())
}
