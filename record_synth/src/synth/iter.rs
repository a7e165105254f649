//! Iteration generator.

use super::{Generated, SynthesisInput};
use crate::{Instance, SynthResult, Value};

/// Generated iteration over field values in resolution order.
#[derive(Clone, Copy, Debug, Default)]
pub struct IterMethod;

impl IterMethod {
    /// Iterate the field values of `instance`.
    pub fn iter(self, instance: &Instance) -> std::slice::Iter<'_, Value> {
        instance.values().iter()
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    Ok(input.options.iter.then_some(Generated::Iter(IterMethod)))
}
