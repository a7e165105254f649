//! Equality generator.

use std::sync::Arc;

use super::{Generated, SynthesisInput};
use crate::{Instance, SynthResult};

/// Generated equality: same concrete class and pairwise-equal fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct EqMethod;

impl EqMethod {
    /// Compare two instances.
    #[must_use]
    pub fn equals(self, left: &Instance, right: &Instance) -> bool {
        Arc::ptr_eq(left.class(), right.class()) && left.values() == right.values()
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    Ok(input.options.eq.then_some(Generated::Eq(EqMethod)))
}
