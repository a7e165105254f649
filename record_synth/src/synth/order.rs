//! Ordering generator.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Generated, SynthesisInput};
use crate::value::compare_sequences;
use crate::{Instance, SynthError, SynthResult};

/// Generated ordering: lexicographic over the field tuple.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderMethod;

impl OrderMethod {
    /// Order `left` against `right` for operator `op`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ComparisonTypeMismatch`] when the instances
    /// belong to different classes or a field pair has no order.
    pub fn compare(self, left: &Instance, right: &Instance, op: &'static str) -> SynthResult<Ordering> {
        if !Arc::ptr_eq(left.class(), right.class()) {
            return Err(SynthError::comparison(op, left.class().name(), right.class().name()).into());
        }
        compare_sequences(left.values(), right.values(), op)
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    Ok(input.options.order.then_some(Generated::Order(OrderMethod)))
}
