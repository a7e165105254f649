//! Reassignment guard for frozen classes.

use super::{Generated, SynthesisInput};
use crate::{SynthError, SynthResult};

/// Rejects assignment once construction has finished.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrozenGuard;

impl FrozenGuard {
    /// Check an assignment to `field` on an instance of `class`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ImmutableField`] when `sealed` is set.
    pub fn check(self, class: &str, field: &str, sealed: bool) -> SynthResult<()> {
        if sealed {
            return Err(SynthError::ImmutableField {
                class: class.to_owned(),
                field: field.to_owned(),
            }
            .into());
        }
        Ok(())
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    Ok(input.options.frozen.then_some(Generated::SetAttr(FrozenGuard)))
}
