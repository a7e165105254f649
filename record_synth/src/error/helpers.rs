//! Helpers for classifying errors by the phase that raised them.

use super::SynthError;

/// Returns `true` when `err` was raised while synthesizing a class rather
/// than while operating on an instance of an already-sealed class.
///
/// An aggregate counts as a synthesis error when every member does; the
/// pipeline only aggregates validation failures.
#[must_use]
pub fn is_synthesis_error(err: &SynthError) -> bool {
    match err {
        SynthError::Schema { .. }
        | SynthError::LayoutConflict { .. }
        | SynthError::Configuration { .. }
        | SynthError::OptionsDocument { .. } => true,
        SynthError::Aggregate(errors) => errors.iter().all(is_synthesis_error),
        _ => false,
    }
}
