//! Structural-match hint generator.

use super::{Generated, SynthesisInput};
use crate::SynthResult;

/// Ordered field names for positional destructuring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchArgs(Vec<String>);

impl MatchArgs {
    /// The field names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    if !input.options.match_args {
        return Ok(None);
    }
    let hide = input.options.hide_internals;
    let names = input
        .fields
        .iter()
        .filter(|field| !(hide && field.is_internal()))
        .map(|field| field.name().to_owned())
        .collect();
    Ok(Some(Generated::MatchArgs(MatchArgs(names))))
}
