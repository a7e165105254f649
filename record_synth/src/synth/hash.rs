//! Hash generator.

use std::hash::{Hash, Hasher};

use tracing::warn;

use super::{Generated, SynthesisInput};
use crate::options::HashMode;
use crate::{Instance, SynthResult};

/// Generated hash behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashMethod {
    /// Hash the field tuple in resolution order.
    Fields,
    /// Instances are unhashable; blocks any inherited hash.
    Disabled,
}

impl HashMethod {
    /// Feed the field tuple of `instance` into `state`.
    ///
    /// Returns `false` without writing anything when hashing is disabled.
    pub fn feed<H: Hasher>(self, instance: &Instance, state: &mut H) -> bool {
        match self {
            Self::Fields => {
                instance.class().name().hash(state);
                instance.values().hash(state);
                true
            }
            Self::Disabled => false,
        }
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    let options = input.options;
    if options.unsafe_hash && !options.frozen {
        warn!(
            class = input.class,
            "unsafe_hash on a mutable class: hash changes when fields change"
        );
    }
    Ok(match options.hash_mode() {
        HashMode::Generated => Some(Generated::Hash(HashMethod::Fields)),
        HashMode::Unhashable => Some(Generated::Hash(HashMethod::Disabled)),
        HashMode::Identity => None,
    })
}
