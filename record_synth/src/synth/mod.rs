//! Method Synthesizer.
//!
//! Each generator reads the resolved field table and options and either
//! contributes one entry to the class's [`MethodTable`] or declines. The
//! entries are descriptors: the behaviour they stand for lives on the
//! descriptor types and is invoked by [`crate::Instance`] at dispatch time.

mod eq;
mod frozen;
mod hash;
mod init;
mod iter;
mod match_args;
mod order;
mod repr;
mod slots;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::class::{Attribute, Layout};
use crate::field::FieldTable;
use crate::options::Options;
use crate::result_ext::collect_errors;
use crate::{Class, SynthResult};

pub use eq::EqMethod;
pub use frozen::FrozenGuard;
pub use hash::HashMethod;
pub use init::{Bound, InitMethod, Parameter};
pub use iter::IterMethod;
pub use match_args::MatchArgs;
pub use order::OrderMethod;
pub use repr::ReprMethod;
pub(crate) use slots::inherited_slots;

/// Special methods the synthesizer can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialMethod {
    /// Constructor.
    Init,
    /// Textual representation.
    Repr,
    /// Equality comparator.
    Eq,
    /// Ordering comparators.
    Order,
    /// Hash function.
    Hash,
    /// Reassignment guard.
    SetAttr,
    /// Compact storage declaration.
    Slots,
    /// Field-value iteration.
    Iter,
    /// Structural-match field names.
    MatchArgs,
}

impl SpecialMethod {
    /// Every special method, in generation order.
    pub const ALL: [Self; 9] = [
        Self::Init,
        Self::Repr,
        Self::Eq,
        Self::Order,
        Self::Hash,
        Self::SetAttr,
        Self::Slots,
        Self::Iter,
        Self::MatchArgs,
    ];

    /// Conventional name of the method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Repr => "repr",
            Self::Eq => "eq",
            Self::Order => "order",
            Self::Hash => "hash",
            Self::SetAttr => "setattr",
            Self::Slots => "slots",
            Self::Iter => "iter",
            Self::MatchArgs => "match_args",
        }
    }

    /// Namespace name under which a user method replaces the generated one.
    #[must_use]
    pub const fn user_name(self) -> Option<&'static str> {
        match self {
            Self::Repr | Self::Eq | Self::Hash => Some(self.name()),
            _ => None,
        }
    }
}

impl fmt::Display for SpecialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A generated special method.
#[derive(Clone, Debug)]
pub enum Generated {
    /// See [`InitMethod`].
    Init(InitMethod),
    /// See [`ReprMethod`].
    Repr(ReprMethod),
    /// See [`EqMethod`].
    Eq(EqMethod),
    /// See [`OrderMethod`].
    Order(OrderMethod),
    /// See [`HashMethod`].
    Hash(HashMethod),
    /// See [`FrozenGuard`].
    SetAttr(FrozenGuard),
    /// Storage layout of the class.
    Slots(Layout),
    /// See [`IterMethod`].
    Iter(IterMethod),
    /// See [`MatchArgs`].
    MatchArgs(MatchArgs),
}

/// Generated methods keyed by special-method name.
#[derive(Clone, Debug, Default)]
pub struct MethodTable {
    entries: BTreeMap<SpecialMethod, Generated>,
}

impl MethodTable {
    /// Look up a generated method.
    #[must_use]
    pub fn get(&self, special: SpecialMethod) -> Option<&Generated> {
        self.entries.get(&special)
    }

    /// Whether `special` was generated.
    #[must_use]
    pub fn contains(&self, special: SpecialMethod) -> bool {
        self.entries.contains_key(&special)
    }

    /// Names of the generated methods.
    pub fn names(&self) -> impl Iterator<Item = SpecialMethod> + '_ {
        self.entries.keys().copied()
    }

    /// Number of generated methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a generator may consult.
#[derive(Clone, Copy)]
pub struct SynthesisInput<'a> {
    /// Name of the class being synthesized.
    pub class: &'a str,
    /// Resolved field table.
    pub fields: &'a FieldTable,
    /// Resolved options.
    pub options: &'a Options,
    /// The class body's own namespace.
    pub namespace: &'a BTreeMap<String, Attribute>,
    /// Direct bases in declaration order.
    pub bases: &'a [Arc<Class>],
}

impl SynthesisInput<'_> {
    /// Whether the body defines a user method replacing `special`.
    fn user_defines(&self, special: SpecialMethod) -> bool {
        special
            .user_name()
            .and_then(|name| self.namespace.get(name))
            .is_some_and(|attr| matches!(attr, Attribute::Method(_)))
    }
}

type Generator = fn(&SynthesisInput<'_>) -> SynthResult<Option<Generated>>;

fn generator(special: SpecialMethod) -> Generator {
    match special {
        SpecialMethod::Init => init::generate,
        SpecialMethod::Repr => repr::generate,
        SpecialMethod::Eq => eq::generate,
        SpecialMethod::Order => order::generate,
        SpecialMethod::Hash => hash::generate,
        SpecialMethod::SetAttr => frozen::generate,
        SpecialMethod::Slots => slots::generate,
        SpecialMethod::Iter => iter::generate,
        SpecialMethod::MatchArgs => match_args::generate,
    }
}

/// Run every generator over `input`.
///
/// Generators run independently; their failures are collected and reported
/// together, and no table is returned unless all succeed.
///
/// # Errors
///
/// Returns [`crate::SynthError::Schema`] for an invalid constructor
/// signature and [`crate::SynthError::LayoutConflict`] for incompatible
/// compact storage in the bases.
pub fn synthesize(input: &SynthesisInput<'_>) -> SynthResult<MethodTable> {
    let mut table = MethodTable::default();
    let mut errors = Vec::new();
    for special in SpecialMethod::ALL {
        if input.user_defines(special) {
            debug!(class = input.class, method = %special, "user method replaces generator");
            continue;
        }
        match generator(special)(input) {
            Ok(Some(generated)) => {
                table.entries.insert(special, generated);
            }
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }
    collect_errors(errors)?;
    Ok(table)
}
