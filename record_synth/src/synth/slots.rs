//! Compact-storage generator.

use std::ptr;
use std::sync::Arc;

use tracing::debug;

use super::{Generated, SynthesisInput};
use crate::class::Layout;
use crate::result_ext::collect_errors;
use crate::{Class, SynthError, SynthResult};

/// Slot name holding the extra keyword bundle.
const KWARGS_SLOT: &str = "kwargs";

/// Slots declared anywhere in the chains of `bases`, ancestors first, each
/// name kept once.
pub(crate) fn inherited_slots(bases: &[Arc<Class>]) -> Vec<String> {
    let mut slots: Vec<String> = Vec::new();
    for base in bases {
        for class in base.mro().into_iter().rev() {
            let Some(layout) = class.layout() else {
                continue;
            };
            for name in layout.own() {
                if !slots.contains(name) {
                    slots.push(name.clone());
                }
            }
        }
    }
    slots
}

/// Slots contributed by classes in `of`'s chain that are absent from
/// `other`'s chain.
fn exclusive_slots<'a>(of: &'a Class, other: &Class) -> Vec<&'a String> {
    let shared = other.mro();
    of.mro()
        .into_iter()
        .filter(|class| !shared.iter().any(|s| ptr::eq(*s, *class)))
        .filter_map(Class::layout)
        .flat_map(Layout::own)
        .collect()
}

fn check_conflicts(input: &SynthesisInput<'_>) -> SynthResult<()> {
    let mut errors = Vec::new();
    for (i, first) in input.bases.iter().enumerate() {
        for second in input.bases.iter().skip(i + 1) {
            if first.is_subclass_of(second) || second.is_subclass_of(first) {
                continue;
            }
            let theirs = exclusive_slots(second, first);
            let overlap: Vec<String> = exclusive_slots(first, second)
                .into_iter()
                .filter(|name| theirs.contains(name))
                .cloned()
                .collect();
            if !overlap.is_empty() {
                errors.push(Arc::new(SynthError::LayoutConflict {
                    class: input.class.to_owned(),
                    first: first.name().to_owned(),
                    second: second.name().to_owned(),
                    overlap,
                }));
            }
        }
    }
    collect_errors(errors)
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    if !input.options.slots {
        return Ok(None);
    }
    check_conflicts(input)?;
    let mut own: Vec<String> = input.fields.names().map(str::to_owned).collect();
    if input.options.kwargs {
        own.push(KWARGS_SLOT.to_owned());
    }
    let layout = Layout::extend(inherited_slots(input.bases), own);
    debug!(class = input.class, slots = ?layout.own(), "compact storage declared");
    Ok(Some(Generated::Slots(layout)))
}
