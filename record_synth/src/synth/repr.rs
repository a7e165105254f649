//! Representation generator.

use std::fmt;

use super::{Generated, SynthesisInput};
use crate::Instance;
use crate::field::FieldTable;

/// Generated representation: `Name(field=value, ...)`.
///
/// The output covers the field table of the instance's own class, so a
/// subclass inheriting this method still prints all of its fields.
#[derive(Clone, Copy, Debug)]
pub struct ReprMethod {
    hide_internals: bool,
}

impl ReprMethod {
    /// Names of the fields from `fields` that appear in the output.
    pub fn shown<'a>(&self, fields: &'a FieldTable) -> impl Iterator<Item = &'a str> {
        let hide = self.hide_internals;
        fields
            .iter()
            .filter(move |field| !(hide && field.is_internal()))
            .map(|field| field.name())
    }

    /// Write the representation of `instance` into `out`.
    ///
    /// Extra keyword arguments, when the instance carries any, follow the
    /// fields.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    pub fn write(&self, instance: &Instance, out: &mut impl fmt::Write) -> fmt::Result {
        write!(out, "{}(", instance.class().name())?;
        let fields = instance
            .class()
            .field_table()
            .into_iter()
            .flat_map(|table| self.shown(table))
            .filter_map(|name| instance.get(name).ok().map(|value| (name, value)));
        let extras = instance
            .kwargs()
            .into_iter()
            .flatten()
            .map(|(name, value)| (name.as_str(), value));
        for (i, (name, value)) in fields.chain(extras).enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write!(out, "{name}={value}")?;
        }
        out.write_char(')')
    }

    /// Render the representation of `instance`.
    #[must_use]
    pub fn render(&self, instance: &Instance) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        if self.write(instance, &mut out).is_err() {
            out.clear();
        }
        out
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> crate::SynthResult<Option<Generated>> {
    Ok(input.options.repr.then_some(Generated::Repr(ReprMethod {
        hide_internals: input.options.hide_internals,
    })))
}
