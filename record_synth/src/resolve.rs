//! Field Resolver: builds the canonical field table of a class body.
//!
//! Base tables are merged left to right, then the body's own annotations. A
//! name seen before keeps its position and takes the newer declaration; a
//! new name is appended. Defaults come from the body's namespace, which may
//! also re-default an inherited field without re-annotating it.

use tracing::trace;

use crate::class::{Attribute, ClassBody};
use crate::field::{Field, FieldDefault, FieldTable};
use crate::result_ext::collect_errors;
use crate::{SynthError, SynthResult};

/// Check that `name` is a plain identifier.
fn validate_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err("field name is empty".to_owned());
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("field name '{name}' must start with a letter or '_'"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("field name '{name}' contains invalid character {bad:?}"));
    }
    Ok(())
}

fn namespace_default(body: &ClassBody, name: &str) -> Result<Option<FieldDefault>, String> {
    match body.namespace.get(name) {
        None => Ok(None),
        Some(Attribute::Value(value)) => Ok(Some(FieldDefault::Value(value.clone()))),
        Some(Attribute::Factory(factory)) => Ok(Some(FieldDefault::Factory(factory.clone()))),
        Some(Attribute::Method(_)) => Err("collides with a method of the same name".to_owned()),
    }
}

/// Resolve the field table of `body`.
///
/// # Errors
///
/// Returns [`SynthError::Schema`] for invalid field names and for fields
/// that collide with a method of the class or any ancestor. Every problem
/// found is reported, aggregated when there is more than one.
pub fn resolve(body: &ClassBody) -> SynthResult<FieldTable> {
    let mut errors = Vec::new();
    let mut table = FieldTable::new();

    for base in &body.bases {
        if let Some(fields) = base.field_table() {
            trace!(class = %body.name, base = base.name(), "merging base fields");
            table.merge_table(fields);
        }
    }
    let inherited: Vec<String> = table.names().map(str::to_owned).collect();

    for (name, type_tag) in &body.annotations {
        if let Err(message) = validate_identifier(name) {
            errors.push(SynthError::schema_arc(&body.name, name, message));
            continue;
        }
        match namespace_default(body, name) {
            Ok(default) => table.merge(Field::new(
                name.as_str(),
                type_tag.clone(),
                default,
                body.name.as_str(),
            )),
            Err(message) => errors.push(SynthError::schema_arc(&body.name, name, message)),
        }
    }

    for name in &inherited {
        if body.annotations.iter().any(|(own, _)| own == name) {
            continue;
        }
        let Some(existing) = table.get(name) else {
            continue;
        };
        match namespace_default(body, name) {
            Ok(Some(default)) => {
                let redefaulted = Field::new(
                    name.as_str(),
                    existing.type_tag().clone(),
                    Some(default),
                    body.name.as_str(),
                );
                table.merge(redefaulted);
            }
            Ok(None) => {}
            Err(message) => errors.push(SynthError::schema_arc(&body.name, name, message)),
        }
    }

    for field in &table {
        let shadows = body.bases.iter().find(|base| {
            matches!(base.lookup(field.name()), Some(Attribute::Method(_)))
        });
        if let Some(base) = shadows {
            errors.push(SynthError::schema_arc(
                &body.name,
                field.name(),
                format!("shadows a method inherited from '{}'", base.name()),
            ));
        }
    }

    collect_errors(errors)?;
    Ok(table)
}
