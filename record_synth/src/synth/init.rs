//! Constructor generator.

use std::collections::BTreeMap;

use super::{Generated, SynthesisInput};
use crate::field::{FieldDefault, TypeTag};
use crate::result_ext::collect_errors;
use crate::{Arguments, SynthError, SynthResult, Value};

/// One constructor parameter.
#[derive(Clone, Debug)]
pub struct Parameter {
    name: String,
    type_tag: TypeTag,
    default: Option<FieldDefault>,
    keyword_only: bool,
}

impl Parameter {
    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    /// Default applied when the argument is omitted.
    #[must_use]
    pub const fn default(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }

    /// Whether the parameter only accepts a keyword.
    #[must_use]
    pub const fn is_keyword_only(&self) -> bool {
        self.keyword_only
    }
}

/// Field values produced by binding constructor arguments.
#[derive(Debug)]
pub struct Bound {
    /// One value per field, in resolution order.
    pub values: Vec<Value>,
    /// Extra keyword bundle when the class accepts one.
    pub kwargs: Option<BTreeMap<String, Value>>,
}

/// Generated constructor: binds arguments to fields.
#[derive(Clone, Debug)]
pub struct InitMethod {
    class: String,
    params: Vec<Parameter>,
    kwargs: bool,
}

impl InitMethod {
    /// Parameters in resolution order.
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Whether an extra keyword bundle is accepted.
    #[must_use]
    pub const fn accepts_kwargs(&self) -> bool {
        self.kwargs
    }

    fn positional_count(&self) -> usize {
        self.params.iter().filter(|p| !p.keyword_only).count()
    }

    fn fail(&self, message: String) -> std::sync::Arc<SynthError> {
        SynthError::construction(&self.class, message).into()
    }

    /// Bind `args` to the parameters, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Construction`] for surplus positionals,
    /// repeated or unexpected keywords, and missing required arguments.
    pub fn bind(&self, args: Arguments) -> SynthResult<Bound> {
        let (positional, keywords) = args.into_parts();
        let accepted = self.positional_count();
        if positional.len() > accepted {
            return Err(self.fail(format!(
                "takes {accepted} positional argument{} but {} were given",
                plural(accepted),
                positional.len()
            )));
        }

        let mut slots: Vec<Option<Value>> = vec![None; self.params.len()];
        for (slot, value) in slots.iter_mut().zip(positional) {
            *slot = Some(value);
        }

        let mut bundle = self.kwargs.then(BTreeMap::new);
        for (name, value) in keywords {
            let slot = self
                .params
                .iter()
                .position(|p| p.name == name)
                .and_then(|index| slots.get_mut(index));
            match slot {
                Some(Some(_)) => {
                    return Err(self.fail(format!("got multiple values for argument '{name}'")));
                }
                Some(empty) => *empty = Some(value),
                None => match bundle.as_mut() {
                    Some(extra) if !extra.contains_key(&name) => {
                        extra.insert(name, value);
                    }
                    Some(_) => {
                        return Err(
                            self.fail(format!("got multiple values for argument '{name}'"))
                        );
                    }
                    None => {
                        return Err(
                            self.fail(format!("got an unexpected keyword argument '{name}'"))
                        );
                    }
                },
            }
        }

        let mut missing = Vec::new();
        let mut values = Vec::with_capacity(self.params.len());
        for (param, slot) in self.params.iter().zip(slots) {
            match (slot, &param.default) {
                (Some(value), _) => values.push(value),
                (None, Some(default)) => values.push(default.produce()),
                (None, None) => {
                    missing.push(param.name.as_str());
                    values.push(Value::None);
                }
            }
        }
        if !missing.is_empty() {
            return Err(self.fail(format!(
                "missing {} required argument{}: {}",
                missing.len(),
                plural(missing.len()),
                quoted_list(&missing)
            )));
        }
        Ok(Bound {
            values,
            kwargs: bundle,
        })
    }

    /// Render the constructor signature.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut parts = Vec::with_capacity(self.params.len() + 2);
        let mut marker_written = false;
        for param in &self.params {
            if param.keyword_only && !marker_written {
                parts.push("*".to_owned());
                marker_written = true;
            }
            let mut part = format!("{}: {}", param.name, param.type_tag);
            match &param.default {
                Some(FieldDefault::Value(value)) => part.push_str(&format!(" = {value}")),
                Some(FieldDefault::Factory(_)) => part.push_str(" = <factory>"),
                None => {}
            }
            parts.push(part);
        }
        if self.kwargs {
            parts.push("**kwargs".to_owned());
        }
        format!("({})", parts.join(", "))
    }
}

const fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn quoted_list(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {last}", rest.join(", ")),
        _ => quoted.concat(),
    }
}

pub(super) fn generate(input: &SynthesisInput<'_>) -> SynthResult<Option<Generated>> {
    if !input.options.init {
        return Ok(None);
    }
    let kw_only = input.options.kw_only;
    let mut errors = Vec::new();
    let mut seen_default: Option<&str> = None;
    for field in input.fields {
        match (field.default(), seen_default) {
            (Some(_), _) => seen_default = Some(field.name()),
            (None, Some(previous)) if !kw_only => errors.push(SynthError::schema_arc(
                input.class,
                field.name(),
                format!("non-default argument follows default argument '{previous}'"),
            )),
            (None, _) => {}
        }
    }
    collect_errors(errors)?;

    let params = input
        .fields
        .iter()
        .map(|field| Parameter {
            name: field.name().to_owned(),
            type_tag: field.type_tag().clone(),
            default: field.default().cloned(),
            keyword_only: kw_only,
        })
        .collect();
    Ok(Some(Generated::Init(InitMethod {
        class: input.class.to_owned(),
        params,
        kwargs: input.options.kwargs,
    })))
}
