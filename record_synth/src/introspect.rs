//! Introspection helpers over data classes and their instances.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::field::Field;
use crate::synth::{Generated, SpecialMethod};
use crate::{Arguments, Class, Instance, SynthError, SynthResult, Value};

/// Fields of a data class, optionally without internal ones.
///
/// # Errors
///
/// Returns [`SynthError::NotSupported`] for a plain class.
pub fn fields(class: &Class, internals: bool) -> SynthResult<Vec<&Field>> {
    let table = class
        .field_table()
        .ok_or_else(|| Arc::new(SynthError::not_supported(class.name(), "fields")))?;
    Ok(table
        .iter()
        .filter(|field| internals || !field.is_internal())
        .collect())
}

/// Name and value of each field of `instance`, in resolution order.
///
/// # Errors
///
/// Returns [`SynthError::NotSupported`] for an instance of a plain class.
pub fn values(instance: &Instance, internals: bool) -> SynthResult<Vec<(&str, &Value)>> {
    let declared = fields(instance.class(), internals)?;
    Ok(declared
        .into_iter()
        .filter_map(|field| {
            instance
                .get(field.name())
                .ok()
                .map(|value| (field.name(), value))
        })
        .collect())
}

fn deep(value: &Value, convert: fn(&Instance) -> Value) -> Value {
    match value {
        Value::Instance(inner) if inner.is_dataclass_instance() => convert(inner),
        Value::List(items) => Value::List(items.iter().map(|v| deep(v, convert)).collect()),
        Value::Tuple(items) => Value::Tuple(items.iter().map(|v| deep(v, convert)).collect()),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), deep(v, convert)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn dict_of(instance: &Instance) -> Value {
    let names = instance.class().field_names();
    let map: BTreeMap<String, Value> = names
        .into_iter()
        .zip(instance.values())
        .map(|(name, value)| (name.to_owned(), deep(value, dict_of)))
        .collect();
    Value::Map(map)
}

fn tuple_of(instance: &Instance) -> Value {
    Value::Tuple(
        instance
            .values()
            .iter()
            .map(|value| deep(value, tuple_of))
            .collect(),
    )
}

/// Convert `instance` into a map, recursing into nested data instances
/// and collections.
///
/// # Errors
///
/// Returns [`SynthError::NotSupported`] for an instance of a plain class.
pub fn as_dict(instance: &Instance) -> SynthResult<Value> {
    ensure_dataclass(instance, "as_dict")?;
    Ok(dict_of(instance))
}

/// Convert `instance` into a tuple, recursing like [`as_dict`].
///
/// # Errors
///
/// Returns [`SynthError::NotSupported`] for an instance of a plain class.
pub fn as_tuple(instance: &Instance) -> SynthResult<Value> {
    ensure_dataclass(instance, "as_tuple")?;
    Ok(tuple_of(instance))
}

fn ensure_dataclass(instance: &Instance, operation: &'static str) -> SynthResult<()> {
    if instance.is_dataclass_instance() {
        Ok(())
    } else {
        Err(SynthError::not_supported(instance.class().name(), operation).into())
    }
}

/// Build a new instance from `instance`'s current values with `changes`
/// applied, through the generated constructor.
///
/// Extra keyword arguments carried by `instance` are passed along. A change
/// naming something other than a field is rejected by the constructor like
/// any unexpected keyword.
///
/// ```rust
/// use record_synth::{Arguments, OptionOverrides, make_dataclass, replace};
///
/// let point = make_dataclass(
///     "Point",
///     [("x", "int"), ("y", "int")],
///     Vec::<(String, record_synth::Value)>::new(),
///     &[],
///     &OptionOverrides::new().frozen(true),
/// )?;
/// let p = point.construct(Arguments::new().arg(1).arg(2))?;
/// let q = replace(&p, [("y", 5)])?;
/// assert_eq!(q.to_string(), "Point(x=1, y=5)");
/// # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
/// ```
///
/// # Errors
///
/// Returns [`SynthError::NotSupported`] when the class has no generated
/// constructor, and any construction error.
pub fn replace<I, K, V>(instance: &Instance, changes: I) -> SynthResult<Instance>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let class = instance.class();
    if class.own_generated(SpecialMethod::Init).is_none() {
        return Err(SynthError::not_supported(class.name(), "replace").into());
    }
    let mut pending: Vec<(String, Value)> = changes
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect();
    let mut args = Arguments::new();
    for (name, current) in class.field_names().into_iter().zip(instance.values()) {
        let value = match pending.iter().position(|(changed, _)| changed == name) {
            Some(index) => pending.swap_remove(index).1,
            None => current.clone(),
        };
        args = args.kwarg(name, value);
    }
    for (name, value) in instance.kwargs().into_iter().flatten() {
        if !pending.iter().any(|(changed, _)| changed == name) {
            args = args.kwarg(name.as_str(), value.clone());
        }
    }
    for (name, value) in pending {
        args = args.kwarg(name, value);
    }
    class.construct(args)
}

/// Whether `class` went through synthesis.
#[must_use]
pub const fn is_dataclass(class: &Class) -> bool {
    class.is_dataclass()
}

/// Constructor signature of `class`, e.g. `(x: int, y: str = 'a')`.
///
/// A class without a generated constructor renders as `()`.
#[must_use]
pub fn signature(class: &Class) -> String {
    match class.own_generated(SpecialMethod::Init) {
        Some(Generated::Init(init)) => init.signature(),
        _ => "()".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{ClassBody, OptionOverrides, dataclass};

    fn point(overrides: OptionOverrides) -> Arc<Class> {
        let mut body = ClassBody::new("Point");
        body.annotate("x", "int")
            .annotate("y", "int")
            .annotate("_tag", "str")
            .assign("y", 0)
            .assign("_tag", "p");
        dataclass(body, &overrides).expect("point synthesizes")
    }

    #[rstest]
    #[case(true, vec!["x", "y", "_tag"])]
    #[case(false, vec!["x", "y"])]
    fn fields_optionally_hide_internals(#[case] internals: bool, #[case] expected: Vec<&str>) {
        let class = point(OptionOverrides::new());
        let names: Vec<&str> = fields(&class, internals)
            .expect("data class")
            .into_iter()
            .map(Field::name)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn plain_classes_have_no_fields() {
        let plain = ClassBody::new("Plain").into_plain_class();
        assert!(fields(&plain, true).is_err());
        assert!(!is_dataclass(&plain));
    }

    #[rstest]
    #[case(OptionOverrides::new(), "(x: int, y: int = 0, _tag: str = 'p')")]
    #[case(
        OptionOverrides::new().kw_only(true).kwargs(true),
        "(*, x: int, y: int = 0, _tag: str = 'p', **kwargs)"
    )]
    #[case(OptionOverrides::new().init(false), "()")]
    fn signature_reflects_options(#[case] overrides: OptionOverrides, #[case] expected: &str) {
        assert_eq!(signature(&point(overrides)), expected);
    }

    #[test]
    fn nested_instances_convert_recursively() {
        let inner = point(OptionOverrides::new());
        let mut outer = ClassBody::new("Segment");
        outer.annotate("points", "list");
        let outer = dataclass(outer, &OptionOverrides::new()).expect("segment synthesizes");

        let a = inner
            .construct(Arguments::new().arg(1))
            .expect("a constructs");
        let segment = outer
            .construct(Arguments::new().arg(vec![Value::from(a)]))
            .expect("segment constructs");

        let dict = as_dict(&segment).expect("dict conversion");
        assert_eq!(
            dict.to_string(),
            "{'points': [{'_tag': 'p', 'x': 1, 'y': 0}]}"
        );
        let tuple = as_tuple(&segment).expect("tuple conversion");
        assert_eq!(tuple.to_string(), "([(1, 0, 'p')],)");
    }

    #[test]
    fn replace_keeps_unchanged_fields_and_identity_is_fresh() {
        let class = point(OptionOverrides::new());
        let original = class
            .construct(Arguments::new().arg(1).arg(2))
            .expect("constructs");
        let changed = replace(&original, [("x", 10)]).expect("replace succeeds");
        assert_eq!(changed.values(), [Value::Int(10), Value::Int(2), Value::from("p")]);
        assert_ne!(changed.id(), original.id());
        assert!(replace(&original, [("z", 1)]).is_err());
    }
}
