//! Unit tests for instance construction and special-method dispatch.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use rstest::{fixture, rstest};

use super::*;
use crate::{ClassBody, OptionOverrides, dataclass};

fn point_body() -> ClassBody {
    let mut body = ClassBody::new("Point");
    body.annotate("x", "int").annotate("y", "int").assign("y", 0);
    body
}

#[fixture]
fn point() -> Arc<Class> {
    dataclass(point_body(), &OptionOverrides::new()).expect("point synthesizes")
}

fn make(class: &Arc<Class>, x: i64, y: i64) -> Instance {
    class
        .construct(Arguments::new().arg(x).arg(y))
        .expect("instance constructs")
}

#[rstest]
fn fields_are_readable_and_mutable(point: Arc<Class>) {
    let mut p = make(&point, 1, 2);
    p.set("x", 5).expect("mutable class accepts assignment");
    assert_eq!(p.get("x").ok(), Some(&Value::Int(5)));
    assert!(p.get("z").is_err());
    p.set("note", "dynamic").expect("instance dictionary accepts extras");
    assert_eq!(p.get("note").ok(), Some(&Value::from("dynamic")));
}

#[rstest]
fn equality_requires_the_same_class(point: Arc<Class>) {
    let other = dataclass(point_body(), &OptionOverrides::new()).expect("twin synthesizes");
    assert!(make(&point, 1, 2).equals(&make(&point, 1, 2)));
    assert!(!make(&point, 1, 2).equals(&make(&other, 1, 2)));
}

#[test]
fn identity_semantics_without_eq() {
    let class = dataclass(point_body(), &OptionOverrides::new().eq(false)).expect("synthesizes");
    let a = make(&class, 1, 2);
    let b = make(&class, 1, 2);
    assert!(!a.equals(&b));
    assert!(a.equals(&a.clone()));
    assert!(a.hash_value().is_ok());
}

#[rstest]
fn eq_without_hash_is_unhashable(point: Arc<Class>) {
    let err = make(&point, 1, 2).hash_value().expect_err("unhashable");
    assert!(matches!(err.as_ref(), SynthError::Unhashable { class } if class == "Point"));
}

#[rstest]
#[case(OptionOverrides::new().frozen(true))]
#[case(OptionOverrides::new().unsafe_hash(true))]
fn generated_hash_follows_fields(#[case] overrides: OptionOverrides) {
    let class = dataclass(point_body(), &overrides).expect("synthesizes");
    let a = make(&class, 1, 2).hash_value().expect("hashable");
    let b = make(&class, 1, 2).hash_value().expect("hashable");
    let c = make(&class, 2, 1).hash_value().expect("hashable");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[rstest]
fn ordering_is_unsupported_without_order(point: Arc<Class>) {
    let err = make(&point, 1, 2)
        .lt(&make(&point, 2, 2))
        .expect_err("no ordering");
    assert!(matches!(err.as_ref(), SynthError::NotSupported { .. }));
}

#[test]
fn ordering_across_classes_is_a_type_mismatch() {
    let ordered = OptionOverrides::new().order(true);
    let a = dataclass(point_body(), &ordered).expect("a synthesizes");
    let b = dataclass(point_body(), &ordered).expect("b synthesizes");
    let err = make(&a, 1, 2).lt(&make(&b, 1, 2)).expect_err("different classes");
    assert!(matches!(
        err.as_ref(),
        SynthError::ComparisonTypeMismatch { op: "<", .. }
    ));
}

#[test]
fn post_init_may_adjust_frozen_fields() {
    let mut body = point_body();
    body.on_post_init(|instance| {
        let x = instance.get("x")?.as_int().unwrap_or_default();
        instance.set("y", x * 10)
    });
    let class = dataclass(body, &OptionOverrides::new().frozen(true)).expect("synthesizes");
    let mut p = class
        .construct(Arguments::new().arg(3))
        .expect("post-init runs before sealing");
    assert_eq!(p.get("y").ok(), Some(&Value::Int(30)));
    let err = p.set("x", 4).expect_err("sealed frozen instance");
    assert!(matches!(err.as_ref(), SynthError::ImmutableField { field, .. } if field == "x"));
}

#[test]
fn factory_defaults_run_per_construction() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut body = ClassBody::new("Bag");
    body.annotate("items", "list").assign_factory("items", move || {
        counter.fetch_add(1, AtomicOrdering::Relaxed);
        Value::List(Vec::new())
    });
    let class = dataclass(body, &OptionOverrides::new()).expect("synthesizes");
    let _first = class.construct(Arguments::new()).expect("first");
    let _second = class.construct(Arguments::new()).expect("second");
    assert_eq!(calls.load(AtomicOrdering::Relaxed), 2);
}

#[test]
fn init_disabled_applies_defaults_only() {
    let class = dataclass(point_body(), &OptionOverrides::new().init(false)).expect("synthesizes");
    let p = class.construct(Arguments::new()).expect("empty construction");
    assert_eq!(p.values(), [Value::None, Value::Int(0)]);
    assert!(class.construct(Arguments::new().arg(1)).is_err());
}

#[test]
fn slotted_instances_reject_unknown_attributes() {
    let class = dataclass(point_body(), &OptionOverrides::new().slots(true)).expect("synthesizes");
    let mut p = make(&class, 1, 2);
    let err = p.set("z", 1).expect_err("no instance dictionary");
    assert!(matches!(err.as_ref(), SynthError::UnknownAttribute { name, .. } if name == "z"));
}

#[test]
fn kwargs_are_kept_and_rendered() {
    let class = dataclass(point_body(), &OptionOverrides::new().kwargs(true)).expect("synthesizes");
    let p = class
        .construct(Arguments::new().arg(1).kwarg("colour", "red"))
        .expect("extra keyword accepted");
    assert_eq!(
        p.kwargs().and_then(|extra| extra.get("colour")),
        Some(&Value::from("red"))
    );
    assert_eq!(p.to_string(), "Point(x=1, y=0, colour='red')");
}

#[test]
fn user_repr_and_methods_dispatch() {
    let mut body = point_body();
    body.define_method("repr", |instance, _| {
        Ok(Value::from(format!("<{}>", instance.get("x")?)))
    })
    .define_method("norm", |instance, _| {
        let x = instance.get("x")?.as_int().unwrap_or_default();
        let y = instance.get("y")?.as_int().unwrap_or_default();
        Ok(Value::Int(x.abs() + y.abs()))
    });
    let class = dataclass(body, &OptionOverrides::new()).expect("synthesizes");
    let p = make(&class, -3, 4);
    assert_eq!(p.to_string(), "<-3>");
    assert_eq!(p.call_method("norm", &[]).ok(), Some(Value::Int(7)));
    assert!(p.call_method("missing", &[]).is_err());
}

#[test]
fn plain_class_instances_fall_back_to_identity() {
    let plain = ClassBody::new("Plain").into_plain_class();
    let instance = plain.construct(Arguments::new()).expect("plain construction");
    assert!(!instance.is_dataclass_instance());
    assert!(instance.to_string().starts_with("<Plain object at 0x"));
    assert!(instance.iter_fields().is_err());
}

#[test]
fn match_positional_respects_the_name_count() {
    let class =
        dataclass(point_body(), &OptionOverrides::new().match_args(true)).expect("synthesizes");
    let p = make(&class, 1, 2);
    let values = p.match_positional(2).expect("two sub-patterns");
    assert_eq!(values, [&Value::Int(1), &Value::Int(2)]);
    assert!(p.match_positional(3).is_err());
}

#[test]
fn inherited_repr_prints_each_value_under_its_own_name() {
    let mut first = ClassBody::new("First");
    first.annotate("a", "int").assign("a", 1);
    let first = dataclass(first, &OptionOverrides::new().repr(false)).expect("first synthesizes");
    let mut second = ClassBody::new("Second");
    second.annotate("b", "int").assign("b", 2);
    let second = dataclass(second, &OptionOverrides::new()).expect("second synthesizes");
    let mut child = ClassBody::new("Child");
    child.inherit(first).inherit(second);
    let child = dataclass(child, &OptionOverrides::new().repr(false)).expect("child synthesizes");
    assert!(child.generated().is_some_and(|m| !m.contains(SpecialMethod::Repr)));

    let instance = child.construct(Arguments::new()).expect("defaults construct");
    let expected: Vec<String> = child
        .field_names()
        .into_iter()
        .map(|name| format!("{name}={}", instance.get(name).expect("field value")))
        .collect();
    assert_eq!(instance.to_string(), format!("Child({})", expected.join(", ")));
    assert!(instance.to_string().contains("a=1"));
    assert!(instance.to_string().contains("b=2"));
}

#[test]
fn inherited_repr_includes_fields_added_by_the_subclass() {
    let base = dataclass(point_body(), &OptionOverrides::new()).expect("base synthesizes");
    let mut child = ClassBody::new("Point3");
    child.inherit(base).annotate("z", "int").assign("z", 0);
    let child = dataclass(child, &OptionOverrides::new().repr(false)).expect("child synthesizes");
    let p = child
        .construct(Arguments::new().arg(1).arg(2).arg(3))
        .expect("constructs");
    assert_eq!(p.to_string(), "Point3(x=1, y=2, z=3)");
}

#[test]
fn frozen_instances_hash_alike_only_when_numbers_are_equal() {
    let mut body = ClassBody::new("Sample");
    body.annotate("x", "float");
    let class = dataclass(body, &OptionOverrides::new().frozen(true)).expect("synthesizes");
    let build = |value: Value| {
        class
            .construct(Arguments::new().arg(value))
            .expect("constructs")
    };
    let above = build(Value::Int((1 << 53) + 1));
    let exact = build(Value::Int(1 << 53));
    let float = build(Value::Float(9_007_199_254_740_992.0));
    assert!(!above.equals(&float));
    assert!(exact.equals(&float));
    assert_eq!(
        exact.hash_value().expect("hashable"),
        float.hash_value().expect("hashable")
    );
}

#[test]
fn failing_user_eq_and_hash_fall_back_without_panicking() {
    let mut body = point_body();
    body.define_method("eq", |instance, _| {
        Err(SynthError::not_supported(instance.class().name(), "eq").into())
    })
    .define_method("hash", |instance, _| {
        Err(SynthError::not_supported(instance.class().name(), "hash").into())
    });
    let class = dataclass(body, &OptionOverrides::new()).expect("synthesizes");
    let a = make(&class, 1, 2);
    let b = make(&class, 1, 2);
    assert!(a.try_equals(&b).is_err());
    assert!(!a.equals(&b));
    assert!(a.hash_value().is_err());

    let mut first = Xxh3::new();
    a.hash_structure(&mut first);
    let mut again = Xxh3::new();
    a.hash_structure(&mut again);
    assert_eq!(first.finish(), again.finish());
    let mut other = Xxh3::new();
    b.hash_structure(&mut other);
    assert_ne!(first.finish(), other.finish());
}
