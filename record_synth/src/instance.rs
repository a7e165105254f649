//! Instances of synthesized classes and the dispatch of their special
//! methods.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{self, AtomicU64};

use tracing::{debug, trace};
use xxhash_rust::xxh3::Xxh3;

use crate::class::Dispatch;
use crate::field::FieldDefault;
use crate::synth::{Generated, HashMethod, SpecialMethod};
use crate::{Attribute, Class, SynthError, SynthResult, Value};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, atomic::Ordering::Relaxed)
}

/// Constructor arguments: positional values then keyword pairs.
///
/// ```rust
/// use record_synth::Arguments;
///
/// let args = Arguments::new().arg(1).kwarg("label", "origin");
/// assert_eq!(args.positional().len(), 1);
/// assert_eq!(args.keywords().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl Arguments {
    /// No arguments.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positional: Vec::new(),
            keywords: Vec::new(),
        }
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }

    /// Positional arguments in call order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments in call order.
    #[must_use]
    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    /// Whether no argument was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, Vec<(String, Value)>) {
        (self.positional, self.keywords)
    }
}

impl<T: Into<Value>> FromIterator<T> for Arguments {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            positional: iter.into_iter().map(Into::into).collect(),
            keywords: Vec::new(),
        }
    }
}

impl Class {
    /// Create an instance through the generated constructor.
    ///
    /// The post-init hook, if any class in the chain defines one, runs
    /// before the instance is sealed, so it may still assign fields of a
    /// frozen class. Classes without a generated constructor only accept an
    /// empty argument list; their fields take their defaults or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Construction`] when the arguments do not bind,
    /// and whatever the post-init hook reports.
    pub fn construct(self: &Arc<Self>, args: Arguments) -> SynthResult<Instance> {
        let (values, kwargs) = match self.own_generated(SpecialMethod::Init) {
            Some(Generated::Init(init)) => {
                let bound = init.bind(args)?;
                (bound.values, bound.kwargs)
            }
            _ => {
                if !args.is_empty() {
                    return Err(SynthError::construction(self.name(), "takes no arguments").into());
                }
                let values = self
                    .field_table()
                    .into_iter()
                    .flatten()
                    .map(|field| field.default().map_or(Value::None, FieldDefault::produce))
                    .collect();
                let kwargs = self
                    .options()
                    .is_some_and(|options| options.kwargs)
                    .then(BTreeMap::new);
                (values, kwargs)
            }
        };

        let mut instance = Instance {
            id: next_id(),
            class: Arc::clone(self),
            values,
            extras: BTreeMap::new(),
            kwargs,
            sealed: false,
        };
        if let Some(hook) = self.post_init() {
            hook(&mut instance)?;
        }
        instance.sealed = true;
        trace!(class = self.name(), id = instance.id, "instance constructed");
        Ok(instance)
    }
}

/// An instance of a sealed class.
///
/// Cloning keeps the identity: a clone is the same object as far as
/// identity equality and identity hashing are concerned.
#[derive(Clone)]
pub struct Instance {
    id: u64,
    class: Arc<Class>,
    values: Vec<Value>,
    extras: BTreeMap<String, Value>,
    kwargs: Option<BTreeMap<String, Value>>,
    sealed: bool,
}

impl Instance {
    /// Identity of the instance.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The instance's class.
    #[must_use]
    pub const fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Field values in resolution order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Extra keyword bundle, when the class accepts one.
    #[must_use]
    pub const fn kwargs(&self) -> Option<&BTreeMap<String, Value>> {
        self.kwargs.as_ref()
    }

    /// Whether construction has finished.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Whether the instance's class went through synthesis.
    #[must_use]
    pub fn is_dataclass_instance(&self) -> bool {
        self.class.is_dataclass()
    }

    fn field_index(&self, name: &str) -> Option<usize> {
        self.class
            .field_table()
            .and_then(|fields| fields.position(name))
    }

    fn unknown(&self, name: &str) -> Arc<SynthError> {
        Arc::new(SynthError::UnknownAttribute {
            class: self.class.name().to_owned(),
            name: name.to_owned(),
        })
    }

    fn not_supported(&self, operation: &'static str) -> Arc<SynthError> {
        SynthError::not_supported(self.class.name(), operation).into()
    }

    /// Read an attribute: a field, a dynamic attribute, or a class attribute.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownAttribute`] when nothing matches.
    pub fn get(&self, name: &str) -> SynthResult<&Value> {
        if let Some(value) = self.field_index(name).and_then(|i| self.values.get(i)) {
            return Ok(value);
        }
        if let Some(value) = self.extras.get(name) {
            return Ok(value);
        }
        match self.class.lookup(name) {
            Some(Attribute::Value(value)) => Ok(value),
            _ => Err(self.unknown(name)),
        }
    }

    /// Assign an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ImmutableField`] on a sealed instance of a
    /// frozen class and [`SynthError::UnknownAttribute`] for a non-field
    /// name when the class has no instance dictionary.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> SynthResult<()> {
        if let Some(Dispatch::Generated(Generated::SetAttr(guard))) =
            self.class.dispatch(SpecialMethod::SetAttr)
        {
            guard.check(self.class.name(), name, self.sealed)?;
        }
        if let Some(slot) = self
            .field_index(name)
            .and_then(|index| self.values.get_mut(index))
        {
            *slot = value.into();
            return Ok(());
        }
        if self.class.has_instance_dict() {
            self.extras.insert(name.to_owned(), value.into());
            return Ok(());
        }
        Err(self.unknown(name))
    }

    /// Call a method defined on the class or an ancestor.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownAttribute`] when no method has that
    /// name, and whatever the method reports.
    pub fn call_method(&self, name: &str, args: &[Value]) -> SynthResult<Value> {
        match self.class.lookup(name) {
            Some(Attribute::Method(method)) => method(self, args),
            _ => Err(self.unknown(name)),
        }
    }

    /// Textual representation.
    ///
    /// Without a generated or user-defined representation this is
    /// `<Name object at 0x..>`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Method`] when a user-defined `repr` does not
    /// return a string, and whatever it reports.
    pub fn repr(&self) -> SynthResult<String> {
        match self.class.dispatch(SpecialMethod::Repr) {
            Some(Dispatch::User(method)) => match method(self, &[])? {
                Value::Str(text) => Ok(text),
                other => Err(Arc::new(SynthError::Method {
                    class: self.class.name().to_owned(),
                    method: SpecialMethod::Repr.name().to_owned(),
                    message: format!("returned {} instead of str", other.kind()),
                })),
            },
            Some(Dispatch::Generated(Generated::Repr(repr))) => Ok(repr.render(self)),
            _ => Ok(format!("<{} object at {:#x}>", self.class.name(), self.id)),
        }
    }

    /// Equality, reporting failures of a user-defined `eq`.
    ///
    /// # Errors
    ///
    /// Propagates errors from a user-defined `eq`.
    pub fn try_equals(&self, other: &Self) -> SynthResult<bool> {
        match self.class.dispatch(SpecialMethod::Eq) {
            Some(Dispatch::User(method)) => {
                let result = method(self, &[Value::from(other.clone())])?;
                Ok(result.as_bool().unwrap_or(false))
            }
            Some(Dispatch::Generated(Generated::Eq(eq))) => Ok(eq.equals(self, other)),
            _ => Ok(self.id == other.id),
        }
    }

    /// Equality: generated, user-defined, or identity.
    ///
    /// A failing user-defined `eq` counts as unequal; the failure is logged
    /// at debug level.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.try_equals(other).unwrap_or_else(|err| {
            debug!(
                class = self.class.name(),
                error = %err,
                "user eq failed; treating as unequal"
            );
            false
        })
    }

    /// Order against `other` for operator `op`.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::NotSupported`] when the class has no ordering
    /// and [`SynthError::ComparisonTypeMismatch`] across classes.
    pub fn ordering(&self, other: &Self, op: &'static str) -> SynthResult<Ordering> {
        match self.class.dispatch(SpecialMethod::Order) {
            Some(Dispatch::Generated(Generated::Order(order))) => order.compare(self, other, op),
            _ => Err(self.not_supported("ordering")),
        }
    }

    /// `self < other`.
    ///
    /// # Errors
    ///
    /// See [`Instance::ordering`].
    pub fn lt(&self, other: &Self) -> SynthResult<bool> {
        Ok(self.ordering(other, "<")?.is_lt())
    }

    /// `self <= other`.
    ///
    /// # Errors
    ///
    /// See [`Instance::ordering`].
    pub fn le(&self, other: &Self) -> SynthResult<bool> {
        Ok(self.ordering(other, "<=")?.is_le())
    }

    /// `self > other`.
    ///
    /// # Errors
    ///
    /// See [`Instance::ordering`].
    pub fn gt(&self, other: &Self) -> SynthResult<bool> {
        Ok(self.ordering(other, ">")?.is_gt())
    }

    /// `self >= other`.
    ///
    /// # Errors
    ///
    /// See [`Instance::ordering`].
    pub fn ge(&self, other: &Self) -> SynthResult<bool> {
        Ok(self.ordering(other, ">=")?.is_ge())
    }

    /// Deterministic hash of the instance.
    ///
    /// A generated hash covers the field tuple; it changes when a field is
    /// mutated, which is the caller's responsibility to avoid.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Unhashable`] when equality was generated
    /// without a hash, and whatever a user-defined `hash` reports.
    pub fn hash_value(&self) -> SynthResult<u64> {
        let mut hasher = Xxh3::new();
        match self.class.dispatch(SpecialMethod::Hash) {
            Some(Dispatch::User(method)) => method(self, &[])?.hash(&mut hasher),
            Some(Dispatch::Generated(Generated::Hash(HashMethod::Disabled))) => {
                return Err(Arc::new(SynthError::Unhashable {
                    class: self.class.name().to_owned(),
                }));
            }
            Some(Dispatch::Generated(Generated::Hash(method))) => {
                method.feed(self, &mut hasher);
            }
            _ => self.id.hash(&mut hasher),
        }
        Ok(hasher.finish())
    }

    /// Feed the instance into a hasher as part of a containing value.
    ///
    /// Falls back to identity where [`Instance::hash_value`] would fail,
    /// logging a failing user-defined `hash` at debug level.
    pub fn hash_structure<H: Hasher>(&self, state: &mut H) {
        match self.class.dispatch(SpecialMethod::Hash) {
            Some(Dispatch::Generated(Generated::Hash(method))) if method.feed(self, state) => {}
            Some(Dispatch::User(method)) => match method(self, &[]) {
                Ok(value) => value.hash(state),
                Err(err) => {
                    debug!(
                        class = self.class.name(),
                        error = %err,
                        "user hash failed; hashing identity"
                    );
                    self.id.hash(state);
                }
            },
            _ => self.id.hash(state),
        }
    }

    /// Iterate field values in resolution order.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::NotSupported`] unless iteration was generated.
    pub fn iter_fields(&self) -> SynthResult<std::slice::Iter<'_, Value>> {
        match self.class.dispatch(SpecialMethod::Iter) {
            Some(Dispatch::Generated(Generated::Iter(iter))) => Ok(iter.iter(self)),
            _ => Err(self.not_supported("iteration")),
        }
    }

    /// Destructure the first `count` structural-match values.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::NotSupported`] without generated match names and
    /// [`SynthError::Construction`] when `count` exceeds them.
    pub fn match_positional(&self, count: usize) -> SynthResult<Vec<&Value>> {
        let Some(names) = self.class.match_args() else {
            return Err(self.not_supported("structural matching"));
        };
        if count > names.len() {
            return Err(SynthError::construction(
                self.class.name(),
                format!(
                    "accepts {} positional sub-patterns ({count} given)",
                    names.len()
                ),
            )
            .into());
        }
        names
            .iter()
            .take(count)
            .map(|name| self.get(name))
            .collect()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<(&str, &Value)> = self
            .class
            .field_names()
            .into_iter()
            .zip(&self.values)
            .collect();
        f.debug_struct("Instance")
            .field("class", &self.class.name())
            .field("id", &self.id)
            .field("fields", &fields)
            .field("extras", &self.extras)
            .field("kwargs", &self.kwargs)
            .finish()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "<{} object>", self.class.name()),
        }
    }
}

#[cfg(test)]
mod tests;
