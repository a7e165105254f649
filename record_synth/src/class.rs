//! Class bodies and synthesized classes.
//!
//! A [`ClassBody`] is what a user declares: a name, ordered bases, typed
//! annotations, and a namespace of values, factories and methods. Feeding a
//! body through [`crate::dataclass`] yields a sealed data [`Class`]; turning
//! it into a plain class with [`ClassBody::into_plain_class`] skips synthesis
//! entirely, which is how non-data bases are modelled.

use std::collections::BTreeMap;
use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::field::{Factory, FieldTable, TypeTag};
use crate::options::Options;
use crate::synth::{self, Generated, MethodTable, SpecialMethod};
use crate::{Instance, SynthResult, Value};

/// User-defined method: receives the instance and positional arguments.
pub type Method = Arc<dyn Fn(&Instance, &[Value]) -> SynthResult<Value> + Send + Sync>;

/// Hook run after the generated constructor has assigned every field.
pub type PostInit = Arc<dyn Fn(&mut Instance) -> SynthResult<()> + Send + Sync>;

/// Entry of a class namespace.
#[derive(Clone)]
pub enum Attribute {
    /// Plain class attribute; doubles as a field default when annotated.
    Value(Value),
    /// Default factory for the annotated field of the same name.
    Factory(Factory),
    /// User-defined method.
    Method(Method),
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
            Self::Method(_) => f.write_str("Method(..)"),
        }
    }
}

/// Declaration of a class before synthesis.
///
/// ```rust
/// use record_synth::{ClassBody, OptionOverrides, TypeTag, dataclass};
///
/// let mut body = ClassBody::new("Point");
/// body.annotate("x", TypeTag::of::<i64>())
///     .annotate("y", TypeTag::of::<i64>())
///     .assign("y", 0);
/// let point = dataclass(body, &OptionOverrides::new())?;
/// assert_eq!(point.field_names(), ["x", "y"]);
/// # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ClassBody {
    pub(crate) name: String,
    pub(crate) bases: Vec<Arc<Class>>,
    pub(crate) annotations: Vec<(String, TypeTag)>,
    pub(crate) namespace: BTreeMap<String, Attribute>,
    pub(crate) slots: Option<Vec<String>>,
    pub(crate) post_init: Option<PostInitHook>,
}

/// Debug-printable wrapper around a [`PostInit`] hook.
#[derive(Clone)]
pub(crate) struct PostInitHook(pub(crate) PostInit);

impl fmt::Debug for PostInitHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostInit(..)")
    }
}

impl ClassBody {
    /// Start an empty body named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            annotations: Vec::new(),
            namespace: BTreeMap::new(),
            slots: None,
            post_init: None,
        }
    }

    /// Name of the class being declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a base class.
    pub fn inherit(&mut self, base: Arc<Class>) -> &mut Self {
        self.bases.push(base);
        self
    }

    /// Declare an annotated attribute. Re-annotating a name replaces its
    /// type without moving it.
    pub fn annotate(&mut self, name: impl Into<String>, type_tag: impl Into<TypeTag>) -> &mut Self {
        let name = name.into();
        let type_tag = type_tag.into();
        match self.annotations.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = type_tag,
            None => self.annotations.push((name, type_tag)),
        }
        self
    }

    /// Bind a class attribute.
    pub fn assign(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.namespace
            .insert(name.into(), Attribute::Value(value.into()));
        self
    }

    /// Bind a default factory.
    pub fn assign_factory<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.namespace
            .insert(name.into(), Attribute::Factory(Factory::new(factory)));
        self
    }

    /// Define a method. Defining `repr`, `eq` or `hash` suppresses the
    /// corresponding generated method.
    pub fn define_method<F>(&mut self, name: impl Into<String>, method: F) -> &mut Self
    where
        F: Fn(&Instance, &[Value]) -> SynthResult<Value> + Send + Sync + 'static,
    {
        self.namespace
            .insert(name.into(), Attribute::Method(Arc::new(method)));
        self
    }

    /// Declare compact storage for a plain class.
    pub fn declare_slots<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Install a post-init hook.
    pub fn on_post_init<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Instance) -> SynthResult<()> + Send + Sync + 'static,
    {
        self.post_init = Some(PostInitHook(Arc::new(hook)));
        self
    }

    /// Seal the body as a plain class without synthesis.
    ///
    /// Plain classes contribute no fields, but their methods and storage
    /// layout are inherited by data-class subclasses.
    #[must_use]
    pub fn into_plain_class(self) -> Arc<Class> {
        let layout = self.slots.as_ref().map(|declared| {
            let inherited = synth::inherited_slots(&self.bases);
            Layout::extend(inherited, declared.iter().cloned())
        });
        Arc::new(Class {
            name: self.name,
            bases: self.bases,
            annotations: self.annotations,
            namespace: self.namespace,
            layout,
            schema: None,
            post_init: self.post_init,
        })
    }
}

/// Fixed storage layout of a class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    own: Vec<String>,
    full: Vec<String>,
}

impl Layout {
    /// Build a layout adding `own` slots on top of `inherited`. Names already
    /// inherited are not repeated.
    pub(crate) fn extend<I>(inherited: Vec<String>, own: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut full = inherited;
        let mut added = Vec::new();
        for name in own {
            if !full.contains(&name) {
                full.push(name.clone());
                added.push(name);
            }
        }
        Self { own: added, full }
    }

    /// Slots introduced by this class.
    #[must_use]
    pub fn own(&self) -> &[String] {
        &self.own
    }

    /// Slots across the whole chain.
    #[must_use]
    pub fn full(&self) -> &[String] {
        &self.full
    }
}

/// Synthesis output attached to a data class.
#[derive(Debug)]
pub(crate) struct Schema {
    pub(crate) fields: FieldTable,
    pub(crate) options: Options,
    pub(crate) methods: MethodTable,
}

/// A sealed class, plain or synthesized.
pub struct Class {
    name: String,
    bases: Vec<Arc<Class>>,
    annotations: Vec<(String, TypeTag)>,
    namespace: BTreeMap<String, Attribute>,
    layout: Option<Layout>,
    schema: Option<Schema>,
    post_init: Option<PostInitHook>,
}

/// Where a special method resolved to.
pub(crate) enum Dispatch<'a> {
    User(&'a Method),
    Generated(&'a Generated),
}

impl Class {
    pub(crate) fn sealed(body: ClassBody, schema: Schema) -> Self {
        let layout = match schema.methods.get(SpecialMethod::Slots) {
            Some(Generated::Slots(layout)) => Some(layout.clone()),
            _ => None,
        };
        Self {
            name: body.name,
            bases: body.bases,
            annotations: body.annotations,
            namespace: body.namespace,
            layout,
            schema: Some(schema),
            post_init: body.post_init,
        }
    }

    /// Class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct bases in declaration order.
    #[must_use]
    pub fn bases(&self) -> &[Arc<Self>] {
        &self.bases
    }

    /// Annotations declared by this class itself.
    #[must_use]
    pub fn annotations(&self) -> &[(String, TypeTag)] {
        &self.annotations
    }

    /// Whether the class went through synthesis.
    #[must_use]
    pub const fn is_dataclass(&self) -> bool {
        self.schema.is_some()
    }

    /// Resolved field table of a data class.
    #[must_use]
    pub fn field_table(&self) -> Option<&FieldTable> {
        self.schema.as_ref().map(|s| &s.fields)
    }

    /// Field names in resolution order; empty for plain classes.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.field_table()
            .map(|fields| fields.names().collect())
            .unwrap_or_default()
    }

    /// Resolved options of a data class.
    #[must_use]
    pub fn options(&self) -> Option<&Options> {
        self.schema.as_ref().map(|s| &s.options)
    }

    /// Methods generated for this class.
    #[must_use]
    pub fn generated(&self) -> Option<&MethodTable> {
        self.schema.as_ref().map(|s| &s.methods)
    }

    /// Storage layout, when the class declares one.
    #[must_use]
    pub const fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Whether instances may carry attributes beyond their declared slots.
    ///
    /// Only a chain where every class declares a layout removes the
    /// instance dictionary.
    #[must_use]
    pub fn has_instance_dict(&self) -> bool {
        self.mro().iter().any(|class| class.layout.is_none())
    }

    /// The class followed by its ancestors, depth first and left to right,
    /// each class listed once.
    #[must_use]
    pub fn mro(&self) -> Vec<&Self> {
        let mut order: Vec<&Self> = vec![self];
        for base in &self.bases {
            for class in base.mro() {
                if !order.iter().any(|seen| ptr::eq(*seen, class)) {
                    order.push(class);
                }
            }
        }
        order
    }

    /// Whether `other` is this class or one of its ancestors.
    #[must_use]
    pub fn is_subclass_of(&self, other: &Self) -> bool {
        self.mro().iter().any(|class| ptr::eq(*class, other))
    }

    /// Look up a namespace entry through the chain.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Attribute> {
        self.mro()
            .into_iter()
            .find_map(|class| class.namespace.get(name))
    }

    /// Namespace declared by this class itself.
    #[must_use]
    pub const fn namespace(&self) -> &BTreeMap<String, Attribute> {
        &self.namespace
    }

    /// Names exposed for positional structural matching.
    #[must_use]
    pub fn match_args(&self) -> Option<&[String]> {
        match self.dispatch(SpecialMethod::MatchArgs) {
            Some(Dispatch::Generated(Generated::MatchArgs(names))) => Some(names.names()),
            _ => None,
        }
    }

    pub(crate) fn dispatch(&self, special: SpecialMethod) -> Option<Dispatch<'_>> {
        for class in self.mro() {
            if let Some(Attribute::Method(method)) = special
                .user_name()
                .and_then(|name| class.namespace.get(name))
            {
                return Some(Dispatch::User(method));
            }
            if let Some(generated) = class
                .schema
                .as_ref()
                .and_then(|schema| schema.methods.get(special))
            {
                return Some(Dispatch::Generated(generated));
            }
        }
        None
    }

    pub(crate) fn own_generated(&self, special: SpecialMethod) -> Option<&Generated> {
        self.schema
            .as_ref()
            .and_then(|schema| schema.methods.get(special))
    }

    pub(crate) fn post_init(&self) -> Option<&PostInit> {
        self.mro()
            .into_iter()
            .find_map(|class| class.post_init.as_ref().map(|hook| &hook.0))
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bases: Vec<&str> = self.bases.iter().map(|b| b.name()).collect();
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("bases", &bases)
            .field("fields", &self.field_names())
            .field("options", &self.options())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", self.name)
    }
}
