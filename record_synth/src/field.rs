//! Field declarations and the ordered field table of a synthesized class.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Prefix that marks a field as internal.
pub const INTERNAL_PREFIX: char = '_';

/// Opaque declared type of a field.
///
/// The synthesizer never interprets the tag; it is carried through to
/// introspection and the rendered constructor signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    /// Create a tag from its textual form.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Create a tag naming the Rust type `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_owned())
    }

    /// The tag's textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TypeTag {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Zero-argument default factory.
#[derive(Clone)]
pub struct Factory(Arc<dyn Fn() -> Value + Send + Sync>);

impl Factory {
    /// Wrap `f` as a factory.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the factory.
    #[must_use]
    pub fn produce(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Factory(..)")
    }
}

/// Default of a field: a value resolved at class-creation time or a factory
/// run once per construction.
#[derive(Clone, Debug)]
pub enum FieldDefault {
    /// Value cloned into every instance.
    Value(Value),
    /// Factory invoked for every instance.
    Factory(Factory),
}

impl FieldDefault {
    /// Wrap `f` as a factory default.
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Factory(Factory::new(f))
    }

    /// Produce the value a new instance receives.
    #[must_use]
    pub fn produce(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(factory) => factory.produce(),
        }
    }
}

impl From<Value> for FieldDefault {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// A resolved field.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    type_tag: TypeTag,
    default: Option<FieldDefault>,
    origin: String,
}

impl Field {
    /// Create a field declared by class `origin`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        type_tag: TypeTag,
        default: Option<FieldDefault>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_tag,
            default,
            origin: origin.into(),
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    /// Resolved default, if any.
    #[must_use]
    pub const fn default(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }

    /// Name of the class whose declaration won resolution.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether the constructor must be given a value for this field.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Whether the name carries the internal marker.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.name.starts_with(INTERNAL_PREFIX)
    }
}

/// Ordered, name-unique set of fields describing a class schema.
#[derive(Clone, Debug, Default)]
pub struct FieldTable {
    fields: Vec<Field>,
}

impl FieldTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Merge `field` into the table.
    ///
    /// A new name is appended. An existing name keeps its position and takes
    /// the incoming type and origin; its default is replaced only when the
    /// incoming declaration carries one.
    pub fn merge(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => {
                tracing::trace!(
                    field = %field.name,
                    from = %existing.origin,
                    to = %field.origin,
                    "field overridden in place"
                );
                existing.type_tag = field.type_tag;
                existing.origin = field.origin;
                if field.default.is_some() {
                    existing.default = field.default;
                }
            }
            None => {
                tracing::trace!(field = %field.name, origin = %field.origin, "field appended");
                self.fields.push(field);
            }
        }
    }

    /// Merge every field of `other`, in order.
    pub fn merge_table(&mut self, other: &Self) {
        for field in &other.fields {
            self.merge(field.clone());
        }
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field by name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Iterate fields in resolution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Field names in resolution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the table has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldTable {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
