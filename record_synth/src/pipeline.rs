//! Synthesis pipeline and its two entry points.
//!
//! Synthesis moves through `Unconfigured → FieldsResolved →
//! MethodsGenerated → Sealed`, each stage a distinct type. Every stage
//! consumes the previous one, so a failure anywhere drops the partial
//! result and no half-built class escapes.

use std::sync::Arc;

use tracing::debug;

use crate::class::{ClassBody, Schema};
use crate::field::{FieldDefault, FieldTable, TypeTag};
use crate::options::{OptionComposer, OptionOverrides, Options};
use crate::resolve::resolve;
use crate::result_ext::collect_errors;
use crate::synth::{MethodTable, SynthesisInput, synthesize};
use crate::{Attribute, Class, SynthError, SynthResult};

/// Stage marker: nothing resolved yet.
#[derive(Debug)]
pub struct Unconfigured {
    overrides: OptionOverrides,
}

/// Stage marker: options and fields resolved.
#[derive(Debug)]
pub struct FieldsResolved {
    options: Options,
    fields: FieldTable,
}

/// Stage marker: special methods generated.
#[derive(Debug)]
pub struct MethodsGenerated {
    options: Options,
    fields: FieldTable,
    methods: MethodTable,
}

/// One synthesis run over a class body.
///
/// ```rust
/// use record_synth::{ClassBody, OptionOverrides, Synthesis};
///
/// let mut body = ClassBody::new("Pair");
/// body.annotate("left", "int").annotate("right", "int");
/// let resolved = Synthesis::new(body, OptionOverrides::new().order(true)).resolve()?;
/// assert_eq!(resolved.fields().len(), 2);
/// let class = resolved.generate()?.seal();
/// assert_eq!(class.name(), "Pair");
/// # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
/// ```
#[derive(Debug)]
pub struct Synthesis<S> {
    body: ClassBody,
    state: S,
}

impl Synthesis<Unconfigured> {
    /// Start synthesis of `body` with the requested options.
    #[must_use]
    pub const fn new(body: ClassBody, overrides: OptionOverrides) -> Self {
        Self {
            body,
            state: Unconfigured { overrides },
        }
    }

    fn resolve_options(&self) -> SynthResult<Options> {
        let mut composer = OptionComposer::new();
        composer.push_defaults();
        for base in &self.body.bases {
            if let Some(options) = base.options() {
                composer.push_inherited(base.name(), options)?;
            }
        }
        composer.push_explicit(&self.state.overrides)?;
        composer.resolve()
    }

    /// Resolve options, then the field table.
    ///
    /// Options are validated before any field is examined.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Configuration`] or
    /// [`SynthError::OptionsDocument`] for inconsistent options and
    /// [`SynthError::Schema`] for invalid fields.
    pub fn resolve(self) -> SynthResult<Synthesis<FieldsResolved>> {
        let options = self.resolve_options()?;
        let fields = resolve(&self.body)?;
        debug!(
            class = %self.body.name,
            fields = fields.len(),
            "fields resolved"
        );
        Ok(Synthesis {
            body: self.body,
            state: FieldsResolved { options, fields },
        })
    }
}

impl Synthesis<FieldsResolved> {
    /// Resolved options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.state.options
    }

    /// Resolved field table.
    #[must_use]
    pub const fn fields(&self) -> &FieldTable {
        &self.state.fields
    }

    /// Run the Method Synthesizer.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Schema`] for an invalid constructor signature
    /// and [`SynthError::LayoutConflict`] for incompatible compact storage.
    pub fn generate(self) -> SynthResult<Synthesis<MethodsGenerated>> {
        let FieldsResolved { options, fields } = self.state;
        let methods = synthesize(&SynthesisInput {
            class: &self.body.name,
            fields: &fields,
            options: &options,
            namespace: &self.body.namespace,
            bases: &self.body.bases,
        })?;
        debug!(
            class = %self.body.name,
            generated = ?methods.names().collect::<Vec<_>>(),
            "methods generated"
        );
        Ok(Synthesis {
            body: self.body,
            state: MethodsGenerated {
                options,
                fields,
                methods,
            },
        })
    }
}

impl Synthesis<MethodsGenerated> {
    /// Generated methods.
    #[must_use]
    pub const fn methods(&self) -> &MethodTable {
        &self.state.methods
    }

    /// Seal the class.
    #[must_use]
    pub fn seal(self) -> Arc<Class> {
        let MethodsGenerated {
            options,
            fields,
            methods,
        } = self.state;
        debug!(class = %self.body.name, "class sealed");
        Arc::new(Class::sealed(
            self.body,
            Schema {
                fields,
                options,
                methods,
            },
        ))
    }
}

/// Synthesize a data class from `body`.
///
/// # Errors
///
/// Returns the first stage's failure; see [`Synthesis`].
pub fn dataclass(body: ClassBody, overrides: &OptionOverrides) -> SynthResult<Arc<Class>> {
    Ok(Synthesis::new(body, *overrides).resolve()?.generate()?.seal())
}

/// Synthesize a data class from a name, field types and defaults.
///
/// Field types become annotations in the given order; defaults become class
/// attributes. Fields without a default are required.
///
/// ```rust
/// use record_synth::{Arguments, OptionOverrides, Value, make_dataclass};
///
/// let point = make_dataclass(
///     "Point",
///     [("x", "int"), ("y", "int")],
///     [("y", Value::Int(0))],
///     &[],
///     &OptionOverrides::new(),
/// )?;
/// let p = point.construct(Arguments::new().arg(3))?;
/// assert_eq!(p.to_string(), "Point(x=3, y=0)");
/// # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
/// ```
///
/// # Errors
///
/// Returns [`SynthError::Schema`] for a default whose name has no type, and
/// any error [`dataclass`] reports.
pub fn make_dataclass<F, N, T, D, K, V>(
    name: impl Into<String>,
    fields: F,
    defaults: D,
    bases: &[Arc<Class>],
    overrides: &OptionOverrides,
) -> SynthResult<Arc<Class>>
where
    F: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    T: Into<TypeTag>,
    D: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldDefault>,
{
    let mut body = ClassBody::new(name);
    for base in bases {
        body.inherit(Arc::clone(base));
    }
    for (field, type_tag) in fields {
        body.annotate(field, type_tag);
    }

    let mut errors = Vec::new();
    for (field, default) in defaults {
        let field = field.into();
        if !body.annotations.iter().any(|(name, _)| *name == field) {
            errors.push(SynthError::schema_arc(
                &body.name,
                field,
                "default given for a field with no declared type",
            ));
            continue;
        }
        let attribute = match default.into() {
            FieldDefault::Value(value) => Attribute::Value(value),
            FieldDefault::Factory(factory) => Attribute::Factory(factory),
        };
        body.namespace.insert(field, attribute);
    }
    collect_errors(errors)?;
    dataclass(body, overrides)
}
