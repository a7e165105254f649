//! Record-type synthesis for dynamic classes.
//!
//! `record_synth` turns a declared class body into a data class: a class
//! carrying a generated constructor, representation, equality, ordering,
//! hash, iteration, structural-match names, immutability guard and compact
//! storage layout, each gated by one option.
//!
//! Classes are assembled at runtime. Declare a [`ClassBody`] and pass it to
//! [`dataclass`], build one from mappings with [`make_dataclass`], or derive
//! [`DataClass`] on a Rust struct to declare the body statically.
//!
//! ```rust
//! use record_synth::{Arguments, ClassBody, OptionOverrides, Value, dataclass};
//!
//! let mut body = ClassBody::new("Version");
//! body.annotate("major", "int")
//!     .annotate("minor", "int")
//!     .assign("minor", 0);
//! let version = dataclass(body, &OptionOverrides::new().order(true).frozen(true))?;
//!
//! let a = version.construct(Arguments::new().arg(1))?;
//! let b = version.construct(Arguments::new().arg(1).kwarg("minor", 2))?;
//! assert_eq!(a.to_string(), "Version(major=1, minor=0)");
//! assert!(a.lt(&b)?);
//! assert_eq!(a.hash_value()?, version.construct(Arguments::new().arg(1))?.hash_value()?);
//! # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
//! ```
//!
//! # Options
//!
//! | option | effect |
//! |---|---|
//! | `init` | generate the constructor (default on) |
//! | `repr` | generate `Name(field=value, ...)` (default on) |
//! | `eq` | generate field-wise equality (default on) |
//! | `frozen` | reject assignment after construction |
//! | `order` | generate lexicographic ordering; requires `eq` |
//! | `unsafe_hash` | generate a hash even on a mutable class |
//! | `match_args` | expose field names for positional matching |
//! | `kw_only` | make every constructor parameter keyword-only |
//! | `kwargs` | accept and keep extra keyword arguments |
//! | `slots` | declare a fixed storage layout |
//! | `iter` | iterate field values |
//! | `hide_internals` | omit `_`-prefixed fields from the representation |
//!
//! Options a class does not set are inherited from its data-class bases.

use std::sync::Arc;

mod class;
mod error;
mod field;
mod instance;
mod introspect;
pub mod options;
mod pipeline;
mod resolve;
mod result_ext;
pub mod synth;
mod value;

pub use class::{Attribute, Class, ClassBody, Layout, Method, PostInit};
pub use error::{AggregatedErrors, SynthError, is_synthesis_error};
pub use field::{Factory, Field, FieldDefault, FieldTable, INTERNAL_PREFIX, TypeTag};
pub use instance::{Arguments, Instance};
pub use introspect::{as_dict, as_tuple, fields, is_dataclass, replace, signature, values};
pub use options::{OptionOverrides, Options};
pub use pipeline::{
    FieldsResolved, MethodsGenerated, Synthesis, Unconfigured, dataclass, make_dataclass,
};
pub use record_synth_macros::DataClass;
pub use resolve::resolve;
pub use result_ext::{SynthResultExt, collect_errors};
pub use value::Value;

/// Result type used throughout the crate.
pub type SynthResult<T> = Result<T, Arc<SynthError>>;

/// A Rust type that declares a data class.
///
/// Implemented by `#[derive(DataClass)]`.
///
/// ```rust
/// use record_synth::{Arguments, DataClass, DeclaredClass};
///
/// #[derive(DataClass)]
/// #[dataclass(frozen)]
/// struct Point {
///     x: i64,
///     #[dataclass(default = 0)]
///     y: i64,
/// }
///
/// let class = Point::data_class()?;
/// let p = class.construct(Arguments::new().arg(3))?;
/// assert_eq!(p.to_string(), "Point(x=3, y=0)");
/// # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
/// ```
pub trait DeclaredClass {
    /// The declared class body.
    ///
    /// # Errors
    ///
    /// Propagates synthesis failures of declared data-class bases.
    fn class_body() -> SynthResult<ClassBody>;

    /// Options requested by the declaration.
    fn options() -> OptionOverrides;

    /// The synthesized class, built once per process.
    ///
    /// # Errors
    ///
    /// Returns the synthesis failure, every time it is asked for.
    fn data_class() -> SynthResult<Arc<Class>>;
}
