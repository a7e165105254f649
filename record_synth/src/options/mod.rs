//! Synthesis options and their layered resolution.
//!
//! A class's options are resolved once, before any method is generated, from
//! an ordered sequence of layers: the built-in defaults, the resolved
//! options of each data-class base (left to right), and the options the
//! caller requested explicitly. Layers are carried as JSON objects and
//! overlaid key by key, so a later layer only replaces the keys it sets.
//!
//! # Example
//!
//! ```rust
//! use record_synth::options::{OptionComposer, OptionOverrides};
//!
//! let mut composer = OptionComposer::new();
//! composer.push_defaults();
//! composer.push_explicit(&OptionOverrides::new().frozen(true))?;
//!
//! let options = composer.resolve()?;
//! assert!(options.frozen);
//! assert!(options.eq);
//! # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
//! ```

mod composer;
mod layer;
mod merge;

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Serialize};

use crate::{SynthError, SynthResult, SynthResultExt};

pub use composer::OptionComposer;
pub use layer::{OptionLayer, OptionProvenance};
pub use merge::{from_value, merge_value};

/// Fully resolved options of one class.
///
/// See the crate documentation for the effect of each flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag gates one independent generator"
)]
pub struct Options {
    /// Generate a constructor.
    pub init: bool,
    /// Generate a representation.
    pub repr: bool,
    /// Generate equality.
    pub eq: bool,
    /// Forbid reassignment after construction.
    pub frozen: bool,
    /// Generate ordering comparators; requires `eq`.
    pub order: bool,
    /// Generate a hash even when `frozen` does not imply one.
    pub unsafe_hash: bool,
    /// Emit the structural-match field names.
    pub match_args: bool,
    /// Make every constructor parameter keyword-only.
    pub kw_only: bool,
    /// Accept and store extra keyword arguments.
    pub kwargs: bool,
    /// Generate a fixed storage layout.
    pub slots: bool,
    /// Generate field-value iteration.
    pub iter: bool,
    /// Omit internal fields from the representation.
    pub hide_internals: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            init: true,
            repr: true,
            eq: true,
            frozen: false,
            order: false,
            unsafe_hash: false,
            match_args: false,
            kw_only: false,
            kwargs: false,
            slots: false,
            iter: false,
            hide_internals: false,
        }
    }
}

/// How instances of a class hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashMode {
    /// A field-tuple hash is generated.
    Generated,
    /// Instances hash by identity, consistent with identity equality.
    Identity,
    /// Equality is generated without a hash; hashing fails.
    Unhashable,
}

impl Options {
    /// Check option interactions.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::Configuration`] when `order` is requested
    /// without `eq`.
    pub fn validate(&self) -> SynthResult<()> {
        if self.order && !self.eq {
            return Err(SynthError::configuration("order requires eq").into());
        }
        Ok(())
    }

    /// Hash behaviour implied by these options.
    #[must_use]
    pub const fn hash_mode(&self) -> HashMode {
        if self.unsafe_hash || (self.frozen && self.eq) {
            HashMode::Generated
        } else if self.eq {
            HashMode::Unhashable
        } else {
            HashMode::Identity
        }
    }
}

macro_rules! override_setters {
    ($($flag:ident),* $(,)?) => {
        impl OptionOverrides {
            $(
                #[doc = concat!("Request `", stringify!($flag), "`.")]
                #[must_use]
                pub const fn $flag(mut self, on: bool) -> Self {
                    self.$flag = Some(on);
                    self
                }
            )*
        }
    };
}

/// Options requested by a caller; unset entries inherit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    init: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eq: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frozen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unsafe_hash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    match_args: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kw_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kwargs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slots: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hide_internals: Option<bool>,
}

override_setters!(
    init,
    repr,
    eq,
    frozen,
    order,
    unsafe_hash,
    match_args,
    kw_only,
    kwargs,
    slots,
    iter,
    hide_internals,
);

impl OptionOverrides {
    /// Create an empty set of overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            init: None,
            repr: None,
            eq: None,
            frozen: None,
            order: None,
            unsafe_hash: None,
            match_args: None,
            kw_only: None,
            kwargs: None,
            slots: None,
            iter: None,
            hide_internals: None,
        }
    }

    /// Decode overrides from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::OptionsDocument`] when the document is not an
    /// object, and for unknown keys or non-boolean values.
    pub fn from_json(value: serde_json::Value) -> SynthResult<Self> {
        if !value.is_object() {
            let err = serde_json::Error::invalid_type(
                Unexpected::Other(json_kind(&value)),
                &"an object of option flags",
            );
            return Err(SynthError::options_document(err).into());
        }
        serde_json::from_value(value).into_synth()
    }

    /// Decode overrides from TOML text.
    ///
    /// ```rust
    /// use record_synth::OptionOverrides;
    ///
    /// let overrides = OptionOverrides::from_toml_str("frozen = true\norder = true")?;
    /// assert_eq!(overrides, OptionOverrides::new().frozen(true).order(true));
    /// # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::OptionsDocument`] for malformed TOML, unknown
    /// keys or non-boolean values.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(text: &str) -> SynthResult<Self> {
        toml::from_str(text).into_synth()
    }

    /// Whether no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// JSON object holding only the set entries.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::OptionsDocument`] if serialization fails.
    pub fn to_layer_value(&self) -> SynthResult<serde_json::Value> {
        serde_json::to_value(self).into_synth()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
