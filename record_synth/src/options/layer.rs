//! Layer metadata for option resolution.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// Where an option layer came from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum OptionProvenance {
    /// The built-in defaults.
    Defaults,
    /// The resolved options of the named data-class base.
    Inherited(String),
    /// Options requested for the class being synthesized.
    Explicit,
}

impl fmt::Display for OptionProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("defaults"),
            Self::Inherited(base) => write!(f, "base {base}"),
            Self::Explicit => f.write_str("explicit options"),
        }
    }
}

/// One JSON object of option values plus its provenance.
#[derive(Clone, Debug)]
pub struct OptionLayer<'a> {
    provenance: OptionProvenance,
    value: Cow<'a, Value>,
}

impl<'a> OptionLayer<'a> {
    /// Construct a defaults layer.
    #[must_use]
    pub const fn defaults(value: Cow<'a, Value>) -> Self {
        Self {
            provenance: OptionProvenance::Defaults,
            value,
        }
    }

    /// Construct a layer inherited from `base`.
    #[must_use]
    pub fn inherited(value: Cow<'a, Value>, base: impl Into<String>) -> Self {
        Self {
            provenance: OptionProvenance::Inherited(base.into()),
            value,
        }
    }

    /// Construct a layer of explicitly requested options.
    #[must_use]
    pub const fn explicit(value: Cow<'a, Value>) -> Self {
        Self {
            provenance: OptionProvenance::Explicit,
            value,
        }
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> &OptionProvenance {
        &self.provenance
    }

    /// Borrow the layer's JSON value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns an owned JSON value representing the layer.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value.into_owned()
    }

    /// Convert this layer into a `'static` owned variant.
    #[must_use]
    pub fn into_owned(self) -> OptionLayer<'static> {
        OptionLayer {
            provenance: self.provenance,
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}
