//! Accumulates option layers and resolves them in order.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::trace;

use crate::{SynthError, SynthResult, SynthResultExt};

use super::{OptionLayer, OptionOverrides, OptionProvenance, Options, from_value, merge_value};

/// Builder that accumulates [`OptionLayer`] instances.
///
/// ```rust
/// use record_synth::options::{OptionComposer, OptionOverrides, Options};
///
/// let base = Options { frozen: true, ..Options::default() };
/// let mut composer = OptionComposer::new();
/// composer.push_defaults();
/// composer.push_inherited("Base", &base)?;
/// composer.push_explicit(&OptionOverrides::new().order(true))?;
///
/// let options = composer.resolve()?;
/// assert!(options.frozen && options.order);
/// # Ok::<_, std::sync::Arc<record_synth::SynthError>>(())
/// ```
#[derive(Debug, Default)]
pub struct OptionComposer {
    layers: Vec<OptionLayer<'static>>,
}

impl OptionComposer {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Push the built-in defaults.
    pub fn push_defaults(&mut self) {
        let value = serde_json::to_value(Options::default())
            .unwrap_or_else(|_| Value::Object(Map::new()));
        self.push_layer(OptionLayer::defaults(Cow::Owned(value)));
    }

    /// Push the resolved options of a data-class base.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::OptionsDocument`] if serialization fails.
    pub fn push_inherited(&mut self, base: &str, options: &Options) -> SynthResult<()> {
        let value = serde_json::to_value(options).into_synth()?;
        self.push_layer(OptionLayer::inherited(Cow::Owned(value), base));
        Ok(())
    }

    /// Push explicitly requested options.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::OptionsDocument`] if serialization fails.
    pub fn push_explicit(&mut self, overrides: &OptionOverrides) -> SynthResult<()> {
        let value = overrides.to_layer_value()?;
        self.push_layer(OptionLayer::explicit(Cow::Owned(value)));
        Ok(())
    }

    /// Push an arbitrary layer.
    pub fn push_layer(&mut self, layer: OptionLayer<'static>) {
        self.layers.push(layer);
    }

    /// Borrow the accumulated layers.
    #[must_use]
    pub fn layers(&self) -> &[OptionLayer<'static>] {
        &self.layers
    }

    /// Overlay every layer in push order and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::OptionsDocument`] when a layer holds an unknown
    /// key or a non-boolean value, and [`SynthError::Configuration`] when the
    /// resolved options are inconsistent. The configuration error names the
    /// layer that last enabled `order`.
    pub fn resolve(self) -> SynthResult<Options> {
        let mut merged = Value::Object(Map::new());
        let mut order_source: Option<OptionProvenance> = None;
        for layer in self.layers {
            if layer.value().get("order").and_then(Value::as_bool) == Some(true) {
                order_source = Some(layer.provenance().clone());
            }
            trace!(provenance = %layer.provenance(), "overlaying option layer");
            merge_value(&mut merged, layer.into_value());
        }
        let options: Options = from_value(merged)?;
        if let Err(err) = options.validate() {
            return Err(order_source.map_or(err, |source| {
                SynthError::configuration(format!("order requires eq (order set by {source})"))
                    .into()
            }));
        }
        Ok(options)
    }
}

impl IntoIterator for OptionComposer {
    type Item = OptionLayer<'static>;
    type IntoIter = std::vec::IntoIter<OptionLayer<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}
