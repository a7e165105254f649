//! Helpers shared by the step modules.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use record_synth::{Class, OptionOverrides, SynthError, SynthResult, dataclass};
use serde_json::{Map, Value as Json};

use crate::fixtures::SynthContext;

/// Read an option list such as `frozen, eq=false` into overrides.
///
/// Bare names enable an option. Values other than `true` and `false` are
/// passed through as strings so the option document rejects them.
pub fn parse_options(text: &str) -> SynthResult<OptionOverrides> {
    let mut document = Map::new();
    for item in text.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (key, value) = match item.split_once('=') {
            Some((key, "true")) => (key, Json::Bool(true)),
            Some((key, "false")) => (key, Json::Bool(false)),
            Some((key, other)) => (key, Json::String(other.to_owned())),
            None => (item, Json::Bool(true)),
        };
        document.insert(key.trim().to_owned(), value);
    }
    OptionOverrides::from_json(Json::Object(document))
}

/// Synthesize the class under declaration and register it by name.
pub fn synthesize(synth_context: &SynthContext, options: &str) -> Result<SynthResult<Arc<Class>>> {
    let declaration = synth_context
        .declaration
        .take()
        .ok_or_else(|| anyhow!("no class is being declared"))?;
    let name = declaration.name.clone();
    let result = parse_options(options).and_then(|overrides| dataclass(declaration.into_body(), &overrides));
    if let Ok(class) = &result {
        let mut classes = synth_context.classes.take().unwrap_or_default();
        classes.insert(name, Arc::clone(class));
        synth_context.classes.set(classes);
        synth_context.class.set(Arc::clone(class));
    }
    Ok(result)
}

/// The error recorded by an earlier step.
pub fn recorded_error(synth_context: &SynthContext) -> Result<Arc<SynthError>> {
    synth_context
        .error
        .get()
        .ok_or_else(|| anyhow!("expected an earlier step to fail"))
}

/// The most recently synthesized class.
pub fn current_class(synth_context: &SynthContext) -> Result<Arc<Class>> {
    synth_context
        .class
        .get()
        .ok_or_else(|| anyhow!("no class has been synthesized"))
}
