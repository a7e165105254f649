//! Shared fixtures for the behavioural scenarios.

use std::collections::BTreeMap;
use std::sync::Arc;

use record_synth::{Class, ClassBody, Instance, SynthError, Value};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// A class being declared by `Given` steps.
#[derive(Clone, Default)]
pub struct Declaration {
    pub name: String,
    pub bases: Vec<Arc<Class>>,
    pub fields: Vec<(String, String, Option<Value>)>,
}

impl Declaration {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    pub fn into_body(self) -> ClassBody {
        let mut body = ClassBody::new(self.name);
        for base in self.bases {
            body.inherit(base);
        }
        for (field, type_tag, default) in self.fields {
            body.annotate(field.as_str(), type_tag);
            if let Some(value) = default {
                body.assign(field, value);
            }
        }
        body
    }
}

/// State shared between the steps of one scenario.
#[derive(Default, ScenarioState)]
pub struct SynthContext {
    pub declaration: Slot<Declaration>,
    pub classes: Slot<BTreeMap<String, Arc<Class>>>,
    pub class: Slot<Arc<Class>>,
    pub instance: Slot<Instance>,
    pub error: Slot<Arc<SynthError>>,
}

/// Creates a clean context for each scenario.
#[fixture]
pub fn synth_context() -> SynthContext {
    SynthContext::default()
}
