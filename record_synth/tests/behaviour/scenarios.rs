//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{SynthContext, synth_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/construction.feature",
    fixtures = [synth_context: SynthContext]
);
scenarios!(
    "tests/features/inheritance.feature",
    fixtures = [synth_context: SynthContext]
);
scenarios!(
    "tests/features/options.feature",
    fixtures = [synth_context: SynthContext]
);
