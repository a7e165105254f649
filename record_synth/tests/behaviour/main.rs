//! Behavioural tests for `record_synth` using `rstest-bdd`.
//!
//! Step implementations live under [`steps`], while [`scenarios`] binds the
//! `.feature` files under `tests/features` to the shared fixtures.

mod fixtures;
mod scenarios;
mod steps;
