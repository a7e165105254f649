//! Behavioural step modules registered with `rstest-bdd`.

pub mod class_steps;
pub mod helpers;
pub mod instance_steps;
