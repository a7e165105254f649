//! Error types produced while synthesizing classes and operating on instances.

mod aggregate;
mod constructors;
mod conversions;
mod helpers;
mod types;

pub use helpers::is_synthesis_error;
pub use types::SynthError;

pub use aggregate::AggregatedErrors;
