//! Extensions for mapping errors to `SynthResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(SynthError::from(e)))`
//! patterns when converting external error types into the crate's
//! `SynthResult<T>` alias (`Result<T, Arc<SynthError>>`).
//!
//! # Examples
//!
//! ```
//! use record_synth::{OptionOverrides, SynthResult, SynthResultExt};
//!
//! fn decode(doc: serde_json::Value) -> SynthResult<OptionOverrides> {
//!     // serde_json::Error implements Into<SynthError>
//!     serde_json::from_value(doc).into_synth()
//! }
//! # assert!(decode(serde_json::json!({"frozen": true})).is_ok());
//! ```

use std::sync::Arc;

use crate::{SynthError, SynthResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<SynthError>`
/// into a `SynthResult<T>`.
pub trait SynthResultExt<T, E> {
    /// Convert `Result<T, E>` into `SynthResult<T>` using `Into<SynthError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<SynthError>`.
    fn into_synth(self) -> SynthResult<T>;
}

impl<T, E> SynthResultExt<T, E> for Result<T, E>
where
    E: Into<SynthError>,
{
    fn into_synth(self) -> SynthResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Collapse a list of validation failures into a single result.
///
/// Returns `Ok(())` when `errors` is empty, the lone error when there is one,
/// and an aggregate otherwise.
///
/// # Errors
///
/// Returns the collected errors as described above.
pub fn collect_errors(errors: Vec<Arc<SynthError>>) -> SynthResult<()> {
    match SynthError::try_aggregate(errors) {
        None => Ok(()),
        Some(err) => Err(Arc::new(err)),
    }
}
