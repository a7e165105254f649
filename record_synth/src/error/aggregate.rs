//! Aggregation container and iteration support for multiple `SynthError` values.

use std::{error::Error, fmt, sync::Arc};

use super::SynthError;

/// Collection of [`SynthError`]s produced while validating a single class.
///
/// # Examples
///
/// ```
/// use record_synth::SynthError;
/// let e = SynthError::try_aggregate(vec![
///     SynthError::Configuration { message: "order requires eq".into() },
///     SynthError::Unhashable { class: "Point".into() },
/// ]);
/// if let Some(SynthError::Aggregate(agg)) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<SynthError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<SynthError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &SynthError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a SynthError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<SynthError>>,
        fn(&'a Arc<SynthError>) -> &'a SynthError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<SynthError>;
    type IntoIter = std::vec::IntoIter<Arc<SynthError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
