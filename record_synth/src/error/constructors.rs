//! Constructors and aggregation helpers for `SynthError`.

use std::sync::Arc;

use super::{AggregatedErrors, SynthError};

impl SynthError {
    /// Tries to build a [`SynthError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Construct a schema error for `field` of `class`.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_synth::SynthError;
    /// let e = SynthError::schema("Point", "x", "collides with method");
    /// assert!(matches!(e, SynthError::Schema { .. }));
    /// ```
    #[must_use]
    pub fn schema(
        class: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Schema {
            class: class.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Construct a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Construct a constructor-argument error for `class`.
    #[must_use]
    pub fn construction(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Construct an unsupported-operation error for `class`.
    #[must_use]
    pub fn not_supported(class: impl Into<String>, operation: &'static str) -> Self {
        Self::NotSupported {
            class: class.into(),
            operation,
        }
    }

    /// Construct a comparison mismatch error for operator `op`.
    #[must_use]
    pub fn comparison(op: &'static str, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::ComparisonTypeMismatch {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Wrap an option-document decoding failure.
    #[must_use]
    pub fn options_document<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::OptionsDocument {
            source: Box::new(source),
        }
    }

    /// Construct a schema error wrapped in an [`Arc`].
    ///
    /// Validation passes collect `Arc<SynthError>` values before aggregating
    /// them, so this saves the extra wrapping at each call site.
    #[must_use]
    pub fn schema_arc(
        class: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::schema(class, field, message))
    }
}
