//! Primary error enum for synthesis and instance operations.

use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors raised by the synthesis pipeline and by synthesized instances.
///
/// Synthesis-time variants (`Schema`, `LayoutConflict`, `Configuration`,
/// `OptionsDocument`) abort class creation. The remaining variants surface at
/// the point of use on an already-sealed class.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// A field declaration conflicts with an inherited or sibling declaration.
    #[error("schema error in class '{class}' for field '{field}': {message}")]
    Schema {
        /// Class being synthesized.
        class: String,
        /// Field whose declaration is invalid.
        field: String,
        /// Human-readable explanation of the conflict.
        message: String,
    },

    /// Compact storage cannot produce a consistent layout for the chain.
    #[error(
        "layout conflict in class '{class}': bases '{first}' and '{second}' both store {overlap:?}"
    )]
    LayoutConflict {
        /// Class being synthesized.
        class: String,
        /// First base declaring compact storage.
        first: String,
        /// Second base declaring compact storage.
        second: String,
        /// Slot names stored by both bases.
        overlap: Vec<String>,
    },

    /// Attempt to reassign an attribute on a frozen instance.
    #[error("cannot assign to field '{field}' of frozen instance of '{class}'")]
    ImmutableField {
        /// Class of the frozen instance.
        class: String,
        /// Attribute the caller tried to assign.
        field: String,
    },

    /// Logically inconsistent option combination.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// Human-readable explanation of the inconsistency.
        message: String,
    },

    /// An option document could not be decoded.
    #[error("invalid option document: {source}")]
    OptionsDocument {
        /// Underlying decoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The generated constructor rejected its arguments.
    #[error("{class}() {message}")]
    Construction {
        /// Class being constructed.
        class: String,
        /// Description of the rejected arguments.
        message: String,
    },

    /// Ordering comparison between values or instances of incompatible kinds.
    #[error("'{op}' not supported between '{left}' and '{right}'")]
    ComparisonTypeMismatch {
        /// Comparison operator symbol.
        op: &'static str,
        /// Kind of the left operand.
        left: String,
        /// Kind of the right operand.
        right: String,
    },

    /// The class was synthesized without the requested behaviour.
    #[error("'{class}' does not support {operation}")]
    NotSupported {
        /// Class lacking the behaviour.
        class: String,
        /// Operation the caller attempted.
        operation: &'static str,
    },

    /// The class defines equality without a hash.
    #[error("unhashable type: '{class}'")]
    Unhashable {
        /// Class of the unhashable instance.
        class: String,
    },

    /// Lookup or assignment of an attribute the instance cannot hold.
    #[error("'{class}' object has no attribute '{name}'")]
    UnknownAttribute {
        /// Class of the instance.
        class: String,
        /// Missing attribute name.
        name: String,
    },

    /// A user-defined method reported a failure.
    #[error("method '{method}' of '{class}' failed: {message}")]
    Method {
        /// Class owning the method.
        class: String,
        /// Method name.
        method: String,
        /// Failure description supplied by the method.
        message: String,
    },

    /// Multiple errors were found while validating one class.
    #[error("multiple synthesis errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
