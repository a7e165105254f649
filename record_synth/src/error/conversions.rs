//! Trait-based conversions between external error types and `SynthError`.

use super::SynthError;

/// Convert JSON decoding failures of option documents into
/// [`SynthError::OptionsDocument`].
impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        Self::options_document(e)
    }
}

/// Convert TOML decoding failures of option documents into
/// [`SynthError::OptionsDocument`].
#[cfg(feature = "toml")]
impl From<toml::de::Error> for SynthError {
    fn from(e: toml::de::Error) -> Self {
        Self::options_document(e)
    }
}
