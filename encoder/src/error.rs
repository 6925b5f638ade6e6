//! Encoding errors

use thiserror::Error;

/// Failure surfaced by an encoding operation.
///
/// Encoding never panics and never swallows a failure: malformed input is
/// reported back to the caller together with the value that caused it.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A decimal-string input contained something other than digits, or was
    /// empty.
    #[error("failed to parse {input:?} as a non-negative decimal integer")]
    Parse {
        /// The string that failed to parse.
        input: String,
    },

    /// A size or count argument was outside its valid range.
    #[error("{0}")]
    InvalidArgument(String),

    /// The operating system entropy source failed.
    #[error("entropy source failed: {0}")]
    Entropy(#[from] getrandom::Error),

    /// A circuit input could not be serialized for a backend.
    #[error("failed to serialize circuit input: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EncodeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
