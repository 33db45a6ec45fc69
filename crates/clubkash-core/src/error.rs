//! Error types for the core crate.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while parsing vendor codes or decoding response bodies.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A vendor code string did not match any known value.
    #[error("unknown {kind} code: {code}")]
    UnknownCode {
        /// The code family (e.g. "mobile network").
        kind: &'static str,
        /// The rejected input.
        code: String,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The response body was valid JSON but not an object or array.
    #[error("expected a JSON object or array, got {0}")]
    UnexpectedShape(&'static str),
}
