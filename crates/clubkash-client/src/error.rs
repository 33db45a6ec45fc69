//! Client error types.

use std::fmt;

use clubkash_core::CoreError;

use crate::transport::TransportError;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Where an [`ApiError`] originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request could not be completed: connection failure, timeout, or
    /// a non-2xx HTTP status.
    Transport,
    /// The response body was not a JSON object or array.
    ResponseFormat,
    /// The client could not be constructed from the given configuration.
    Configuration,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Transport => "transport",
            Self::ResponseFormat => "response format",
            Self::Configuration => "configuration",
        })
    }
}

/// The single error type returned by every client operation.
///
/// Carries a human-readable message, an optional numeric code (the HTTP
/// status when the server answered) and the underlying cause, reachable
/// through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    code: Option<u16>,
    body: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl ApiError {
    /// Wrap a transport failure.
    pub(crate) fn transport(err: TransportError) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: format!("API request failed: {err}"),
            code: err.status(),
            body: err.body().map(str::to_string),
            source: Some(Box::new(err)),
        }
    }

    /// Wrap a body that could not be decoded, keeping the raw text.
    pub(crate) fn response_format(body: String, err: CoreError) -> Self {
        Self {
            kind: ApiErrorKind::ResponseFormat,
            message: format!("failed to decode JSON response: {body}"),
            code: None,
            body: Some(body),
            source: Some(Box::new(err)),
        }
    }

    /// Reject an unusable configuration.
    pub(crate) fn configuration(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self {
            kind: ApiErrorKind::Configuration,
            message: format!("invalid client configuration: {}", message.into()),
            code: None,
            body: None,
            source,
        }
    }

    /// What kind of failure this is.
    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status code, when the server responded.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        self.code
    }

    /// The raw response body, for undecodable or non-2xx responses.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
