//! HTTP transport seam.
//!
//! The client never talks to `reqwest` directly. It hands a fully built
//! [`ApiRequest`] to a [`Transport`], which makes it possible to swap in
//! [`ScriptedTransport`] when testing code that uses the client.

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Errors produced by a [`Transport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP layer failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server responded with HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Any other failure, typically raised by a custom transport.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// The HTTP status associated with the failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Other(_) => None,
        }
    }

    /// The response body associated with the failure, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// An outgoing request, fully resolved by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method. The vendor API only accepts GET.
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Endpoint path relative to the base URL, e.g. `APIAirtimeV1.asp`.
    pub endpoint: String,
    /// Query parameters in the order they are sent.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// First value of a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Sends a single request and returns the raw response.
///
/// Implementations must report non-2xx statuses as
/// [`TransportError::Status`] so that callers see them as failures.
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    /// Send the request once.
    async fn send(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError>;
}

/// The default transport, backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport whose requests time out after `timeout`.
    ///
    /// A zero `timeout` disables the timeout and waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client, keeping its settings.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // The URL carries UserID/APIKey; keep it out of error messages.
        let response = builder.send().await.map_err(strip_url)?;
        let status = response.status();
        let body = response.text().await.map_err(strip_url)?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn strip_url(err: reqwest::Error) -> TransportError {
    TransportError::Http(err.without_url())
}

/// A transport that replays queued responses and records every request.
///
/// Responses are consumed in FIFO order. Queued non-2xx statuses are
/// reported as [`TransportError::Status`], matching [`HttpTransport`].
/// Sending with an empty queue fails with [`TransportError::Other`].
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and raw body.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        let body = body.into();
        let entry = if (200..300).contains(&status) {
            Ok(TransportResponse { status, body })
        } else {
            Err(TransportError::Status { status, body })
        };
        self.queue().push_back(entry);
    }

    /// Queue a 200 response whose body is the given JSON value.
    pub fn push_json(&self, body: &serde_json::Value) {
        self.push_response(200, body.to_string());
    }

    /// Queue a transport failure.
    pub fn push_error(&self, err: TransportError) {
        self.queue().push_back(Err(err));
    }

    /// Every request sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Result<TransportResponse, TransportError>>> {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.queue()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response queued".into())))
    }
}
