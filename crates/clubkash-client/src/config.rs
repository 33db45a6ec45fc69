//! Client configuration and credentials.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::Transport;

/// Default vendor API base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.nellobytesystems.com/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Construction-time options for [`ClubkashClient`](crate::ClubkashClient).
///
/// Can be deserialized from a config document; every field is optional and
/// falls back to its default. The transport is never deserialized.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the vendor API (default: `https://www.nellobytesystems.com/`).
    /// A trailing `/` is appended if missing.
    pub base_url: String,

    /// Request timeout in seconds (default: 30). Zero disables the timeout.
    pub timeout_seconds: u64,

    /// Bearer token to use from the first request on. A blank token is
    /// ignored and the credentials are used instead.
    pub token: Option<String>,

    /// Transport override, mainly for tests. Defaults to [`HttpTransport`](crate::HttpTransport).
    #[serde(skip)]
    pub transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            token: None,
            transport: None,
        }
    }
}

impl ClientConfig {
    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Start with a pre-issued bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Send requests through a custom transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// The base URL, trimmed and ending with `/`.
    pub(crate) fn normalized_base_url(&self) -> Result<String, ApiError> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(ApiError::configuration("base URL is empty", None));
        }

        let mut base_url = trimmed.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        reqwest::Url::parse(&base_url).map_err(|e| {
            ApiError::configuration(format!("invalid base URL {base_url:?}"), Some(Box::new(e)))
        })?;

        Ok(base_url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .finish()
    }
}

/// The legacy UserID/APIKey pair.
///
/// Always held by the client and sent as query parameters whenever no bearer
/// token is available.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    api_key: String,
}

impl Credentials {
    /// Create a credential pair.
    #[must_use]
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            api_key: api_key.into(),
        }
    }

    /// The vendor user id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
