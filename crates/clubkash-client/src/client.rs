//! Clubkash VTU API client implementation.

use reqwest::Method;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use clubkash_core::{ApiResponse, RequestId};

use crate::config::{ClientConfig, Credentials};
use crate::error::ApiError;
use crate::transport::{ApiRequest, HttpTransport, Transport};

const WALLET_BALANCE_ENDPOINT: &str = "APIWalletBalanceV1.asp";
const AIRTIME_ENDPOINT: &str = "APIAirtimeV1.asp";
const DATA_BUNDLE_ENDPOINT: &str = "APIDatabundleV1.asp";
const CABLE_TV_ENDPOINT: &str = "APICableTVV1.asp";
const ELECTRICITY_ENDPOINT: &str = "APIElectricityV1.asp";
const TOKEN_ENDPOINT: &str = "APIToken.asp";

/// Clubkash (Nellobytes) VTU API client.
///
/// Every operation issues exactly one GET request with all parameters in the
/// query string, and returns the decoded JSON body without interpreting it.
/// Checking the vendor `status` field is left to the caller.
///
/// Authentication uses the bearer token when one is held (from
/// [`ClientConfig::token`] or a successful [`authenticate`](Self::authenticate)),
/// and falls back to `UserID`/`APIKey` query parameters otherwise. The token
/// sits behind a lock, so a client can be shared across tasks via `Arc`.
pub struct ClubkashClient {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    token: RwLock<Option<String>>,
    transport: Arc<dyn Transport>,
}

impl ClubkashClient {
    /// Create a client against the default vendor URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(user_id, api_key, ClientConfig::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is empty or malformed,
    /// or if the HTTP client cannot be built.
    pub fn with_config(
        user_id: impl Into<String>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, ApiError> {
        let base_url = config.normalized_base_url()?;
        let token = config.token.filter(|token| !token.trim().is_empty());
        let timeout = Duration::from_secs(config.timeout_seconds);

        let transport: Arc<dyn Transport> = match config.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(timeout).map_err(|e| {
                ApiError::configuration("failed to build HTTP client", Some(Box::new(e)))
            })?),
        };

        tracing::debug!(
            base_url = %base_url,
            timeout_seconds = config.timeout_seconds,
            has_token = token.is_some(),
            "Created Clubkash client"
        );

        Ok(Self {
            credentials: Credentials::new(user_id, api_key),
            base_url,
            timeout,
            token: RwLock::new(token),
            transport,
        })
    }

    /// The normalized base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured request timeout. Zero means no timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The bearer token currently in use, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Get the wallet balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get_wallet_balance(&self) -> Result<ApiResponse, ApiError> {
        self.request(WALLET_BALANCE_ENDPOINT, Vec::new()).await
    }

    /// Purchase airtime.
    ///
    /// `network` is a [`MobileNetwork`](clubkash_core::MobileNetwork) or its
    /// raw code. A fresh [`RequestId`] is generated when `request_id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn purchase_airtime(
        &self,
        network: impl AsRef<str>,
        amount: f64,
        mobile_number: impl AsRef<str>,
        request_id: Option<RequestId>,
    ) -> Result<ApiResponse, ApiError> {
        let params = vec![
            ("MobileNetwork", network.as_ref().to_string()),
            ("Amount", format_amount(amount)),
            ("MobileNumber", mobile_number.as_ref().to_string()),
            ("RequestID", resolve_request_id(request_id)),
        ];
        self.request(AIRTIME_ENDPOINT, params).await
    }

    /// Purchase a data bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn purchase_data(
        &self,
        network: impl AsRef<str>,
        data_plan: impl AsRef<str>,
        mobile_number: impl AsRef<str>,
        request_id: Option<RequestId>,
    ) -> Result<ApiResponse, ApiError> {
        let params = vec![
            ("MobileNetwork", network.as_ref().to_string()),
            ("DataPlan", data_plan.as_ref().to_string()),
            ("MobileNumber", mobile_number.as_ref().to_string()),
            ("RequestID", resolve_request_id(request_id)),
        ];
        self.request(DATA_BUNDLE_ENDPOINT, params).await
    }

    /// Purchase a cable TV subscription.
    ///
    /// `provider` is a [`CableTv`](clubkash_core::CableTv) or its raw code;
    /// `smart_card_no` is the SmartCard/IUC number.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn purchase_cable_tv(
        &self,
        provider: impl AsRef<str>,
        package: impl AsRef<str>,
        smart_card_no: impl AsRef<str>,
        phone_no: impl AsRef<str>,
        request_id: Option<RequestId>,
    ) -> Result<ApiResponse, ApiError> {
        let params = vec![
            ("CableTV", provider.as_ref().to_string()),
            ("Package", package.as_ref().to_string()),
            ("SmartCardNo", smart_card_no.as_ref().to_string()),
            ("PhoneNo", phone_no.as_ref().to_string()),
            ("RequestID", resolve_request_id(request_id)),
        ];
        self.request(CABLE_TV_ENDPOINT, params).await
    }

    /// Purchase an electricity token or pay a postpaid bill.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn purchase_electricity(
        &self,
        company: impl AsRef<str>,
        meter_no: impl AsRef<str>,
        meter_type: impl AsRef<str>,
        amount: f64,
        phone_no: impl AsRef<str>,
        request_id: Option<RequestId>,
    ) -> Result<ApiResponse, ApiError> {
        let params = vec![
            ("ElectricCompany", company.as_ref().to_string()),
            ("MeterNo", meter_no.as_ref().to_string()),
            ("MeterType", meter_type.as_ref().to_string()),
            ("Amount", format_amount(amount)),
            ("PhoneNo", phone_no.as_ref().to_string()),
            ("RequestID", resolve_request_id(request_id)),
        ];
        self.request(ELECTRICITY_ENDPOINT, params).await
    }

    /// Exchange the UserID/APIKey pair for a bearer token.
    ///
    /// If the response carries a non-empty string `token`, it replaces the
    /// held token and is used for every later request. The request goes
    /// through the normal auth policy, so once a token is held the
    /// re-authentication itself is sent with the bearer header.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn authenticate(&self) -> Result<ApiResponse, ApiError> {
        let params = vec![
            ("username", self.credentials.user_id().to_string()),
            ("apikey", self.credentials.api_key().to_string()),
        ];
        let response = self.request(TOKEN_ENDPOINT, params).await?;

        match response.token().filter(|token| !token.is_empty()) {
            Some(token) => {
                *self.token.write().await = Some(token.to_string());
                tracing::info!("Acquired bearer token");
            }
            None => tracing::warn!("Token endpoint response did not contain a token"),
        }

        Ok(response)
    }

    /// Build, send and decode one request.
    async fn request(
        &self,
        endpoint: &'static str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<ApiResponse, ApiError> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];

        let token = self.token.read().await.clone();
        let bearer = token.is_some();
        match token {
            Some(token) => headers.push(("Authorization".to_string(), format!("Bearer {token}"))),
            None => {
                params.push(("UserID", self.credentials.user_id().to_string()));
                params.push(("APIKey", self.credentials.api_key().to_string()));
            }
        }

        let request = ApiRequest {
            method: Method::GET,
            url: format!("{}{endpoint}", self.base_url),
            endpoint: endpoint.to_string(),
            query: params
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            headers,
        };

        tracing::debug!(endpoint, bearer, "Sending request");

        let response = self.transport.send(&request).await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "Request failed");
            ApiError::transport(e)
        })?;

        match ApiResponse::from_body(&response.body) {
            Ok(decoded) => {
                tracing::debug!(endpoint, status = response.status, "Received response");
                Ok(decoded)
            }
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "Response body is not valid JSON");
                Err(ApiError::response_format(response.body, e))
            }
        }
    }
}

impl fmt::Debug for ClubkashClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClubkashClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

/// Shortest decimal form: `100.0` becomes `100`, `99.5` stays `99.5`.
fn format_amount(amount: f64) -> String {
    amount.to_string()
}

fn resolve_request_id(request_id: Option<RequestId>) -> String {
    request_id
        .unwrap_or_else(RequestId::generate)
        .into_inner()
}
