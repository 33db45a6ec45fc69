//! Clubkash VTU client SDK.
//!
//! This crate wraps the Clubkash (Nellobytes Systems) value-added-services
//! API: airtime, data bundles, cable TV subscriptions, electricity tokens and
//! wallet balance.
//!
//! # Example
//!
//! ```no_run
//! use clubkash_client::{ClubkashClient, MobileNetwork};
//!
//! # async fn example() -> Result<(), clubkash_client::ApiError> {
//! let client = ClubkashClient::new("your-user-id", "your-api-key")?;
//!
//! let balance = client.get_wallet_balance().await?;
//! println!("Balance: {:?}", balance.balance());
//!
//! // RequestID is generated when not supplied
//! let order = client
//!     .purchase_airtime(MobileNetwork::Mtn, 100.0, "08012345678", None)
//!     .await?;
//!
//! if order.status() != Some("ORDER_RECEIVED") {
//!     println!("Vendor rejected the order: {:?}", order.as_value());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Responses are returned as [`ApiResponse`] without inspecting the vendor
//! status; only transport failures and undecodable bodies become an
//! [`ApiError`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod error;
mod transport;

pub use client::ClubkashClient;
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
pub use error::{ApiError, ApiErrorKind};
pub use transport::{
    ApiRequest, HttpTransport, ScriptedTransport, Transport, TransportError, TransportResponse,
};

pub use clubkash_core::{
    ApiResponse, CableTv, CoreError, ElectricCompany, MeterType, MobileNetwork, RequestId,
};
