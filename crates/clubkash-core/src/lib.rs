//! Core types for the Clubkash VTU client.
//!
//! This crate provides the I/O-free building blocks used by `clubkash-client`:
//!
//! - **Identifiers**: `RequestId`, the idempotency key attached to every purchase
//! - **Vendor codes**: `MobileNetwork`, `CableTv`, `ElectricCompany`, `MeterType`
//! - **Responses**: `ApiResponse`, a schema-less view over the decoded JSON body
//!
//! The vendor API returns loosely structured JSON whose fields differ per
//! endpoint, so responses are never forced into a fixed schema.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codes;
pub mod error;
pub mod ids;
pub mod response;

pub use codes::{CableTv, ElectricCompany, MeterType, MobileNetwork};
pub use error::{CoreError, Result};
pub use ids::RequestId;
pub use response::ApiResponse;
