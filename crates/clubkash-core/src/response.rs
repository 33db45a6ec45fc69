//! Loosely typed API responses.
//!
//! Vendor responses carry different fields per endpoint and occasionally
//! extra ones, so the body is kept as a `serde_json::Value`. The accessors
//! below cover the fields callers check most often without rejecting
//! anything the vendor adds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Index;

use crate::error::{CoreError, Result};

/// A decoded response body: a JSON object or array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(Value);

impl ApiResponse {
    /// Decode a raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON, or if the top-level value is
    /// a scalar or `null` rather than an object or array.
    pub fn from_body(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::try_from(value)
    }

    /// Look up a top-level field. Returns `None` for arrays.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The vendor `status` field, e.g. `ORDER_RECEIVED`.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    /// The wallet `balance` field.
    ///
    /// The vendor has been seen to send this either as a number or as a
    /// numeric string; both are accepted.
    #[must_use]
    pub fn balance(&self) -> Option<f64> {
        match self.get("balance")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }

    /// The bearer `token` field returned by the token endpoint.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.get("token").and_then(Value::as_str)
    }

    /// The body as a JSON object, if it is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    /// Borrow the underlying JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the response, returning the underlying JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl TryFrom<Value> for ApiResponse {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) | Value::Array(_) => Ok(Self(value)),
            Value::Null => Err(CoreError::UnexpectedShape("null")),
            Value::Bool(_) => Err(CoreError::UnexpectedShape("a boolean")),
            Value::Number(_) => Err(CoreError::UnexpectedShape("a number")),
            Value::String(_) => Err(CoreError::UnexpectedShape("a string")),
        }
    }
}

impl From<ApiResponse> for Value {
    fn from(response: ApiResponse) -> Self {
        response.0
    }
}

/// Missing keys index to `Value::Null`, as with `serde_json::Value`.
impl Index<&str> for ApiResponse {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.0[key]
    }
}
