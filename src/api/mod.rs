//! Thin HTTP clients for the remote Diagramify services.
//!
//! DESIGN
//! ======
//! One shared `reqwest::Client` (timeouts from [`HttpTimeouts`]) is wrapped by
//! a small client per service. Every call goes through [`ApiClient::send`],
//! which maps transport failures, 401, and other non-success statuses onto
//! [`ApiError`]. The diagram and auth services sit behind the [`DiagramApi`]
//! and [`AuthApi`] traits.

pub mod auth;
pub mod diagram;
pub mod products;
pub mod purchases;

#[cfg(test)]
#[path = "test_server.rs"]
pub(crate) mod test_server;


use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::HttpTimeouts;

pub use auth::{AuthApi, AuthClient, Credentials};
pub use diagram::{DiagramApi, DiagramClient};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by remote API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The service rejected the bearer token.
    #[error("session expired or token rejected (HTTP 401)")]
    Unauthorized,

    /// The service answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// An authenticated call was attempted without a token.
    #[error("not logged in; run `diagramify login` first")]
    MissingToken,

    /// The request was rejected locally before being sent.
    #[error("invalid request: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Whether retrying the same request might succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// SHARED CLIENT
// =============================================================================

/// Shared HTTP plumbing for all service clients.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    /// Build the shared client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "api call failed");
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    /// Send a request and return the body text of a 2xx response.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] on 401, [`ApiError::Status`] on any other
    /// non-2xx status, [`ApiError::Request`] on transport failure.
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        self.execute(request)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))
    }

    /// Like [`ApiClient::send`], returning raw bytes (image downloads).
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`].
    pub async fn send_bytes(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let bytes = self
            .execute(request)
            .await?
            .bytes()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Like [`ApiClient::send`], parsing the body as JSON and unwrapping a
    /// gateway envelope when present.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`], plus [`ApiError::Parse`] for invalid JSON.
    pub async fn send_json(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let text = self.send(request).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value: Value = serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
        unwrap_envelope(value)
    }
}

/// Unwrap an API-Gateway style `{ "body": "<json>" }` envelope.
///
/// A string `body` is parsed as JSON; an object or array `body` is returned
/// as-is. Anything else passes through untouched.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] when a string `body` is not valid JSON.
pub fn unwrap_envelope(value: Value) -> Result<Value, ApiError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };
    match map.remove("body") {
        Some(Value::String(inner)) => {
            serde_json::from_str(&inner).map_err(|e| ApiError::Parse(format!("envelope body: {e}")))
        }
        Some(inner @ (Value::Object(_) | Value::Array(_))) => Ok(inner),
        Some(other) => {
            map.insert("body".to_owned(), other);
            Ok(Value::Object(map))
        }
        None => Ok(Value::Object(map)),
    }
}
