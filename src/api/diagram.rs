//! Diagram generation endpoint.
//!
//! The service answers with a raw string whose shape is not fixed: a JSON
//! document, an image reference, or plain text. Interpretation is left to
//! `viewer::artifact::normalize`; this module only moves bytes.

#[cfg(test)]
#[path = "diagram_test.rs"]
mod diagram_test;

use reqwest::header::CONTENT_TYPE;

use super::{ApiClient, ApiError};

#[async_trait::async_trait]
pub trait DiagramApi: Send + Sync {
    /// Submit a prepared request body and return the raw response text.
    async fn generate(&self, token: &str, body: String) -> Result<String, ApiError>;
}

/// Build the request body for `code`.
///
/// Code that already parses as JSON is sent verbatim. Anything else is
/// wrapped as `{"code": <code>}` with two-space indentation.
#[must_use]
pub fn format_request_body(code: &str) -> String {
    if serde_json::from_str::<serde_json::Value>(code).is_ok() {
        return code.to_owned();
    }
    let wrapped = serde_json::json!({ "code": code });
    serde_json::to_string_pretty(&wrapped).unwrap_or_else(|_| wrapped.to_string())
}

/// HTTP implementation of [`DiagramApi`].
#[derive(Debug, Clone)]
pub struct DiagramClient {
    api: ApiClient,
    url: String,
}

impl DiagramClient {
    #[must_use]
    pub fn new(api: ApiClient, url: impl Into<String>) -> Self {
        Self { api, url: url.into() }
    }
}

#[async_trait::async_trait]
impl DiagramApi for DiagramClient {
    async fn generate(&self, token: &str, body: String) -> Result<String, ApiError> {
        tracing::info!(url = %self.url, bytes = body.len(), "requesting diagram");
        let request = self
            .api
            .http()
            .post(&self.url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let text = self.api.send(request).await?;
        tracing::debug!(bytes = text.len(), "diagram response received");
        Ok(text)
    }
}
