//! Auth service client: login, registration, and token validation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ApiError};

/// Login / registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;

    /// Create an account. Returns the raw service response.
    async fn register(&self, credentials: &Credentials) -> Result<Value, ApiError>;

    /// Check that a stored token is still accepted. Only the status counts;
    /// the body may be any text.
    async fn validate(&self, token: &str) -> Result<(), ApiError>;
}

/// HTTP implementation of [`AuthApi`].
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
    base_url: String,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient, base_url: impl Into<String>) -> Self {
        Self { api, base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = self.api.http().post(self.url("/login")).json(credentials);
        let value = self.api.send_json(request).await?;
        let response: LoginResponse = serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))?;
        match response.token {
            Some(token) if !token.is_empty() => {
                tracing::info!(user_id = %credentials.user_id, "logged in");
                Ok(token)
            }
            _ => Err(ApiError::Parse("login response has no token".to_owned())),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let request = self.api.http().post(self.url("/register")).json(credentials);
        let value = self.api.send_json(request).await?;
        tracing::info!(user_id = %credentials.user_id, "registered");
        Ok(value)
    }

    async fn validate(&self, token: &str) -> Result<(), ApiError> {
        let request = self
            .api
            .http()
            .post(self.url("/validate"))
            .json(&serde_json::json!({ "token": token }));
        self.api.send(request).await?;
        Ok(())
    }
}
