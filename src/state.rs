//! Shared application state for one CLI invocation.
//!
//! DESIGN
//! ======
//! `AppState` is built once from [`AppConfig`]: one shared HTTP client, one
//! client per remote service, and the session loaded from its store. Commands
//! borrow what they need. The session is only written back through the
//! methods here, so the file and the in-memory value never drift.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::api::products::ProductClient;
use crate::api::purchases::PurchaseClient;
use crate::api::{ApiClient, ApiError, AuthApi, AuthClient, DiagramClient};
use crate::config::AppConfig;
use crate::session::{Session, SessionError, SessionStore};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct AppState {
    pub api: ApiClient,
    pub auth: AuthClient,
    pub diagrams: DiagramClient,
    pub products: ProductClient,
    pub purchases: PurchaseClient,
    pub store: SessionStore,
    pub session: Session,
}

impl AppState {
    /// Build clients and load the stored session.
    ///
    /// # Errors
    ///
    /// HTTP client construction failures and unreadable session files.
    pub fn new(config: &AppConfig) -> Result<Self, StateError> {
        let api = ApiClient::new(config.timeouts)?;
        let store = SessionStore::new(config.session_file.clone());
        let session = store.load()?;
        Ok(Self {
            auth: AuthClient::new(api.clone(), config.auth_url.clone()),
            diagrams: DiagramClient::new(api.clone(), config.diagram_url.clone()),
            products: ProductClient::new(api.clone(), config.products_url.clone(), config.tenant_id.clone()),
            purchases: PurchaseClient::new(api.clone(), config.purchases_url.clone(), config.tenant_id.clone()),
            api,
            store,
            session,
        })
    }

    /// Store a fresh login.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be written.
    pub fn sign_in(&mut self, token: String, user_id: String) -> Result<(), SessionError> {
        self.session.login(token, Some(user_id));
        self.store.save(&self.session)
    }

    /// Forget the session in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be removed.
    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.session.logout();
        self.store.clear()
    }

    /// Check a stored token with the auth service.
    ///
    /// Returns `Ok(false)` when there is no token or the service rejects it;
    /// a rejected token is cleared. Transport failures keep the token and
    /// surface as errors.
    ///
    /// # Errors
    ///
    /// Transport failures, or a session file that cannot be cleared.
    pub async fn validate_session(&mut self, auth: &dyn AuthApi) -> Result<bool, StateError> {
        let Some(token) = self.session.token() else {
            return Ok(false);
        };
        match auth.validate(token).await {
            Ok(()) => Ok(true),
            Err(ApiError::Unauthorized | ApiError::Status { .. }) => {
                tracing::warn!("stored token rejected; clearing session");
                self.sign_out()?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}
