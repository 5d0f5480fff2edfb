use serde_json::Value;

use super::*;
use crate::api::Credentials;

struct MockAuth {
    outcome: fn() -> Result<(), ApiError>,
}

#[async_trait::async_trait]
impl AuthApi for MockAuth {
    async fn login(&self, _credentials: &Credentials) -> Result<String, ApiError> {
        Ok("tok".into())
    }

    async fn register(&self, _credentials: &Credentials) -> Result<Value, ApiError> {
        Ok(Value::Null)
    }

    async fn validate(&self, _token: &str) -> Result<(), ApiError> {
        (self.outcome)()
    }
}

fn state_in(dir: &tempfile::TempDir) -> AppState {
    let config = AppConfig { session_file: dir.path().join("session.json"), ..AppConfig::default() };
    AppState::new(&config).unwrap()
}

#[test]
fn new_state_starts_logged_out_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir);
    assert!(!state.session.is_authenticated());
}

#[test]
fn clients_take_tenant_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        session_file: dir.path().join("session.json"),
        tenant_id: "boticas".to_owned(),
        ..AppConfig::default()
    };
    let state = AppState::new(&config).unwrap();
    assert_eq!(state.products.tenant_id(), "boticas");
}

#[test]
fn sign_in_persists_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    state.sign_in("tok-9".into(), "ana".into()).unwrap();

    let reloaded = state_in(&dir);
    assert_eq!(reloaded.session.token(), Some("tok-9"));
    assert_eq!(reloaded.session.user_id(), Some("ana"));
}

#[test]
fn sign_out_clears_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    state.sign_in("tok-9".into(), "ana".into()).unwrap();
    state.sign_out().unwrap();
    assert!(!state.session.is_authenticated());
    assert!(!state_in(&dir).session.is_authenticated());
}

#[tokio::test]
async fn validate_without_token_is_false() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    let auth = MockAuth { outcome: || Ok(()) };
    assert!(!state.validate_session(&auth).await.unwrap());
}

#[tokio::test]
async fn accepted_token_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    state.sign_in("tok".into(), "ana".into()).unwrap();
    let auth = MockAuth { outcome: || Ok(()) };
    assert!(state.validate_session(&auth).await.unwrap());
    assert!(state.session.is_authenticated());
}

#[tokio::test]
async fn rejected_token_is_cleared_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    state.sign_in("tok".into(), "ana".into()).unwrap();
    let auth = MockAuth { outcome: || Err(ApiError::Status { status: 403, body: String::new() }) };
    assert!(!state.validate_session(&auth).await.unwrap());
    assert!(!state.session.is_authenticated());
    assert!(!state_in(&dir).session.is_authenticated());
}

#[tokio::test]
async fn transport_failure_keeps_token() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state_in(&dir);
    state.sign_in("tok".into(), "ana".into()).unwrap();
    let auth = MockAuth { outcome: || Err(ApiError::Request("offline".into())) };
    let err = state.validate_session(&auth).await.unwrap_err();
    assert!(matches!(err, StateError::Api(ApiError::Request(_))));
    assert!(state_in(&dir).session.is_authenticated());
}
