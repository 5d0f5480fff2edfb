use std::sync::Mutex;

use super::*;

/// Env vars are process-global; serialize the tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: &[&str] = &[
    "DIAGRAMIFY_DIAGRAM_URL",
    "DIAGRAMIFY_AUTH_URL",
    "DIAGRAMIFY_PRODUCTS_URL",
    "DIAGRAMIFY_PURCHASES_URL",
    "DIAGRAMIFY_TENANT_ID",
    "DIAGRAMIFY_REQUEST_TIMEOUT_SECS",
    "DIAGRAMIFY_CONNECT_TIMEOUT_SECS",
    "DIAGRAMIFY_SESSION_FILE",
];

/// # Safety
/// Callers hold `ENV_LOCK`.
unsafe fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_env() };

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.diagram_url, DEFAULT_DIAGRAM_URL);
    assert_eq!(cfg.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(cfg.products_url, DEFAULT_PRODUCTS_URL);
    assert_eq!(cfg.purchases_url, DEFAULT_PURCHASES_URL);
    assert_eq!(cfg.tenant_id, "inkafarma");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 60, connect_secs: 10 });
    assert!(cfg.session_file.ends_with("diagramify/session.json"));
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("DIAGRAMIFY_DIAGRAM_URL", "http://localhost:9000/generate/");
        std::env::set_var("DIAGRAMIFY_AUTH_URL", "http://localhost:9001/auth//");
        std::env::set_var("DIAGRAMIFY_TENANT_ID", "acme");
        std::env::set_var("DIAGRAMIFY_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("DIAGRAMIFY_CONNECT_TIMEOUT_SECS", " 2 ");
        std::env::set_var("DIAGRAMIFY_SESSION_FILE", "/tmp/dfy/session.json");
    }

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.diagram_url, "http://localhost:9000/generate");
    assert_eq!(cfg.auth_url, "http://localhost:9001/auth");
    assert_eq!(cfg.tenant_id, "acme");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/dfy/session.json"));

    unsafe { clear_env() };
}

#[test]
fn from_env_rejects_bad_timeout() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("DIAGRAMIFY_REQUEST_TIMEOUT_SECS", "soon");
    }

    let err = AppConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("DIAGRAMIFY_REQUEST_TIMEOUT_SECS"));
    assert!(err.contains("soon"));

    unsafe { clear_env() };
}

#[test]
fn normalize_base_url_trims() {
    assert_eq!(normalize_base_url(" https://x.test/api/ "), "https://x.test/api");
    assert_eq!(normalize_base_url("https://x.test"), "https://x.test");
}

#[test]
fn missing_dotenv_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let result = dotenvy::from_path(dir.path().join(".env"));
    assert!(ignore_missing_dotenv(result).is_ok());
}

#[test]
fn malformed_dotenv_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "not a valid line\n").unwrap();
    let result = dotenvy::from_path(&path);
    assert!(ignore_missing_dotenv(result).is_err());
}
