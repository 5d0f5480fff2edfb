//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_DIAGRAM_URL: &str = "https://0fjtb5zfng.execute-api.us-east-1.amazonaws.com/diagram/generate";
pub const DEFAULT_AUTH_URL: &str = "https://advydp11z8.execute-api.us-east-1.amazonaws.com/auth";
pub const DEFAULT_PRODUCTS_URL: &str = "https://41x3ltcpra.execute-api.us-east-1.amazonaws.com/dev";
pub const DEFAULT_PURCHASES_URL: &str = "https://41x3ltcpra.execute-api.us-east-1.amazonaws.com/dev";
pub const DEFAULT_TENANT_ID: &str = "inkafarma";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const SESSION_DIR: &str = "diagramify";
const SESSION_FILE: &str = "session.json";

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric setting did not parse.
    #[error("invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub diagram_url: String,
    pub auth_url: String,
    pub products_url: String,
    pub purchases_url: String,
    pub tenant_id: String,
    pub timeouts: HttpTimeouts,
    pub session_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            diagram_url: DEFAULT_DIAGRAM_URL.to_owned(),
            auth_url: DEFAULT_AUTH_URL.to_owned(),
            products_url: DEFAULT_PRODUCTS_URL.to_owned(),
            purchases_url: DEFAULT_PURCHASES_URL.to_owned(),
            tenant_id: DEFAULT_TENANT_ID.to_owned(),
            timeouts: HttpTimeouts::default(),
            session_file: default_session_file(),
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `DIAGRAMIFY_DIAGRAM_URL`: full URL of the generate endpoint
    /// - `DIAGRAMIFY_AUTH_URL`: base URL of the auth service
    /// - `DIAGRAMIFY_PRODUCTS_URL`: base URL of the product catalog service
    /// - `DIAGRAMIFY_PURCHASES_URL`: base URL of the purchases service
    /// - `DIAGRAMIFY_TENANT_ID`: default `inkafarma`
    /// - `DIAGRAMIFY_REQUEST_TIMEOUT_SECS`: default 60
    /// - `DIAGRAMIFY_CONNECT_TIMEOUT_SECS`: default 10
    /// - `DIAGRAMIFY_SESSION_FILE`: default `<config dir>/diagramify/session.json`
    ///
    /// # Errors
    ///
    /// Returns an error when a timeout is set but is not a whole number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let diagram_url = env_url("DIAGRAMIFY_DIAGRAM_URL", DEFAULT_DIAGRAM_URL);
        let auth_url = env_url("DIAGRAMIFY_AUTH_URL", DEFAULT_AUTH_URL);
        let products_url = env_url("DIAGRAMIFY_PRODUCTS_URL", DEFAULT_PRODUCTS_URL);
        let purchases_url = env_url("DIAGRAMIFY_PURCHASES_URL", DEFAULT_PURCHASES_URL);
        let tenant_id = std::env::var("DIAGRAMIFY_TENANT_ID").unwrap_or_else(|_| DEFAULT_TENANT_ID.to_owned());
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("DIAGRAMIFY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("DIAGRAMIFY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let session_file = std::env::var_os("DIAGRAMIFY_SESSION_FILE").map_or_else(default_session_file, PathBuf::from);

        Ok(Self { diagram_url, auth_url, products_url, purchases_url, tenant_id, timeouts, session_file })
    }
}

/// Strip trailing slashes so paths can be appended with `format!`.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_url(key: &str, default: &str) -> String {
    normalize_base_url(&std::env::var(key).unwrap_or_else(|_| default.to_owned()))
}

fn env_parse_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var: key, value: raw }),
        Err(_) => Ok(default),
    }
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SESSION_DIR)
        .join(SESSION_FILE)
}

/// Load `.env` from the working directory or a parent. A missing file is fine.
///
/// # Errors
///
/// Returns an error if a `.env` file exists but cannot be read or parsed.
pub fn load_dotenv() -> Result<(), dotenvy::Error> {
    ignore_missing_dotenv(dotenvy::dotenv())
}

fn ignore_missing_dotenv<T>(result: Result<T, dotenvy::Error>) -> Result<(), dotenvy::Error> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e),
    }
}
