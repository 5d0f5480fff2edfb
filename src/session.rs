//! Login session for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is an explicit value: it is loaded once at startup, passed by
//! reference to every authenticated API call, and written back only when it
//! changes (login, logout, or a token rejected with 401). Nothing reads the
//! token from ambient storage.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Errors produced while reading or writing the session file.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("session file {path} is corrupt: {source}")]
    Corrupt { path: PathBuf, source: serde_json::Error },
}

/// Authentication state: set on login, cleared on logout or 401.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly issued token.
    pub fn login(&mut self, token: impl Into<String>, user_id: Option<String>) {
        self.token = Some(token.into());
        self.user_id = user_id;
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user_id = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The token for an `Authorization: Bearer` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] when nobody is logged in.
    pub fn bearer(&self) -> Result<&str, ApiError> {
        self.token().ok_or(ApiError::MissingToken)
    }
}

/// File-backed persistence for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session. A missing file is an empty session.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Session, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::new()),
            Err(source) => return Err(SessionError::Io { path: self.path.clone(), source }),
        };
        serde_json::from_str(&raw).map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })
    }

    /// Persist the session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io { path: parent.to_path_buf(), source })?;
        }
        let body = serde_json::to_string_pretty(session)
            .map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })?;
        fs::write(&self.path, body).map_err(|source| SessionError::Io { path: self.path.clone(), source })
    }

    /// Remove the stored session. Removing a missing file succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io { path: self.path.clone(), source }),
        }
    }
}
