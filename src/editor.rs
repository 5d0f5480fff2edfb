//! The code buffer and the viewer it feeds.
//!
//! SYSTEM CONTEXT
//! ==============
//! The editor owns the diagram code the user is working on and the
//! [`ViewerCore`] showing the last generated artifact. Generation validates
//! the code, sends it with the session's bearer token, normalizes the raw
//! response, and installs the result into the viewer.
//!
//! Any change of code source (file, GitHub, template) discards the previous
//! artifact, as does editing the buffer down to nothing.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use viewer::artifact::{RenderableArtifact, normalize};
use viewer::engine::{Action, ViewerCore};

use crate::api::diagram::format_request_body;
use crate::api::{ApiError, DiagramApi};
use crate::session::Session;

/// Shortest accepted code, in characters, after trimming.
pub const MIN_CODE_CHARS: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("code is empty")]
    EmptyCode,
    #[error("code must be at least {min} characters")]
    CodeTooShort { min: usize },
    #[error("not logged in; run `diagramify login` first")]
    NotAuthenticated,
    #[error("no diagram has been generated yet")]
    NoArtifact,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl EditorError {
    /// The diagram service rejected the token; the stored session is stale.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }
}

/// Check that `code` is worth sending.
///
/// # Errors
///
/// [`EditorError::EmptyCode`] for blank code, [`EditorError::CodeTooShort`]
/// below [`MIN_CODE_CHARS`].
pub fn validate_code(code: &str) -> Result<(), EditorError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(EditorError::EmptyCode);
    }
    if trimmed.chars().count() < MIN_CODE_CHARS {
        return Err(EditorError::CodeTooShort { min: MIN_CODE_CHARS });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeStats {
    pub lines: usize,
    pub chars: usize,
}

impl CodeStats {
    #[must_use]
    pub fn of(code: &str) -> Self {
        Self { lines: code.split('\n').count(), chars: code.chars().count() }
    }
}

#[derive(Debug, Default)]
pub struct EditorState {
    code: String,
    viewer: ViewerCore,
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn stats(&self) -> CodeStats {
        CodeStats::of(&self.code)
    }

    #[must_use]
    pub fn viewer(&self) -> &ViewerCore {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut ViewerCore {
        &mut self.viewer
    }

    /// Edit the buffer. Clearing it discards the shown artifact.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        if self.code.trim().is_empty() {
            self.viewer.clear();
        }
    }

    /// Replace the buffer with code from a new source.
    pub fn load_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.viewer.clear();
    }

    /// The artifact currently shown.
    ///
    /// # Errors
    ///
    /// [`EditorError::NoArtifact`] before the first successful generation.
    pub fn artifact(&self) -> Result<&RenderableArtifact, EditorError> {
        self.viewer.artifact().ok_or(EditorError::NoArtifact)
    }

    /// Generate a diagram for the current code and show it.
    ///
    /// # Errors
    ///
    /// Validation errors, [`EditorError::NotAuthenticated`] without a token,
    /// and API errors. On error the previous artifact stays installed.
    pub async fn generate(&mut self, api: &dyn DiagramApi, session: &Session) -> Result<Vec<Action>, EditorError> {
        validate_code(&self.code)?;
        let token = session.bearer().map_err(|_| EditorError::NotAuthenticated)?;
        let raw = api.generate(token, format_request_body(&self.code)).await?;
        let artifact = normalize(&raw);
        tracing::info!(kind = ?artifact.kind(), bytes = raw.len(), "diagram generated");
        Ok(self.viewer.install(artifact))
    }
}
