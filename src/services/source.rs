//! Where diagram code comes from: local files, GitHub, templates, stdin.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use crate::api::{ApiClient, ApiError};
use crate::services::templates;

/// Extensions accepted for local code files (lowercase, without the dot).
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "json", "yaml", "yml"];

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file {0}; expected .txt, .json, .yaml or .yml")]
    UnsupportedFile(PathBuf),
    #[error("GitHub URL is empty")]
    EmptyUrl,
    #[error("fetching remote code failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("no template with id {0}")]
    UnknownTemplate(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSource {
    File(PathBuf),
    Github(String),
    Template(usize),
    Stdin,
}

/// Whether `path` has one of [`ACCEPTED_EXTENSIONS`], ignoring case.
#[must_use]
pub fn is_accepted_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.iter().any(|ok| ext.eq_ignore_ascii_case(ok)))
}

/// Rewrite a `github.com` page URL to its raw-content URL.
///
/// Only the first `github.com` and the first `/blob/` are replaced. URLs
/// already on `raw.githubusercontent.com`, and non-GitHub URLs, are returned
/// trimmed but otherwise unchanged.
#[must_use]
pub fn github_raw_url(url: &str) -> String {
    let url = url.trim();
    if url.contains("github.com") && !url.contains("raw.githubusercontent.com") {
        url.replacen("github.com", "raw.githubusercontent.com", 1)
            .replacen("/blob/", "/", 1)
    } else {
        url.to_owned()
    }
}

/// Read a local code file.
///
/// # Errors
///
/// [`SourceError::UnsupportedFile`] for other extensions, [`SourceError::Io`]
/// when the file cannot be read.
pub async fn read_file(path: &Path) -> Result<String, SourceError> {
    if !is_accepted_file(path) {
        return Err(SourceError::UnsupportedFile(path.to_path_buf()));
    }
    let code = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), chars = code.chars().count(), "loaded code file");
    Ok(code)
}

/// Fetch code from a GitHub (or any raw) URL.
///
/// # Errors
///
/// [`SourceError::EmptyUrl`] for a blank URL, [`SourceError::Fetch`] for
/// transport failures and non-success statuses.
pub async fn fetch_github(api: &ApiClient, url: &str) -> Result<String, SourceError> {
    if url.trim().is_empty() {
        return Err(SourceError::EmptyUrl);
    }
    let raw = github_raw_url(url);
    tracing::info!(url = %raw, "fetching code");
    let code = api.send(api.http().get(&raw)).await?;
    Ok(code)
}

async fn read_stdin() -> Result<String, SourceError> {
    let mut code = String::new();
    tokio::io::stdin()
        .read_to_string(&mut code)
        .await
        .map_err(|source| SourceError::Io { path: PathBuf::from("<stdin>"), source })?;
    Ok(code)
}

/// Load code from any [`CodeSource`].
///
/// # Errors
///
/// Whatever the selected source can fail with.
pub async fn load(api: &ApiClient, source: &CodeSource) -> Result<String, SourceError> {
    match source {
        CodeSource::File(path) => read_file(path).await,
        CodeSource::Github(url) => fetch_github(api, url).await,
        CodeSource::Template(id) => templates::by_id(*id)
            .map(|t| t.code.to_owned())
            .ok_or(SourceError::UnknownTemplate(*id)),
        CodeSource::Stdin => read_stdin().await,
    }
}
