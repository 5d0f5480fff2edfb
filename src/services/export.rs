//! Export: write the current artifact to disk, or wrap it in an HTML page.
//!
//! DESIGN
//! ======
//! Image artifacts are either inline `data:` URIs (decoded locally) or remote
//! URLs (downloaded through the shared HTTP client). Text artifacts are
//! written as UTF-8. The HTML preview reuses the viewer's `SurfaceStyle`, so
//! the exported page shows the artifact at the zoom/pan the user left it.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use viewer::artifact::RenderableArtifact;
use viewer::render::{Content, SurfaceStyle};

use crate::api::{ApiClient, ApiError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("downloading image failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),
}

/// Current time as milliseconds since Unix epoch.
fn now_ms() -> u128 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    dur.as_millis()
}

/// `diagrama-<millis>.<png|txt>`.
#[must_use]
pub fn default_file_name(artifact: &RenderableArtifact, millis: u128) -> String {
    format!("diagrama-{millis}.{}", artifact.export_extension())
}

/// [`default_file_name`] stamped with the current time.
#[must_use]
pub fn default_file_name_now(artifact: &RenderableArtifact) -> String {
    default_file_name(artifact, now_ms())
}

/// Decode `data:<mime>[;base64],<payload>`.
///
/// # Errors
///
/// [`ExportError::InvalidDataUri`] when the prefix or separator is missing,
/// or the base64 payload does not decode.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ExportError> {
    let uri = uri.trim();
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ExportError::InvalidDataUri("missing data: prefix".to_owned()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ExportError::InvalidDataUri("missing ',' separator".to_owned()))?;
    if header.ends_with(";base64") {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| ExportError::InvalidDataUri(e.to_string()))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Resolve the bytes an export of `artifact` should contain.
///
/// # Errors
///
/// Data URI decoding and download failures.
pub async fn artifact_bytes(api: &ApiClient, artifact: &RenderableArtifact) -> Result<Vec<u8>, ExportError> {
    if !artifact.is_image() {
        return Ok(artifact.payload().as_bytes().to_vec());
    }
    let src = artifact.payload().trim();
    if src.starts_with("data:") {
        decode_data_uri(src)
    } else {
        tracing::info!(url = %src, "downloading image");
        Ok(api.send_bytes(api.http().get(src)).await?)
    }
}

/// Write `artifact` to `path`, returning the number of bytes written.
///
/// # Errors
///
/// See [`artifact_bytes`], plus [`ExportError::Io`].
pub async fn export(api: &ApiClient, artifact: &RenderableArtifact, path: &Path) -> Result<usize, ExportError> {
    let bytes = artifact_bytes(api, artifact).await?;
    write_file(path, bytes.as_slice()).await?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), kind = ?artifact.kind(), "artifact exported");
    Ok(bytes.len())
}

/// Write `contents`, mapping failures to [`ExportError::Io`].
///
/// # Errors
///
/// [`ExportError::Io`] when the file cannot be written.
pub async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), ExportError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ExportError::Io { path: path.to_path_buf(), source })
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A standalone page showing `artifact` inside a surface styled by `style`.
#[must_use]
pub fn html_preview(artifact: &RenderableArtifact, style: &SurfaceStyle) -> String {
    let inner = match Content::of(artifact) {
        Content::Image { src } => format!(
            "<img src=\"{}\" alt=\"Generated diagram\" style=\"max-width: 100%; height: auto;\" draggable=\"false\" />",
            escape_html(src.trim())
        ),
        Content::Text { text } => format!(
            "<pre style=\"white-space: pre-wrap; word-break: break-word; margin: 0;\">{}</pre>",
            escape_html(text)
        ),
    };
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n<meta charset=\"utf-8\" />\n<title>Diagramify</title>\n</head>\n\
         <body style=\"margin: 0; overflow: hidden;\">\n\
         <div style=\"{}\">\n{}\n</div>\n\
         </body>\n\
         </html>\n",
        escape_html(&style.to_css()),
        inner
    )
}
