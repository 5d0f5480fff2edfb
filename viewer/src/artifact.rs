//! Renderable artifacts and the response normalizer.
//!
//! The diagram API answers with a hosted-image URL inside JSON, an inline
//! data URI, arbitrary JSON, or plain text depending on the diagram type.
//! [`normalize`] sniffs the body once and produces a [`RenderableArtifact`]
//! whose kind never changes afterwards; everything downstream branches on
//! [`ArtifactKind`] instead of re-inspecting strings.

#[cfg(test)]
#[path = "artifact_test.rs"]
mod artifact_test;

use serde::Serialize;
use serde_json::Value;

const DOWNLOAD_URL_FIELD: &str = "download_url";
const DATA_IMAGE_PREFIX: &str = "data:image/";
const HTTP_PREFIX: &str = "http";

/// Which renderable shape an artifact has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Payload is an image URL or data URI.
    Image,
    /// Payload is pretty-printed JSON.
    StructuredText,
    /// Payload is the raw response text.
    PlainText,
}

/// The normalized result of one generation call.
///
/// Fields are private: an artifact is built once by [`normalize`] (or one of
/// the constructors) and replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderableArtifact {
    kind: ArtifactKind,
    payload: String,
}

impl RenderableArtifact {
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self { kind: ArtifactKind::Image, payload: src.into() }
    }

    #[must_use]
    pub fn structured_text(text: impl Into<String>) -> Self {
        Self { kind: ArtifactKind::StructuredText, payload: text.into() }
    }

    #[must_use]
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self { kind: ArtifactKind::PlainText, payload: text.into() }
    }

    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    #[must_use]
    pub fn into_payload(self) -> String {
        self.payload
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.kind == ArtifactKind::Image
    }

    /// File extension used when the artifact is exported.
    #[must_use]
    pub fn export_extension(&self) -> &'static str {
        match self.kind {
            ArtifactKind::Image => "png",
            ArtifactKind::StructuredText | ArtifactKind::PlainText => "txt",
        }
    }
}

/// Classify a raw response body into a renderable artifact.
///
/// Total over all inputs: bodies that are neither JSON nor an image reference
/// (including the empty string) become [`ArtifactKind::PlainText`].
#[must_use]
pub fn normalize(body: &str) -> RenderableArtifact {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => from_json(value),
        Err(_) => from_text(body),
    }
}

fn from_json(value: Value) -> RenderableArtifact {
    if let Some(url) = download_url(&value) {
        return RenderableArtifact::image(url);
    }
    match serde_json::to_string_pretty(&value) {
        Ok(pretty) => RenderableArtifact::structured_text(pretty),
        // Serializing a parsed `Value` cannot fail; fall back to compact form.
        Err(_) => RenderableArtifact::structured_text(value.to_string()),
    }
}

fn download_url(value: &Value) -> Option<&str> {
    value
        .get(DOWNLOAD_URL_FIELD)
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}

fn from_text(body: &str) -> RenderableArtifact {
    if looks_like_image_reference(body) {
        RenderableArtifact::image(body)
    } else {
        RenderableArtifact::plain_text(body)
    }
}

/// Whether a non-JSON body should be shown as an image.
///
/// Any text starting with `http` qualifies, so a plain-text diagram that
/// happens to begin with that word is shown as an image reference.
#[must_use]
pub fn looks_like_image_reference(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.starts_with(DATA_IMAGE_PREFIX) || trimmed.starts_with(HTTP_PREFIX)
}
