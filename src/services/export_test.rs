use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use viewer::artifact::normalize;
use viewer::engine::ViewerCore;

use super::*;
use crate::api::test_server::{client, spawn};

fn style_for(artifact: &RenderableArtifact) -> SurfaceStyle {
    let mut core = ViewerCore::new();
    let _ = core.install(artifact.clone());
    let _ = core.zoom_in();
    SurfaceStyle::for_viewer(&core)
}

// =========================================================================
// file names
// =========================================================================

#[test]
fn default_name_uses_kind_extension() {
    assert_eq!(default_file_name(&RenderableArtifact::image("data:image/png;base64,AA=="), 42), "diagrama-42.png");
    assert_eq!(default_file_name(&RenderableArtifact::plain_text("x"), 7), "diagrama-7.txt");
    assert_eq!(default_file_name(&RenderableArtifact::structured_text("{}"), 7), "diagrama-7.txt");
}

#[test]
fn default_name_now_is_stamped() {
    let name = default_file_name_now(&RenderableArtifact::plain_text("x"));
    let millis = name.strip_prefix("diagrama-").and_then(|s| s.strip_suffix(".txt")).unwrap();
    assert!(millis.parse::<u128>().unwrap() > 0);
}

// =========================================================================
// data URIs
// =========================================================================

#[test]
fn base64_data_uri_decodes() {
    let bytes = decode_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
    assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");
}

#[test]
fn plain_data_uri_keeps_payload() {
    assert_eq!(decode_data_uri("data:image/svg+xml,<svg/>").unwrap(), b"<svg/>");
}

#[test]
fn malformed_data_uris_are_rejected() {
    for bad in ["image/png;base64,AA==", "data:image/png;base64", "data:image/png;base64,***"] {
        assert!(matches!(decode_data_uri(bad), Err(ExportError::InvalidDataUri(_))), "{bad:?}");
    }
}

// =========================================================================
// export
// =========================================================================

#[tokio::test]
async fn text_artifact_is_written_as_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let artifact = normalize("{\"b\":1,\"a\":\"ñ\"}");
    let written = export(&client(), &artifact, &path).await.unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, artifact.payload());
    assert_eq!(written, contents.len());
}

#[tokio::test]
async fn data_uri_image_is_decoded_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let artifact = normalize("data:image/png;base64,iVBORw0KGgo=");
    export(&client(), &artifact, &path).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn remote_image_is_downloaded() {
    let router = Router::new()
        .route("/img.png", get(|| async { vec![1_u8, 2, 3, 255] }))
        .route("/gone.png", get(|| async { (StatusCode::NOT_FOUND, "nope") }));
    let base = spawn(router).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");

    let artifact = normalize(&format!("{{\"download_url\":\"{base}/img.png\"}}"));
    assert!(artifact.is_image());
    export(&client(), &artifact, &path).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 255]);

    let missing = RenderableArtifact::image(format!("{base}/gone.png"));
    let err = export(&client(), &missing, &path).await.unwrap_err();
    assert!(matches!(err, ExportError::Fetch(ApiError::Status { status: 404, .. })));
}

#[tokio::test]
async fn unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("out.txt");
    let err = export(&client(), &RenderableArtifact::plain_text("hi"), &path).await.unwrap_err();
    assert!(matches!(err, ExportError::Io { .. }));
}

// =========================================================================
// HTML preview
// =========================================================================

#[test]
fn preview_escapes_text_and_applies_style() {
    let artifact = RenderableArtifact::plain_text("<script>alert('x')</script> & more");
    let html = html_preview(&artifact, &style_for(&artifact));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("scale(1.25)"));
    assert!(html.contains("<pre"));
}

#[test]
fn preview_embeds_image_source() {
    let artifact = RenderableArtifact::image("https://cdn.example.com/d.png?a=1&b=2");
    let html = html_preview(&artifact, &style_for(&artifact));
    assert!(html.contains("<img src=\"https://cdn.example.com/d.png?a=1&amp;b=2\""));
    assert!(html.contains("transform-origin: center center"));
}

#[test]
fn preview_quotes_cannot_break_out_of_src() {
    let artifact = RenderableArtifact::image("https://cdn.example.com/d.png?q=\"x\" onerror=\"alert(1)");
    let html = html_preview(&artifact, &style_for(&artifact));
    assert!(html.contains("<img src=\"https://cdn.example.com/d.png?q=&quot;x&quot; onerror=&quot;alert(1)\" alt="));
    assert!(!html.contains("onerror=\""));
}
