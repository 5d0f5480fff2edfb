use serde_json::{Value, json};

use super::*;

fn parse(s: &str) -> Value {
    serde_json::from_str(s).unwrap()
}

// =============================================================
// JSON with download_url
// =============================================================

#[test]
fn download_url_becomes_image() {
    let body = r#"{"download_url":"https://cdn.example.com/d/42.png","status":"ok"}"#;
    let artifact = normalize(body);
    assert_eq!(artifact.kind(), ArtifactKind::Image);
    assert_eq!(artifact.payload(), "https://cdn.example.com/d/42.png");
}

#[test]
fn download_url_payload_matches_parsed_field() {
    let bodies = [
        r#"{"download_url":"s3://bucket/key.png"}"#,
        r#"  {"download_url": "data:image/png;base64,AAAA"}  "#,
        r#"{"meta":{"a":1},"download_url":"x"}"#,
    ];
    for body in bodies {
        let artifact = normalize(body);
        assert_eq!(artifact.kind(), ArtifactKind::Image, "{body}");
        assert_eq!(artifact.payload(), parse(body)["download_url"].as_str().unwrap());
    }
}

#[test]
fn empty_download_url_is_structured_text() {
    let artifact = normalize(r#"{"download_url":""}"#);
    assert_eq!(artifact.kind(), ArtifactKind::StructuredText);
}

#[test]
fn non_string_download_url_is_structured_text() {
    let artifact = normalize(r#"{"download_url":null,"n":1}"#);
    assert_eq!(artifact.kind(), ArtifactKind::StructuredText);
    let artifact = normalize(r#"{"download_url":7}"#);
    assert_eq!(artifact.kind(), ArtifactKind::StructuredText);
}

// =============================================================
// JSON without download_url
// =============================================================

#[test]
fn json_object_is_pretty_printed_with_two_spaces() {
    let artifact = normalize(r#"{"nodes":["a","b"]}"#);
    assert_eq!(artifact.kind(), ArtifactKind::StructuredText);
    assert_eq!(artifact.payload(), "{\n  \"nodes\": [\n    \"a\",\n    \"b\"\n  ]\n}");
}

#[test]
fn structured_text_round_trips() {
    let bodies = [
        r#"{"graph":{"edges":[[1,2],[2,3]],"directed":true}}"#,
        "[1, 2, 3]",
        "42",
        "true",
        "null",
        r#""a json string""#,
        r#"{"unicode":"ñandú → λ"}"#,
    ];
    for body in bodies {
        let artifact = normalize(body);
        assert_eq!(artifact.kind(), ArtifactKind::StructuredText, "{body}");
        assert_eq!(parse(artifact.payload()), parse(body), "{body}");
    }
}

#[test]
fn json_string_starting_with_http_is_still_structured() {
    let artifact = normalize(r#""https://example.com/x.png""#);
    assert_eq!(artifact.kind(), ArtifactKind::StructuredText);
}

#[test]
fn nested_download_url_is_not_promoted() {
    let artifact = normalize(r#"{"result":{"download_url":"https://x"}}"#);
    assert_eq!(artifact.kind(), ArtifactKind::StructuredText);
}

// =============================================================
// Non-JSON bodies
// =============================================================

#[test]
fn http_url_body_is_image() {
    let body = "https://bucket.s3.amazonaws.com/diagram.png";
    let artifact = normalize(body);
    assert_eq!(artifact.kind(), ArtifactKind::Image);
    assert_eq!(artifact.payload(), body);
}

#[test]
fn data_uri_body_is_image() {
    let body = "data:image/png;base64,iVBORw0KGgo=";
    let artifact = normalize(body);
    assert_eq!(artifact.kind(), ArtifactKind::Image);
    assert_eq!(artifact.payload(), body);
}

#[test]
fn leading_whitespace_before_url_still_image_and_payload_untouched() {
    let body = "\n  http://example.com/a.svg\n";
    let artifact = normalize(body);
    assert_eq!(artifact.kind(), ArtifactKind::Image);
    assert_eq!(artifact.payload(), body);
}

#[test]
fn prefix_check_is_case_sensitive() {
    assert_eq!(normalize("HTTP://EXAMPLE.COM").kind(), ArtifactKind::PlainText);
    assert_eq!(normalize("Data:image/png;base64,AA").kind(), ArtifactKind::PlainText);
}

#[test]
fn text_starting_with_word_http_is_treated_as_image() {
    let artifact = normalize("httpd -> proxy -> app");
    assert_eq!(artifact.kind(), ArtifactKind::Image);
}

#[test]
fn plain_text_body_is_kept_verbatim() {
    let body = "graph TD\n  A --> B\n";
    let artifact = normalize(body);
    assert_eq!(artifact.kind(), ArtifactKind::PlainText);
    assert_eq!(artifact.payload(), body);
}

#[test]
fn empty_body_is_empty_plain_text() {
    let artifact = normalize("");
    assert_eq!(artifact.kind(), ArtifactKind::PlainText);
    assert_eq!(artifact.payload(), "");
}

#[test]
fn whitespace_only_body_is_plain_text() {
    let artifact = normalize("   \n\t");
    assert_eq!(artifact.kind(), ArtifactKind::PlainText);
    assert_eq!(artifact.payload(), "   \n\t");
}

#[test]
fn malformed_json_is_plain_text() {
    let body = r#"{"download_url": "https://x""#;
    let artifact = normalize(body);
    assert_eq!(artifact.kind(), ArtifactKind::PlainText);
    assert_eq!(artifact.payload(), body);
}

// =============================================================
// Purity
// =============================================================

#[test]
fn normalize_is_deterministic() {
    let bodies = [
        r#"{"b":2,"a":{"z":[1,2],"y":null}}"#,
        r#"{"download_url":"https://x/y.png"}"#,
        "data:image/svg+xml;base64,PHN2Zz4=",
        "plain words",
        "",
    ];
    for body in bodies {
        assert_eq!(normalize(body), normalize(body), "{body}");
    }
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn export_extension_follows_kind() {
    assert_eq!(RenderableArtifact::image("x").export_extension(), "png");
    assert_eq!(RenderableArtifact::structured_text("{}").export_extension(), "txt");
    assert_eq!(RenderableArtifact::plain_text("x").export_extension(), "txt");
}

#[test]
fn artifact_serializes_kind_and_payload() {
    let value = serde_json::to_value(RenderableArtifact::structured_text("{}")).unwrap();
    assert_eq!(value, json!({ "kind": "structured_text", "payload": "{}" }));
}

#[test]
fn into_payload_returns_owned_text() {
    assert_eq!(RenderableArtifact::plain_text("abc").into_payload(), "abc");
}
