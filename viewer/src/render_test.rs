use super::*;
use crate::camera::Point;
use crate::input::Button;

fn viewer() -> ViewerCore {
    let mut core = ViewerCore::new();
    core.install(RenderableArtifact::image("https://example.com/x.png"));
    core
}

#[test]
fn idle_style_has_settle_transition_and_grab_cursor() {
    let style = SurfaceStyle::for_viewer(&viewer());
    assert_eq!(style.transform, "translate(0px, 0px) scale(1)");
    assert_eq!(style.transform_origin, "center center");
    assert_eq!(style.transition, "transform 0.2s ease");
    assert_eq!(style.cursor, "grab");
}

#[test]
fn dragging_disables_transition() {
    let mut core = viewer();
    core.on_pointer_down(Point::new(0.0, 0.0), Button::Primary);
    core.on_pointer_move(Point::new(12.0, 3.0));
    let style = SurfaceStyle::for_viewer(&core);
    assert_eq!(style.transition, "none");
    assert_eq!(style.cursor, "grabbing");
    assert_eq!(style.transform, "translate(12px, 3px) scale(1)");
}

#[test]
fn to_css_lists_all_declarations() {
    let mut core = viewer();
    core.zoom_in();
    let css = SurfaceStyle::for_viewer(&core).to_css();
    assert_eq!(
        css,
        "transform: translate(0px, 0px) scale(1.25); transform-origin: center center; \
         transition: transform 0.2s ease; cursor: grab;"
    );
}

#[test]
fn content_follows_artifact_kind() {
    let image = RenderableArtifact::image("data:image/png;base64,AA");
    assert_eq!(Content::of(&image), Content::Image { src: "data:image/png;base64,AA" });

    let text = RenderableArtifact::structured_text("{}");
    assert_eq!(Content::of(&text), Content::Text { text: "{}" });

    let plain = RenderableArtifact::plain_text("hello");
    assert_eq!(Content::of(&plain), Content::Text { text: "hello" });
}
