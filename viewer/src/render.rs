//! Rendering: describes how the render surface should present the artifact.
//!
//! The viewer never draws. It hands the host a [`SurfaceStyle`] (transform,
//! origin, transition, cursor) and a [`Content`] description. Smoothing is
//! expressed here as a CSS transition that is switched off while dragging so
//! the content tracks the pointer exactly; the controller itself has no timers.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::artifact::{ArtifactKind, RenderableArtifact};
use crate::consts::SETTLE_TRANSITION;
use crate::engine::ViewerCore;

/// Transform origin: scaling happens about the element's own center.
pub const TRANSFORM_ORIGIN: &str = "center center";

/// Inline style for the element wrapping the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub transform: String,
    pub transform_origin: &'static str,
    pub transition: &'static str,
    pub cursor: &'static str,
}

impl SurfaceStyle {
    /// Snapshot the style for the viewer's current state.
    #[must_use]
    pub fn for_viewer(core: &ViewerCore) -> Self {
        let transition = if core.is_dragging() { "none" } else { SETTLE_TRANSITION };
        Self {
            transform: core.transform().css(),
            transform_origin: TRANSFORM_ORIGIN,
            transition,
            cursor: core.cursor().css(),
        }
    }

    /// Render as a CSS declaration list suitable for a `style` attribute.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "transform: {}; transform-origin: {}; transition: {}; cursor: {};",
            self.transform, self.transform_origin, self.transition, self.cursor
        )
    }
}

/// What element the host should place inside the transformed wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    /// An `<img>` with this source. Pointer events stay on the wrapper.
    Image { src: &'a str },
    /// A preformatted, wrapped text block.
    Text { text: &'a str },
}

impl<'a> Content<'a> {
    #[must_use]
    pub fn of(artifact: &'a RenderableArtifact) -> Self {
        match artifact.kind() {
            ArtifactKind::Image => Self::Image { src: artifact.payload() },
            ArtifactKind::StructuredText | ArtifactKind::PlainText => Self::Text { text: artifact.payload() },
        }
    }
}
