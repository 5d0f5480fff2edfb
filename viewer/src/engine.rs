use crate::artifact::RenderableArtifact;
use crate::camera::{Point, Transform, Viewport};
use crate::consts::{BUTTON_ZOOM_STEP, WHEEL_ZOOM_STEP};
use crate::input::{Button, DragState, WheelDelta};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Mouse cursor the host should show over the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The transform changed; re-apply it to the render surface.
    RenderNeeded,
    /// The drag state changed; swap the pointer cursor.
    SetCursor(Cursor),
}

/// Viewer state: the artifact on screen and how it is panned and zoomed.
///
/// All handlers are synchronous and return the actions the host must apply.
/// Without an installed artifact every input handler is a no-op that returns
/// no actions.
#[derive(Debug, Clone, Default)]
pub struct ViewerCore {
    artifact: Option<RenderableArtifact>,
    viewport: Viewport,
    drag: DragState,
}

impl ViewerCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Artifact lifecycle ---

    /// Show a new artifact, replacing any previous one. Pan, zoom, and drag
    /// state always start fresh.
    pub fn install(&mut self, artifact: RenderableArtifact) -> Vec<Action> {
        self.artifact = Some(artifact);
        self.viewport.reset();
        self.drag = DragState::Idle;
        vec![Action::RenderNeeded, Action::SetCursor(Cursor::Grab)]
    }

    /// Drop the current artifact and its view state.
    pub fn clear(&mut self) -> Option<RenderableArtifact> {
        self.viewport.reset();
        self.drag = DragState::Idle;
        self.artifact.take()
    }

    // --- Pointer input ---

    /// Primary-button press starts a drag anchored at the current offset.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if self.artifact.is_none() || button != Button::Primary {
            return Vec::new();
        }
        self.drag = DragState::Dragging { anchor: screen_pt - self.viewport.offset };
        vec![Action::SetCursor(Cursor::Grabbing)]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.artifact.is_none() {
            return Vec::new();
        }
        let DragState::Dragging { anchor } = self.drag else {
            return Vec::new();
        };
        self.viewport.offset = screen_pt - anchor;
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_drag()
    }

    /// Leaving the surface ends a drag exactly like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_drag()
    }

    fn end_drag(&mut self) -> Vec<Action> {
        if self.artifact.is_none() || !self.drag.is_dragging() {
            return Vec::new();
        }
        self.drag = DragState::Idle;
        vec![Action::SetCursor(Cursor::Grab)]
    }

    // --- Zoom ---

    /// One wheel notch zooms by a fixed step; only the sign of `dy` matters.
    /// Handled in both drag states and never moves the offset.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.nudge_scale(delta.zoom_direction() * WHEEL_ZOOM_STEP)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.nudge_scale(BUTTON_ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.nudge_scale(-BUTTON_ZOOM_STEP)
    }

    /// Restore unit scale and zero offset. A drag in progress keeps going.
    pub fn reset_view(&mut self) -> Vec<Action> {
        if self.artifact.is_none() {
            return Vec::new();
        }
        self.viewport.reset();
        vec![Action::RenderNeeded]
    }

    #[allow(clippy::float_cmp)]
    fn nudge_scale(&mut self, delta: f64) -> Vec<Action> {
        if self.artifact.is_none() {
            return Vec::new();
        }
        let before = self.viewport.scale();
        self.viewport.nudge_scale(delta);
        if self.viewport.scale() == before {
            return Vec::new();
        }
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn artifact(&self) -> Option<&RenderableArtifact> {
        self.artifact.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.viewport.offset
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// The transform the render surface should apply right now.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.viewport.transform()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.viewport.zoom_percent()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.drag.is_dragging() { Cursor::Grabbing } else { Cursor::Grab }
    }
}
