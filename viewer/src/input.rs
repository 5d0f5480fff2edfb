//! Input model: mouse buttons, wheel deltas, and the drag state machine.
//!
//! The viewer only distinguishes two gestures. `DragState::Idle` waits for a
//! primary-button press; `DragState::Dragging` carries the anchor captured at
//! press time so every move event can recompute the offset from scratch
//! instead of accumulating per-event deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Unknown codes map to `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels. Ignored by the viewer.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// A purely vertical delta.
    #[must_use]
    pub fn vertical(dy: f64) -> Self {
        Self { dx: 0.0, dy }
    }

    /// Zoom direction of this delta: `1.0` for scrolling up, `-1.0` for
    /// scrolling down, `0.0` when there is no vertical movement.
    #[must_use]
    pub fn zoom_direction(&self) -> f64 {
        if self.dy < 0.0 {
            1.0
        } else if self.dy > 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

/// Drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// The primary button is held over the artifact.
    Dragging {
        /// Pointer position minus the offset at press time.
        anchor: Point,
    },
}

impl DragState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The drag anchor, present exactly while dragging.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Dragging { anchor } => Some(*anchor),
        }
    }
}
