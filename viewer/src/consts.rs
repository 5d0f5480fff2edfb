//! Shared numeric constants for the viewer crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed scale factor.
pub const MIN_SCALE: f64 = 0.25;

/// Largest allowed scale factor.
pub const MAX_SCALE: f64 = 3.0;

/// Scale factor of a freshly installed artifact.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Scale change for one zoom-in / zoom-out button press.
pub const BUTTON_ZOOM_STEP: f64 = 0.25;

/// Scale change for one wheel notch, regardless of delta magnitude.
pub const WHEEL_ZOOM_STEP: f64 = 0.1;

// ── Rendering ───────────────────────────────────────────────────

/// CSS transition applied while the content is not being dragged.
pub const SETTLE_TRANSITION: &str = "transform 0.2s ease";
