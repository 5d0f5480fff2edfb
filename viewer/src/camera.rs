#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use crate::consts::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE};

/// A point or vector in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Pan/zoom parameters for the artifact currently on screen.
///
/// `scale` is a uniform factor about the content's own center and always lies
/// in `[MIN_SCALE, MAX_SCALE]`. `offset` is a free pan in CSS pixels with no
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE, offset: Point::zero() }
    }
}

impl Viewport {
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale, clamped into `[MIN_SCALE, MAX_SCALE]`.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Add `delta` to the scale, clamped.
    pub fn nudge_scale(&mut self, delta: f64) {
        self.set_scale(self.scale + delta);
    }

    /// Restore unit scale and zero offset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scale as a whole percentage, for on-screen display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// The transform the render surface applies to the artifact element.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform { scale_factor: self.scale, translate_x: self.offset.x, translate_y: self.offset.y }
    }
}

/// Clamp a requested scale into the supported range.
///
/// NaN collapses to the default scale so the range invariant cannot be broken
/// by a malformed delta.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return DEFAULT_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Composed render transform: scale about the element center, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_factor: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    /// Map a point of the untransformed element to its rendered position.
    ///
    /// `center` is the element's own center in the same coordinate space.
    #[must_use]
    pub fn apply(&self, local: Point, center: Point) -> Point {
        Point {
            x: center.x + (local.x - center.x) * self.scale_factor + self.translate_x,
            y: center.y + (local.y - center.y) * self.scale_factor + self.translate_y,
        }
    }

    /// CSS `transform` value. CSS applies the rightmost function first, so
    /// `scale` runs before `translate`.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale_factor
        )
    }
}
