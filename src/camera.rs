#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{HOME_OFFSET_X, HOME_OFFSET_Y, HOME_SCALE, MAX_SCALE, MIN_SCALE};

/// A point in either screen or model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Inclusive bounds for the camera scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: MIN_SCALE, max: MAX_SCALE }
    }
}

impl ScaleLimits {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `scale` into the bounds. Never panics, even for inverted bounds.
    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.min(self.max).max(self.min)
    }
}

/// Pan/zoom view transform over the seat grid.
///
/// The renderer applies `scale` first and then translates by `offset`, so a
/// model point `p` lands on the backing store at `(p + offset) * scale`.
/// `offset` is therefore in model pixels, not screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub scale: f64,
    pub offset: Point,
    pub limits: ScaleLimits,
    home_scale: f64,
    home_offset: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(HOME_SCALE, Point::new(HOME_OFFSET_X, HOME_OFFSET_Y), ScaleLimits::default())
    }
}

impl Camera {
    /// Create a camera resting at its home position. `home_scale` is clamped into `limits`.
    #[must_use]
    pub fn new(home_scale: f64, home_offset: Point, limits: ScaleLimits) -> Self {
        let scale = limits.clamp(home_scale);
        Self { scale, offset: home_offset, limits, home_scale: scale, home_offset }
    }

    /// The scale restored by [`Camera::reset`].
    #[must_use]
    pub fn home_scale(&self) -> f64 {
        self.home_scale
    }

    /// The offset restored by [`Camera::reset`].
    #[must_use]
    pub fn home_offset(&self) -> Point {
        self.home_offset
    }

    /// Convert a point relative to the canvas's on-screen box into model space.
    ///
    /// `pixel_size` is the canvas backing store, `css_size` its rendered box.
    /// The two differ whenever CSS stretches the canvas, so the point is first
    /// rescaled into backing pixels before the view transform is undone.
    #[must_use]
    pub fn screen_to_model(&self, screen: Point, pixel_size: Size, css_size: Size) -> Point {
        let ratio_x = if css_size.width > 0.0 { pixel_size.width / css_size.width } else { 1.0 };
        let ratio_y = if css_size.height > 0.0 { pixel_size.height / css_size.height } else { 1.0 };
        Point {
            x: (screen.x * ratio_x) / self.scale - self.offset.x,
            y: (screen.y * ratio_y) / self.scale - self.offset.y,
        }
    }

    /// Convert a model point to backing-store pixels.
    #[must_use]
    pub fn model_to_screen(&self, model: Point) -> Point {
        Point {
            x: (model.x + self.offset.x) * self.scale,
            y: (model.y + self.offset.y) * self.scale,
        }
    }

    /// Pan by a screen-space delta. Divided by scale so the grid tracks the pointer at any zoom.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx / self.scale;
        self.offset.y += dy / self.scale;
    }

    /// Step the scale for one wheel event. Positive `delta` (scrolling down) zooms out.
    pub fn zoom_by(&mut self, delta: f64, step: f64) {
        let next = if delta > 0.0 { self.scale - step } else { self.scale + step };
        self.scale = self.limits.clamp(next);
    }

    /// Set the scale to `base_scale * ratio`, used by pinch gestures.
    ///
    /// Non-finite or non-positive ratios leave the scale untouched.
    pub fn zoom_to(&mut self, ratio: f64, base_scale: f64) {
        if !ratio.is_finite() || ratio <= 0.0 {
            return;
        }
        self.scale = self.limits.clamp(base_scale * ratio);
    }

    /// Restore the home scale and offset.
    pub fn reset(&mut self) {
        self.scale = self.home_scale;
        self.offset = self.home_offset;
    }
}
