#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point, Size};
use crate::layout::{Layout, Seat};

/// Canvas placement needed to map pointer positions into the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    /// Backing-store size (`canvas.width` / `canvas.height`).
    pub pixel_size: Size,
    /// Rendered CSS box size.
    pub css_size: Size,
    /// Page position of the CSS box's top-left corner.
    pub screen_origin: Point,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            pixel_size: Size::new(1.0, 1.0),
            css_size: Size::new(1.0, 1.0),
            screen_origin: Point::default(),
        }
    }
}

/// Which seat (if any) contains `model_pt`. Decorative blocks never hit.
#[must_use]
pub fn seat_at_point(layout: &Layout, model_pt: Point) -> Option<&Seat> {
    layout.seats().find(|seat| seat.contains(model_pt))
}

/// Model point under a position given relative to the canvas's CSS box.
#[must_use]
pub fn to_model(camera: &Camera, geometry: &CanvasGeometry, local_pt: Point) -> Point {
    camera.screen_to_model(local_pt, geometry.pixel_size, geometry.css_size)
}

/// Hit-test a point given relative to the canvas's CSS box.
#[must_use]
pub fn hit_test<'a>(layout: &'a Layout, camera: &Camera, geometry: &CanvasGeometry, local_pt: Point) -> Option<&'a Seat> {
    seat_at_point(layout, to_model(camera, geometry, local_pt))
}
