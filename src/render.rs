//! Rendering: draws the seat map onto a 2D drawing surface.
//!
//! Drawing goes through the [`Surface`] trait so the scene code never sees a
//! browser type. [`web_sys::CanvasRenderingContext2d`] implements it in
//! [`crate::web`]; tests record calls instead. The renderer reads layout,
//! camera, and selection state and mutates none of it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Size};
use crate::consts::{LABEL_INSET_BOTTOM, LABEL_INSET_X, SEAT_CORNER_RADIUS};
use crate::error::Result;
use crate::layout::{DecorativeBlock, Element, Layout, Seat, SeatStatus};
use crate::selection::Selection;

/// Seat outline color.
const SEAT_STROKE: &str = "black";

/// Seat id label color.
const SEAT_LABEL_COLOR: &str = "white";
const SEAT_LABEL_FONT: &str = "10px sans-serif";

const BLOCK_FILL: &str = "#4a4a4a";
const BLOCK_LABEL_COLOR: &str = "white";
const BLOCK_LABEL_FONT: &str = "bold 14px sans-serif";

// =============================================================
// Surface
// =============================================================

/// How a closed path or rectangle is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(&'static str),
    /// Linear gradient from `top_color` at `top` to `bottom_color` at `bottom`.
    VerticalGradient { top: f64, bottom: f64, top_color: &'static str, bottom_color: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

/// Font, color, and anchoring for [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub color: &'static str,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// The 2D drawing operations the seat map needs.
///
/// Fallible operations mirror the browser API, where transforms, gradient
/// stops, and text can throw.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn restore(&mut self);
    /// # Errors
    /// Returns an error when the surface rejects the transform.
    fn scale(&mut self, s: f64) -> Result<()>;
    /// # Errors
    /// Returns an error when the surface rejects the transform.
    fn translate(&mut self, x: f64, y: f64) -> Result<()>;
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn close_path(&mut self);
    /// Fill the current path.
    ///
    /// # Errors
    /// Returns an error when a gradient cannot be built.
    fn fill(&mut self, paint: &Paint) -> Result<()>;
    /// Stroke the current path with a solid color.
    fn stroke(&mut self, color: &str);
    /// # Errors
    /// Returns an error when a gradient cannot be built.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) -> Result<()>;
    /// # Errors
    /// Returns an error when the surface cannot draw text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()>;
}

// =============================================================
// Scene
// =============================================================

/// Draw the full scene.
///
/// `canvas` is the backing-store size; the whole of it is cleared first. The
/// surface's save/restore stack is balanced even when a call fails.
///
/// # Errors
///
/// Returns the first surface error encountered.
pub fn draw(surface: &mut dyn Surface, layout: &Layout, camera: &Camera, selection: &Selection, canvas: Size) -> Result<()> {
    surface.clear_rect(0.0, 0.0, canvas.width, canvas.height);
    surface.save();
    let result = draw_elements(surface, layout, camera, selection);
    surface.restore();
    result
}

fn draw_elements(surface: &mut dyn Surface, layout: &Layout, camera: &Camera, selection: &Selection) -> Result<()> {
    surface.scale(camera.scale)?;
    surface.translate(camera.offset.x, camera.offset.y)?;
    for element in layout.elements() {
        match element {
            Element::Seat(seat) => draw_seat(surface, seat, selection.contains(&seat.id))?,
            Element::Block(block) => draw_block(surface, block)?,
        }
    }
    Ok(())
}

fn draw_seat(surface: &mut dyn Surface, seat: &Seat, selected: bool) -> Result<()> {
    let (top_color, bottom_color) = seat_palette(seat.status, selected);
    let paint = Paint::VerticalGradient { top: seat.y, bottom: seat.y + seat.height, top_color, bottom_color };
    round_rect(
        surface,
        seat.x,
        seat.y,
        seat.width,
        seat.height,
        CornerRadii::uniform(SEAT_CORNER_RADIUS),
        Some(&paint),
        Some(SEAT_STROKE),
    )?;

    let style = TextStyle {
        font: SEAT_LABEL_FONT,
        color: SEAT_LABEL_COLOR,
        align: TextAlign::Left,
        baseline: TextBaseline::Alphabetic,
    };
    surface.fill_text(&seat.id, seat.x + LABEL_INSET_X, seat.y + seat.height - LABEL_INSET_BOTTOM, &style)
}

fn draw_block(surface: &mut dyn Surface, block: &DecorativeBlock) -> Result<()> {
    surface.fill_rect(block.x, block.y, block.width, block.height, &Paint::Solid(BLOCK_FILL))?;
    let style = TextStyle {
        font: BLOCK_LABEL_FONT,
        color: BLOCK_LABEL_COLOR,
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    };
    surface.fill_text(&block.label, block.x + block.width / 2.0, block.y + block.height / 2.0, &style)
}

/// Gradient colors (top, bottom) for a seat.
///
/// Selection wins over status; occupied beats reserved beats available.
#[must_use]
pub fn seat_palette(status: SeatStatus, selected: bool) -> (&'static str, &'static str) {
    if selected {
        return ("orange", "yellow");
    }
    match status {
        SeatStatus::Occupied => ("darkred", "red"),
        SeatStatus::Reserved => ("darkgrey", "grey"),
        SeatStatus::Available => ("darkgreen", "green"),
    }
}

// =============================================================
// Rounded rectangle
// =============================================================

/// Per-corner radii. Corners left at their default are square.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    #[must_use]
    pub fn uniform(r: f64) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }
}

/// Trace a rounded rectangle, then fill and/or stroke it.
///
/// # Errors
///
/// Returns the surface error from filling.
#[allow(clippy::too_many_arguments)]
pub fn round_rect(
    surface: &mut dyn Surface,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radii: CornerRadii,
    fill: Option<&Paint>,
    stroke: Option<&str>,
) -> Result<()> {
    let CornerRadii { top_left, top_right, bottom_right, bottom_left } = radii;
    surface.begin_path();
    surface.move_to(x + top_left, y);
    surface.line_to(x + w - top_right, y);
    surface.quadratic_curve_to(x + w, y, x + w, y + top_right);
    surface.line_to(x + w, y + h - bottom_right);
    surface.quadratic_curve_to(x + w, y + h, x + w - bottom_right, y + h);
    surface.line_to(x + bottom_left, y + h);
    surface.quadratic_curve_to(x, y + h, x, y + h - bottom_left);
    surface.line_to(x, y + top_left);
    surface.quadratic_curve_to(x, y, x + top_left, y);
    surface.close_path();

    if let Some(paint) = fill {
        surface.fill(paint)?;
    }
    if let Some(color) = stroke {
        surface.stroke(color);
    }
    Ok(())
}
