//! Shared numeric constants for the seat map.

// ── Layout ──────────────────────────────────────────────────────

/// Default seat edge length in model pixels.
pub const SEAT_SIZE: f64 = 30.0;

/// Vertical distance between consecutive row origins.
pub const ROW_SPACING: f64 = 40.0;

/// Extra vertical gap inserted after every second row.
pub const WALKWAY_GAP: f64 = 20.0;

/// Extra horizontal gap for the center aisle.
pub const AISLE_GAP: f64 = 80.0;

/// The aisle follows this seat number.
pub const AISLE_AFTER: u32 = 10;

/// Seats per row in the stock venues.
pub const SEATS_PER_ROW: u32 = 20;

// ── Camera ──────────────────────────────────────────────────────

/// Scale applied when the widget mounts and after a reset.
pub const HOME_SCALE: f64 = 1.2;

/// Pan offset applied when the widget mounts and after a reset.
pub const HOME_OFFSET_X: f64 = 60.0;
pub const HOME_OFFSET_Y: f64 = 20.0;

/// Default scale bounds.
pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 2.0;

/// Scale step per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 0.02;

// ── Interaction ─────────────────────────────────────────────────

/// Pointer travel below this many screen pixels counts as a tap.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Maximum number of seats in one selection.
pub const SELECTION_CAPACITY: usize = 5;

/// Screen-pixel nudge that keeps the tooltip clear of its seat.
pub const TOOLTIP_OFFSET_PX: f64 = 20.0;

// ── Rendering ───────────────────────────────────────────────────

/// Corner radius of a seat in model pixels.
pub const SEAT_CORNER_RADIUS: f64 = 5.0;

/// Seat label inset from the seat's left edge.
pub const LABEL_INSET_X: f64 = 5.0;

/// Seat label baseline distance above the seat's bottom edge.
pub const LABEL_INSET_BOTTOM: f64 = 10.0;
