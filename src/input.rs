//! Input model: wheel deltas, touch points, and the gesture state machine.
//!
//! `Gesture` is the active interaction tracked between a press and its
//! release. Each variant carries exactly the context its transitions need, so
//! a pinch can never observe a stale drag origin and a drag never sees pinch
//! state. The transitions themselves live in [`crate::engine::EngineCore`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No pointer held.
    #[default]
    Idle,
    /// One pointer or finger held down; moves pan the view.
    Dragging {
        /// Where the press started, for tap detection on release.
        start: Point,
        /// Position of the previous event, for incremental pan deltas.
        last: Point,
        /// Model point under the press, hit-tested if the release is a tap.
        anchor: Point,
    },
    /// Two fingers down; moves zoom the view.
    Pinching {
        /// Finger distance when the pinch began.
        initial_distance: f64,
        /// Camera scale when the pinch began.
        initial_scale: f64,
    },
}

impl Gesture {
    /// Begin a drag at screen point `at`, over model point `anchor`.
    #[must_use]
    pub fn press(at: Point, anchor: Point) -> Self {
        Self::Dragging { start: at, last: at, anchor }
    }

    /// Begin a pinch between two fingers.
    #[must_use]
    pub fn pinch(a: Point, b: Point, scale: f64) -> Self {
        Self::Pinching { initial_distance: a.distance_to(b), initial_scale: scale }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Zoom ratio for a pinch currently spanning `a`..`b`, or `None` when not
    /// pinching or when the initial distance was zero.
    #[must_use]
    pub fn pinch_ratio(&self, a: Point, b: Point) -> Option<(f64, f64)> {
        match *self {
            Self::Pinching { initial_distance, initial_scale } if initial_distance > 0.0 => {
                Some((a.distance_to(b) / initial_distance, initial_scale))
            }
            _ => None,
        }
    }
}

/// Whether a press released at `end` after starting at `start` counts as a tap.
#[must_use]
pub fn is_tap(start: Point, end: Point, threshold_px: f64) -> bool {
    start.distance_to(end) < threshold_px
}
