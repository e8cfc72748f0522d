//! Responsive canvas sizing from the host's breakpoint signal.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::Size;

/// Maximum canvas width on desktop layouts.
const DESKTOP_MAX_WIDTH: f64 = 900.0;

/// Horizontal room kept for side panels on desktop layouts.
const DESKTOP_SIDE_MARGIN: f64 = 400.0;

/// Vertical room kept for page chrome on desktop layouts.
const DESKTOP_CHROME_HEIGHT: f64 = 200.0;

const COMPACT_SIDE_MARGIN: f64 = 20.0;
const COMPACT_CHROME_HEIGHT: f64 = 150.0;

/// Which breakpoints currently match, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakpoints {
    pub handset: bool,
    pub tablet: bool,
}

impl Breakpoints {
    #[must_use]
    pub fn is_compact(self) -> bool {
        self.handset || self.tablet
    }
}

/// Canvas size for a window of `viewport` CSS pixels. Never below 1×1.
#[must_use]
pub fn canvas_size(viewport: Size, breakpoints: Breakpoints) -> Size {
    let (width, height) = if breakpoints.is_compact() {
        (viewport.width - COMPACT_SIDE_MARGIN, viewport.height - COMPACT_CHROME_HEIGHT)
    } else {
        (
            (viewport.width - DESKTOP_SIDE_MARGIN).min(DESKTOP_MAX_WIDTH),
            viewport.height - DESKTOP_CHROME_HEIGHT,
        )
    };
    Size::new(width.max(1.0), height.max(1.0))
}
