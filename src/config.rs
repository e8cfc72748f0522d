//! Widget configuration: venue presets, grid geometry, and interaction tunables.
//!
//! Hosts hand the widget a JSON string. Every key is optional; a `preset`
//! picks the starting point and any other key overrides that preset's value.
//! Nested objects such as `layout` override field by field; arrays replace.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::camera::{Camera, Point, ScaleLimits};
use crate::consts::{
    AISLE_AFTER, AISLE_GAP, DRAG_THRESHOLD_PX, HOME_OFFSET_X, HOME_OFFSET_Y, HOME_SCALE, ROW_SPACING, SEATS_PER_ROW,
    SEAT_SIZE, SELECTION_CAPACITY, WALKWAY_GAP, WHEEL_ZOOM_STEP,
};
use crate::error::{Result, SeatMapError};

/// A labeled box that replaces a span of seats in one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockSpec {
    /// Text drawn in the middle of the box.
    pub label: String,
    /// Row the box sits on.
    pub row: char,
    /// First seat number covered (1-based, inclusive).
    pub first_seat: u32,
    /// Last seat number covered (inclusive).
    pub last_seat: u32,
}

/// Grid geometry in model pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Row labels, front to back.
    pub rows: Vec<char>,
    pub seats_per_row: u32,
    pub seat_width: f64,
    pub seat_height: f64,
    /// Distance between consecutive row origins.
    pub row_spacing: f64,
    /// Extra gap after every second row.
    pub walkway_gap: f64,
    /// Seat number after which the center aisle opens.
    pub aisle_after: u32,
    pub aisle_gap: f64,
    pub blocks: Vec<BlockSpec>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: ('a'..='j').collect(),
            seats_per_row: SEATS_PER_ROW,
            seat_width: SEAT_SIZE,
            seat_height: SEAT_SIZE,
            row_spacing: ROW_SPACING,
            walkway_gap: WALKWAY_GAP,
            aisle_after: AISLE_AFTER,
            aisle_gap: AISLE_GAP,
            blocks: Vec::new(),
        }
    }
}

/// Stock venue shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenuePreset {
    /// Ten rows of twenty seats, zoom range 1.0–2.0.
    #[default]
    Theater,
    /// Twelve rows with a staff row up front, zoom range 0.5–3.0.
    Hall,
}

impl VenuePreset {
    /// Full configuration for this preset.
    #[must_use]
    pub fn config(self) -> SeatMapConfig {
        match self {
            Self::Theater => SeatMapConfig::default(),
            Self::Hall => {
                let staff = |first_seat, last_seat| BlockSpec {
                    label: "STAFF".to_owned(),
                    row: 'a',
                    first_seat,
                    last_seat,
                };
                SeatMapConfig {
                    layout: LayoutConfig {
                        rows: ('a'..='l').collect(),
                        blocks: vec![staff(1, AISLE_AFTER), staff(AISLE_AFTER + 1, SEATS_PER_ROW)],
                        ..LayoutConfig::default()
                    },
                    scale_limits: ScaleLimits::new(0.5, 3.0),
                    home_scale: 1.0,
                    ..SeatMapConfig::default()
                }
            }
        }
    }
}

/// Complete widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeatMapConfig {
    pub layout: LayoutConfig,
    pub scale_limits: ScaleLimits,
    /// Scale at mount and after a reset.
    pub home_scale: f64,
    /// Pan offset (model pixels) at mount and after a reset.
    pub home_offset: Point,
    /// Maximum number of selected seats.
    pub capacity: usize,
    /// Pointer travel (screen pixels) below which a release counts as a tap.
    pub drag_threshold_px: f64,
    /// Scale change per wheel event.
    pub wheel_zoom_step: f64,
}

impl Default for SeatMapConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            scale_limits: ScaleLimits::default(),
            home_scale: HOME_SCALE,
            home_offset: Point::new(HOME_OFFSET_X, HOME_OFFSET_Y),
            capacity: SELECTION_CAPACITY,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
        }
    }
}

impl SeatMapConfig {
    /// Parse a JSON config, apply it over its preset, and validate the result.
    ///
    /// An empty or whitespace-only string yields the theater preset.
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::ConfigParse`] for malformed JSON and
    /// [`SeatMapError::InvalidConfig`] when validation fails.
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut overrides: Value = if raw.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(raw)?
        };

        let preset = match overrides.as_object_mut().and_then(|fields| fields.remove("preset")) {
            Some(name) => serde_json::from_value(name)?,
            None => VenuePreset::default(),
        };
        let mut merged = serde_json::to_value(preset.config())?;
        merge_json(&mut merged, overrides);

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Check geometry, scale bounds, and block placement.
    ///
    /// # Errors
    ///
    /// Returns [`SeatMapError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.rows.is_empty() {
            return invalid("at least one row is required");
        }
        let mut seen = HashSet::new();
        for row in &layout.rows {
            if !seen.insert(*row) {
                return invalid(format!("duplicate row label '{row}'"));
            }
        }
        if layout.seats_per_row == 0 {
            return invalid("seats_per_row must be positive");
        }
        if !(layout.seat_width > 0.0 && layout.seat_height > 0.0) {
            return invalid("seat size must be positive");
        }
        if !(layout.row_spacing.is_finite() && layout.walkway_gap.is_finite() && layout.aisle_gap.is_finite()) {
            return invalid("spacing values must be finite");
        }

        let limits = self.scale_limits;
        if !(limits.min > 0.0 && limits.max.is_finite()) {
            return invalid("scale limits must be positive and finite");
        }
        if limits.min > limits.max {
            return invalid(format!("min scale {} exceeds max scale {}", limits.min, limits.max));
        }
        if !(self.home_scale.is_finite() && self.home_offset.x.is_finite() && self.home_offset.y.is_finite()) {
            return invalid("home transform must be finite");
        }
        if self.capacity == 0 {
            return invalid("capacity must be positive");
        }
        if !(self.drag_threshold_px >= 0.0 && self.drag_threshold_px.is_finite()) {
            return invalid("drag_threshold_px must be a non-negative number");
        }
        if !(self.wheel_zoom_step > 0.0 && self.wheel_zoom_step.is_finite()) {
            return invalid("wheel_zoom_step must be positive");
        }

        for (i, block) in layout.blocks.iter().enumerate() {
            if !seen.contains(&block.row) {
                return invalid(format!("block '{}' sits on unknown row '{}'", block.label, block.row));
            }
            if block.first_seat == 0 || block.first_seat > block.last_seat || block.last_seat > layout.seats_per_row {
                return invalid(format!(
                    "block '{}' spans seats {}..={} outside 1..={}",
                    block.label, block.first_seat, block.last_seat, layout.seats_per_row
                ));
            }
            let overlap = layout.blocks[..i].iter().find(|earlier| {
                earlier.row == block.row && earlier.first_seat <= block.last_seat && block.first_seat <= earlier.last_seat
            });
            if let Some(earlier) = overlap {
                return invalid(format!(
                    "block '{}' overlaps block '{}' on row '{}'",
                    block.label, earlier.label, block.row
                ));
            }
        }
        Ok(())
    }

    /// A camera resting at this config's home transform.
    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera::new(self.home_scale, self.home_offset, self.scale_limits)
    }
}

/// Deep-merge `patch` into `base`. Objects merge key by key; anything else replaces.
fn merge_json(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_fields), Value::Object(patch_fields)) => {
            for (key, value) in patch_fields {
                merge_json(base_fields.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

fn invalid(message: impl Into<String>) -> Result<()> {
    Err(SeatMapError::InvalidConfig(message.into()))
}
