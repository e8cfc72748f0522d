//! Occupant tooltip for tapped, occupied seats.

#[cfg(test)]
#[path = "tooltip_test.rs"]
mod tooltip_test;

use serde::Serialize;

use crate::camera::{Camera, Point};
use crate::consts::TOOLTIP_OFFSET_PX;
use crate::error::{Result, SeatMapError};
use crate::layout::{Occupancy, Seat};

/// The single active tooltip, positioned in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub seat_id: String,
    pub username: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Build the tooltip for an occupied seat.
///
/// The box sits just below the seat's bottom-left corner. `screen_origin` is
/// the page position of the canvas.
///
/// # Errors
///
/// Returns [`SeatMapError::MissingOccupant`] when the seat has no occupant
/// record. Debug builds assert instead.
pub fn show(seat: &Seat, occupancy: &Occupancy, camera: &Camera, screen_origin: Point) -> Result<Tooltip> {
    let occupant = occupancy.occupant(&seat.id);
    debug_assert!(occupant.is_some(), "seat {} is occupied but has no occupant", seat.id);
    let Some(occupant) = occupant else {
        return Err(SeatMapError::MissingOccupant { seat_id: seat.id.clone() });
    };

    let anchor = camera.model_to_screen(Point::new(seat.x, seat.y + seat.height));
    Ok(Tooltip {
        seat_id: seat.id.clone(),
        username: occupant.username.clone(),
        name: occupant.name.clone(),
        x: anchor.x + screen_origin.x + TOOLTIP_OFFSET_PX,
        y: anchor.y + screen_origin.y + TOOLTIP_OFFSET_PX,
    })
}
