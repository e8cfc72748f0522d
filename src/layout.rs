//! Seat map model: seat and block records, occupancy reference data, and the
//! pure layout builder that positions them in model space.
//!
//! The layout is built once at mount from a [`LayoutConfig`] and an
//! [`Occupancy`] snapshot and never changes afterwards. The renderer walks
//! [`Layout::elements`] in order; hit-testing and the selection rules look
//! seats up through the id index.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::config::{BlockSpec, LayoutConfig};
use crate::error::Result;

/// Booking state of a seat, fixed for the widget's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
    Reserved,
}

/// One bookable seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seat {
    /// Row letter followed by seat number, e.g. `"a1"`.
    pub id: String,
    pub row: char,
    /// 1-based seat number within the row.
    pub number: u32,
    /// Left edge in model space.
    pub x: f64,
    /// Top edge in model space.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub status: SeatStatus,
}

impl Seat {
    /// Whether `p` lies strictly inside the seat. Edges belong to neither neighbor.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.x + self.width && p.y > self.y && p.y < self.y + self.height
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }
}

/// A labeled, non-interactive box (staff area, stage) occupying a seat span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecorativeBlock {
    pub label: String,
    pub row: char,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Anything drawn on the seat map.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Seat(Seat),
    Block(DecorativeBlock),
}

/// Who sits in an occupied seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub username: String,
    pub name: String,
}

/// Reference data resolving seat status. Loaded once at mount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Occupancy {
    /// Seat id → occupant.
    pub occupied: HashMap<String, Occupant>,
    /// Individually reserved seat ids.
    pub reserved_seats: HashSet<String>,
    /// Rows reserved in full.
    pub reserved_rows: HashSet<char>,
}

impl Occupancy {
    /// Parse occupancy JSON. An empty string yields no occupancy at all.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SeatMapError::ConfigParse`] for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// The sample house used when the host supplies no data.
    ///
    /// Includes an occupant for `f21`, which does not exist on a 20-seat row
    /// and is dropped by the layout builder.
    #[must_use]
    pub fn demo() -> Self {
        let occupant = |n: u32| Occupant { username: format!("user{n}"), name: format!("User {n}") };
        Self {
            occupied: [("a1", 1), ("a2", 2), ("b3", 3), ("f21", 4), ("j11", 5)]
                .into_iter()
                .map(|(id, n)| (id.to_owned(), occupant(n)))
                .collect(),
            reserved_seats: ["a3", "b1", "b2", "f20", "j10"].into_iter().map(str::to_owned).collect(),
            reserved_rows: ['a', 'g'].into_iter().collect(),
        }
    }

    #[must_use]
    pub fn occupant(&self, seat_id: &str) -> Option<&Occupant> {
        self.occupied.get(seat_id)
    }

    /// Resolve a seat's status: occupied beats row reservation beats seat reservation.
    #[must_use]
    pub fn status_of(&self, row: char, seat_id: &str) -> SeatStatus {
        if self.occupied.contains_key(seat_id) {
            SeatStatus::Occupied
        } else if self.reserved_rows.contains(&row) || self.reserved_seats.contains(seat_id) {
            SeatStatus::Reserved
        } else {
            SeatStatus::Available
        }
    }
}

/// The positioned seat map.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    elements: Vec<Element>,
    index: HashMap<String, usize>,
    rows: Vec<char>,
}

impl Layout {
    /// All elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Seats only, in paint order.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.elements.iter().filter_map(|e| match e {
            Element::Seat(seat) => Some(seat),
            Element::Block(_) => None,
        })
    }

    #[must_use]
    pub fn seat(&self, id: &str) -> Option<&Seat> {
        match self.elements.get(*self.index.get(id)?)? {
            Element::Seat(seat) => Some(seat),
            Element::Block(_) => None,
        }
    }

    #[must_use]
    pub fn seat_at(&self, row: char, number: u32) -> Option<&Seat> {
        self.seat(&seat_id(row, number))
    }

    /// Row labels front to back.
    #[must_use]
    pub fn rows(&self) -> &[char] {
        &self.rows
    }

    /// The up-to-four seats sharing an edge with `seat` in the grid:
    /// same row one number apart, or same number one row apart.
    #[must_use]
    pub fn neighbors(&self, seat: &Seat) -> Vec<&Seat> {
        let mut out = Vec::with_capacity(4);
        if let Some(prev) = seat.number.checked_sub(1) {
            out.extend(self.seat_at(seat.row, prev));
        }
        out.extend(self.seat_at(seat.row, seat.number + 1));
        if let Some(r) = self.rows.iter().position(|r| *r == seat.row) {
            if let Some(front) = r.checked_sub(1).and_then(|i| self.rows.get(i)) {
                out.extend(self.seat_at(*front, seat.number));
            }
            if let Some(back) = self.rows.get(r + 1) {
                out.extend(self.seat_at(*back, seat.number));
            }
        }
        out
    }

    /// Whether two seats share an edge in the grid.
    #[must_use]
    pub fn are_adjacent(&self, a: &Seat, b: &Seat) -> bool {
        if a.row == b.row {
            return a.number.abs_diff(b.number) == 1;
        }
        if a.number != b.number {
            return false;
        }
        let pos = |row: char| self.rows.iter().position(|r| *r == row);
        match (pos(a.row), pos(b.row)) {
            (Some(ra), Some(rb)) => ra.abs_diff(rb) == 1,
            _ => false,
        }
    }
}

/// Build a seat id from its row and number.
#[must_use]
pub fn seat_id(row: char, number: u32) -> String {
    format!("{row}{number}")
}

/// Left edge of seat `number` (1-based), including the aisle gap past `aisle_after`.
#[must_use]
pub fn seat_x(config: &LayoutConfig, number: u32) -> f64 {
    let x = f64::from(number.saturating_sub(1)) * config.seat_width;
    if number > config.aisle_after { x + config.aisle_gap } else { x }
}

/// Top edge of the row at `row_index` (0-based). A walkway follows every second row.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn row_y(config: &LayoutConfig, row_index: usize) -> f64 {
    let walkways = (row_index / 2) as f64;
    row_index as f64 * config.row_spacing + walkways * config.walkway_gap
}

/// Lay out every row of seats and blocks.
///
/// Seats covered by a block span are replaced by the block. Occupancy entries
/// that name seats outside the grid are dropped with a warning.
#[must_use]
pub fn build_layout(config: &LayoutConfig, occupancy: &Occupancy) -> Layout {
    let mut elements = Vec::new();
    let mut index = HashMap::new();

    for (row_index, &row) in config.rows.iter().enumerate() {
        let y = row_y(config, row_index);
        let row_blocks: Vec<&BlockSpec> = config.blocks.iter().filter(|b| b.row == row).collect();

        for number in 1..=config.seats_per_row {
            for block in row_blocks.iter().filter(|b| b.first_seat == number) {
                elements.push(Element::Block(place_block(config, block, y)));
            }
            if row_blocks.iter().any(|b| (b.first_seat..=b.last_seat).contains(&number)) {
                continue;
            }

            let id = seat_id(row, number);
            let status = occupancy.status_of(row, &id);
            index.insert(id.clone(), elements.len());
            elements.push(Element::Seat(Seat {
                id,
                row,
                number,
                x: seat_x(config, number),
                y,
                width: config.seat_width,
                height: config.seat_height,
                status,
            }));
        }
    }

    for id in occupancy.occupied.keys().chain(occupancy.reserved_seats.iter()) {
        if !index.contains_key(id) {
            tracing::warn!(seat = %id, "occupancy names a seat outside the layout; ignored");
        }
    }
    tracing::debug!(elements = elements.len(), seats = index.len(), "seat layout built");

    Layout { elements, index, rows: config.rows.clone() }
}

fn place_block(config: &LayoutConfig, block: &BlockSpec, y: f64) -> DecorativeBlock {
    let x = seat_x(config, block.first_seat);
    let right = seat_x(config, block.last_seat) + config.seat_width;
    DecorativeBlock {
        label: block.label.clone(),
        row: block.row,
        x,
        y,
        width: right - x,
        height: config.seat_height,
    }
}
