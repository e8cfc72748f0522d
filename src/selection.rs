//! Selection manager: capacity-bounded, insertion-ordered seat selection.
//!
//! ## Adjacency policy
//!
//! A seat joins the selection when it shares a grid edge with a seat that is
//! already selected. A seat with no selected neighbor may only start a new,
//! disjoint block when the selection is empty, or when every selected seat is
//! boxed in (none has an available, unselected neighbor). A group therefore
//! cannot be split across the house while it could still grow in place.
//! Removal is always allowed.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::layout::{Layout, Seat};

/// Why a toggle was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The selection already holds `capacity` seats.
    AtCapacity,
    /// The seat touches no selected seat and the current block can still grow.
    NotAdjacent,
}

/// Outcome of [`Selection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    Rejected(RejectReason),
    /// The seat is occupied, reserved, or unknown.
    Unavailable,
}

impl SelectionChange {
    /// Whether the selection set was mutated.
    #[must_use]
    pub fn is_change(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// The selected seats, in the order they were picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    seats: Vec<Seat>,
    capacity: usize,
}

impl Selection {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { seats: Vec::with_capacity(capacity), capacity }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    #[must_use]
    pub fn contains(&self, seat_id: &str) -> bool {
        self.seats.iter().any(|s| s.id == seat_id)
    }

    /// Snapshots of the selected seats, oldest first.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Selected seat ids, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.seats.iter().map(|s| s.id.as_str())
    }

    /// Add or remove `seat_id`, enforcing availability, capacity, and adjacency.
    pub fn toggle(&mut self, seat_id: &str, layout: &Layout) -> SelectionChange {
        let Some(seat) = layout.seat(seat_id) else {
            return SelectionChange::Unavailable;
        };
        if !seat.is_available() {
            return SelectionChange::Unavailable;
        }
        if let Some(pos) = self.seats.iter().position(|s| s.id == seat.id) {
            self.seats.remove(pos);
            return SelectionChange::Removed;
        }
        if self.seats.len() >= self.capacity {
            return SelectionChange::Rejected(RejectReason::AtCapacity);
        }
        let touches_block = self.seats.iter().any(|s| layout.are_adjacent(s, seat));
        if !touches_block && !self.can_start_block(layout) {
            return SelectionChange::Rejected(RejectReason::NotAdjacent);
        }
        self.seats.push(seat.clone());
        SelectionChange::Added
    }

    /// Whether a seat touching no selected seat may be added.
    #[must_use]
    pub fn can_start_block(&self, layout: &Layout) -> bool {
        self.seats.iter().all(|selected| {
            layout
                .neighbors(selected)
                .iter()
                .all(|n| !n.is_available() || self.contains(&n.id))
        })
    }
}
