//! Crate-wide error type.

/// Errors surfaced by configuration, reference-data lookups, and drawing.
#[derive(Debug, thiserror::Error)]
pub enum SeatMapError {
    /// A configuration value failed validation.
    #[error("invalid seat map config: {0}")]
    InvalidConfig(String),
    /// Configuration or occupancy JSON could not be parsed.
    #[error("failed to parse seat map json: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// A seat is tagged occupied but has no occupant record.
    #[error("seat {seat_id} is occupied but has no occupant")]
    MissingOccupant { seat_id: String },
    /// The drawing surface rejected a call.
    #[error("drawing surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, SeatMapError>;
