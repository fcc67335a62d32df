//! Error types for the targeting preview.

use thiserror::Error;

/// Result type alias using [`PreviewError`].
pub type Result<T> = std::result::Result<T, PreviewError>;

/// Top-level error type for all preview errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    /// A side was requested for a slot that belongs to no party zone.
    #[error("Invalid zone: slot {slot} sits in column {column}, which belongs to no party")]
    InvalidZone {
        /// Slot that was queried.
        slot: u32,
        /// 1-based column of that slot.
        column: u32,
    },

    /// Slot id outside the grid.
    #[error("Slot {slot} is outside the grid of {len} slots")]
    SlotOutOfRange {
        /// Slot that was queried.
        slot: u32,
        /// Number of slots in the grid.
        len: u32,
    },

    /// No character with this id exists in the catalog.
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    /// Persisted party text could not be parsed.
    #[error("Malformed party record: {0}")]
    PartyFormat(String),

    /// Data file parsing error.
    #[error("Failed to parse data '{source_name}': {message}")]
    DataParseError {
        /// Name of the data that failed to parse.
        source_name: String,
        /// Error message.
        message: String,
    },

    /// Invalid board state.
    #[error("Invalid board state: {0}")]
    InvalidState(String),
}
