//! # Preview Core
//!
//! Deterministic targeting preview for two opposing parties placed on a
//! fixed grid.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness
//!
//! Given the current placement of characters and each character's AI
//! archetype, it computes which defender every attacker would select, in
//! what order, and produces human-readable attack lines.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Slot coordinates and zone layout
//! - [`character`] - Character reference data and AI archetypes
//! - [`catalog`] - Character lookup by id
//! - [`labels`] - Localization seam for event text
//! - [`tile`] / [`party`] - Mutable per-slot state and rosters
//! - [`persist`] - Persisted party format
//! - [`targeting`] - Filter, ranker, orchestrator and multi-pass scheduler
//! - [`board`] - Session state tying it all together

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod board;
pub mod catalog;
pub mod character;
pub mod error;
pub mod grid;
pub mod labels;
pub mod party;
pub mod persist;
pub mod targeting;
pub mod tile;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::board::Board;
    pub use crate::catalog::CharacterCatalog;
    pub use crate::character::{AiType, Character, CharacterClass, CharacterId};
    pub use crate::error::{PreviewError, Result};
    pub use crate::grid::{Coordinates, GridLayout, Side, SlotId, Zone};
    pub use crate::labels::{Labels, Localizer, NoLabels};
    pub use crate::party::{Party, PartyMember, PARTY_CAPACITY};
    pub use crate::persist::PartyRecord;
    pub use crate::targeting::{
        ClaimedTargets, LineColour, LinePreferences, Pass, Resolution, TargetEvent,
    };
    pub use crate::tile::Tile;
}
