//! Per-slot mutable state.

use serde::{Deserialize, Serialize};

use crate::character::CharacterId;
use crate::grid::SlotId;
use crate::targeting::LineColour;

/// One grid cell.
///
/// Tiles are created once for the whole grid and mutated in place. The
/// `targets` and `summon_targets` fields are written only by the
/// targeting passes and always point at a tile on the opposing side (or
/// the own side for ally archetypes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Slot this tile occupies.
    pub id: SlotId,
    /// Separator cell that can never hold a character.
    pub disabled: bool,
    /// Occupant, by identity only.
    pub character: Option<CharacterId>,
    /// Index of this tile inside its party.
    pub position_in_party: Option<usize>,
    /// Target chosen during the primary passes.
    pub targets: Option<SlotId>,
    /// Target chosen during the summon passes.
    pub summon_targets: Option<SlotId>,
    /// Which side drew the most recent attack line from this tile.
    pub line_colour: Option<LineColour>,
}

impl Tile {
    /// Create an empty tile.
    #[must_use]
    pub const fn new(id: SlotId, disabled: bool) -> Self {
        Self {
            id,
            disabled,
            character: None,
            position_in_party: None,
            targets: None,
            summon_targets: None,
            line_colour: None,
        }
    }

    /// Whether the tile is playable and holds a character.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        !self.disabled && self.character.is_some()
    }

    /// Remove the occupant and every engine-written field.
    pub fn clear(&mut self) {
        self.character = None;
        self.position_in_party = None;
        self.clear_targets();
    }

    /// Reset the engine-written output fields.
    pub fn clear_targets(&mut self) {
        self.targets = None;
        self.summon_targets = None;
        self.line_colour = None;
    }

    /// Target field for the given pass kind.
    #[must_use]
    pub const fn target_for(&self, summon_mode: bool) -> Option<SlotId> {
        if summon_mode {
            self.summon_targets
        } else {
            self.targets
        }
    }

    pub(crate) fn set_target(&mut self, summon_mode: bool, target: Option<SlotId>) {
        if summon_mode {
            self.summon_targets = target;
        } else {
            self.targets = target;
        }
    }
}
