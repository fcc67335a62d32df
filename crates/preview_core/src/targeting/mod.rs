//! Target resolution engine.
//!
//! Resolution runs in four fixed passes:
//!
//! 1. Good attacks Evil
//! 2. Evil attacks Good
//! 3. Good summons attack Evil
//! 4. Evil summons attack Good
//!
//! Every pass sees the targets claimed by the passes before it through an
//! explicit [`ClaimedTargets`] accumulator.
//!
//! - [`filter`] - Candidate selection per AI archetype
//! - [`ranker`] - Distance ordering and tie-breaking
//! - [`orchestrator`] - One attacking party against one defending party
//! - [`scheduler`] - The four-pass sequence

pub mod filter;
pub mod orchestrator;
pub mod ranker;
pub mod scheduler;

use serde::{Deserialize, Serialize};

use crate::catalog::CharacterCatalog;
use crate::character::{AiType, Character, CharacterId};
use crate::grid::{GridLayout, Side, SlotId};
use crate::labels::Localizer;

pub use orchestrator::{resolve_team, PassOutcome};
pub use scheduler::resolve_all;

/// Which side drew an attack line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineColour {
    /// Drawn by the good party.
    Ally,
    /// Drawn by the evil party.
    Enemy,
}

/// Display toggles for attack lines.
///
/// They gate only the visual write into a tile, never the claimed-target
/// bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinePreferences {
    /// Draw lines for the good party.
    #[serde(default = "default_true")]
    pub show_ally_lines: bool,
    /// Draw lines for the evil party.
    #[serde(default = "default_true")]
    pub show_enemy_lines: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LinePreferences {
    fn default() -> Self {
        Self {
            show_ally_lines: true,
            show_enemy_lines: true,
        }
    }
}

impl LinePreferences {
    /// Whether lines of this colour are drawn.
    #[must_use]
    pub const fn shows(&self, colour: LineColour) -> bool {
        match colour {
            LineColour::Ally => self.show_ally_lines,
            LineColour::Enemy => self.show_enemy_lines,
        }
    }
}

/// One of the four resolution passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pass {
    /// Good party attacks the evil party.
    GoodAttacks,
    /// Evil party attacks the good party.
    EvilAttacks,
    /// Good summons attack the evil party.
    GoodSummons,
    /// Evil summons attack the good party.
    EvilSummons,
}

impl Pass {
    /// Execution order of a full resolution.
    pub const ORDER: [Pass; 4] = [
        Pass::GoodAttacks,
        Pass::EvilAttacks,
        Pass::GoodSummons,
        Pass::EvilSummons,
    ];

    /// Side doing the attacking.
    #[must_use]
    pub const fn attacking_side(self) -> Side {
        match self {
            Pass::GoodAttacks | Pass::GoodSummons => Side::Good,
            Pass::EvilAttacks | Pass::EvilSummons => Side::Evil,
        }
    }

    /// Colour of the lines drawn in this pass.
    #[must_use]
    pub const fn line_colour(self) -> LineColour {
        match self.attacking_side() {
            Side::Good => LineColour::Ally,
            Side::Evil => LineColour::Enemy,
        }
    }

    /// Whether summoned characters act instead of the occupants.
    #[must_use]
    pub const fn summon_mode(self) -> bool {
        matches!(self, Pass::GoodSummons | Pass::EvilSummons)
    }
}

/// Defender slots already selected during the current full resolution.
///
/// Only ever grows. A slot appears once per attacker that picked it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClaimedTargets(Vec<SlotId>);

impl ClaimedTargets {
    /// No claims yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any attacker already picked this slot.
    #[must_use]
    pub fn contains(&self, slot: SlotId) -> bool {
        self.0.contains(&slot)
    }

    /// Record a claim.
    pub fn claim(&mut self, slot: SlotId) {
        self.0.push(slot);
    }

    /// Claims in the order they were made.
    #[must_use]
    pub fn as_slice(&self) -> &[SlotId] {
        &self.0
    }

    /// Number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A slot together with the character acting from or standing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combatant<'a> {
    /// Grid slot.
    pub slot: SlotId,
    /// Character resolved from the catalog.
    pub character: &'a Character,
}

/// Everything a resolution pass reads besides the tiles.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Grid geometry.
    pub layout: &'a GridLayout,
    /// Character lookup.
    pub catalog: &'a CharacterCatalog,
    /// Event text translation.
    pub localizer: &'a dyn Localizer,
    /// Line display toggles.
    pub lines: LinePreferences,
}

impl std::fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveContext")
            .field("layout", self.layout)
            .field("catalog_len", &self.catalog.len())
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

/// One resolved attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEvent {
    /// Pass that produced this event.
    pub pass: Pass,
    /// Attacking slot.
    pub attacker: SlotId,
    /// Selected defender slot.
    pub target: SlotId,
    /// Character that acted (the summon during summon passes).
    pub actor: CharacterId,
    /// Character standing on the target slot.
    pub target_character: CharacterId,
    /// Archetype that produced the candidates (after fallback).
    pub ai: AiType,
    /// Squared grid distance.
    pub distance_squared: u32,
    /// Euclidean grid distance.
    pub distance: f64,
    /// Side that drew the line.
    pub line_colour: LineColour,
    /// Localized attack line.
    pub message: String,
}

/// Output of a full four-pass resolution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resolution {
    /// Events of all passes in pass order, attacker roster order within.
    pub events: Vec<TargetEvent>,
    /// Claims accumulated over all passes.
    pub claimed: ClaimedTargets,
}

impl Resolution {
    /// Attack lines in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.message.as_str())
    }

    /// Events of one pass.
    pub fn events_of(&self, pass: Pass) -> impl Iterator<Item = &TargetEvent> {
        self.events.iter().filter(move |e| e.pass == pass)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Small board builders shared by the targeting tests.

    use super::*;
    use crate::character::CharacterClass;
    use crate::party::{Party, PartyMember};
    use crate::tile::Tile;

    pub(crate) fn catalog() -> CharacterCatalog {
        CharacterCatalog::from_characters([
            Character::new("knight", "Knight", CharacterClass::Melee, AiType::Melee),
            Character::new("archer", "Archer", CharacterClass::Ranged, AiType::Ranged),
            Character::new("mage", "Mage", CharacterClass::Ranged, AiType::Ranged),
            Character::new("cleric", "Cleric", CharacterClass::Support, AiType::Ally),
            Character::new("priest", "Priest", CharacterClass::Support, AiType::Ally)
                .with_fallback(AiType::Ranged),
            Character::new("rogue", "Rogue", CharacterClass::Melee, AiType::Assassin)
                .with_fallback(AiType::Melee),
            Character::new(
                "stalker",
                "Stalker",
                CharacterClass::Melee,
                AiType::Assassin,
            ),
            Character::new("tamer", "Tamer", CharacterClass::Melee, AiType::Melee)
                .with_summon("wolf"),
            Character::new("wolf", "Wolf", CharacterClass::Melee, AiType::Melee),
            Character::new("necro", "Necro", CharacterClass::Ranged, AiType::Ranged)
                .with_summon("ghost"),
            Character::new("shaman", "Shaman", CharacterClass::Support, AiType::Ranged)
                .with_summon("spirit"),
            Character::new("spirit", "Spirit", CharacterClass::Support, AiType::Ally),
        ])
    }

    pub(crate) fn combatant(slot: u32, character: &Character) -> Combatant<'_> {
        Combatant {
            slot: SlotId(slot),
            character,
        }
    }

    pub(crate) fn tiles(layout: &GridLayout) -> Vec<Tile> {
        (0..layout.len())
            .map(|id| Tile::new(SlotId(id), !layout.is_playable(SlotId(id))))
            .collect()
    }

    /// Place `(slot, character)` pairs on the tiles and return the party.
    pub(crate) fn place(tiles: &mut [Tile], side: Side, members: &[(u32, &str)]) -> Party {
        let members = members.iter().enumerate().map(|(i, (slot, id))| {
            let tile = &mut tiles[*slot as usize];
            tile.character = Some(CharacterId::new(*id));
            tile.position_in_party = Some(i);
            PartyMember::placed(SlotId(*slot), CharacterId::new(*id))
        });
        Party::from_members(side, members)
    }
}
