//! Session board state.
//!
//! The [`Board`] owns every tile of the grid plus the two party rosters.
//! Parties are replaced wholesale when their composition changes, after
//! which [`Board::recompute`] reruns the four targeting passes.
//!
//! A recompute is atomic: it works on a copy of the tile store and only
//! commits when every pass succeeded, so callers observe either the
//! previous snapshot or the fully resolved one.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::catalog::CharacterCatalog;
use crate::error::{PreviewError, Result};
use crate::grid::{GridLayout, Side, SlotId};
use crate::labels::Localizer;
use crate::party::{Party, PartyMember, PARTY_CAPACITY};
use crate::persist::PartyRecord;
use crate::targeting::{resolve_all, LinePreferences, Resolution, ResolveContext};
use crate::tile::Tile;

/// Grid tiles, both parties and the latest resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: GridLayout,
    tiles: Vec<Tile>,
    good: Party,
    evil: Party,
    resolution: Resolution,
}

impl Board {
    /// Create an empty board. Separator tiles are marked disabled.
    pub fn new(layout: GridLayout) -> Result<Self> {
        layout.validate()?;
        let tiles = (0..layout.len())
            .map(SlotId)
            .map(|slot| Tile::new(slot, !layout.is_playable(slot)))
            .collect();

        Ok(Self {
            layout,
            tiles,
            good: Party::new(Side::Good),
            evil: Party::new(Side::Evil),
            resolution: Resolution::default(),
        })
    }

    /// Grid geometry.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Every tile in slot order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// One tile.
    pub fn tile(&self, slot: SlotId) -> Result<&Tile> {
        self.tiles
            .get(slot.index())
            .ok_or(PreviewError::SlotOutOfRange {
                slot: slot.0,
                len: self.layout.len(),
            })
    }

    /// Roster of one side.
    #[must_use]
    pub const fn party(&self, side: Side) -> &Party {
        match side {
            Side::Good => &self.good,
            Side::Evil => &self.evil,
        }
    }

    /// Side owning a slot; fails for separator and out-of-range slots.
    pub fn side_of(&self, slot: SlotId) -> Result<Side> {
        self.layout.side(slot)
    }

    /// Result of the last successful [`Board::recompute`].
    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Attack lines of the last successful recompute.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.resolution.messages()
    }

    /// Replace one side's party from a persisted record.
    ///
    /// The previous party's tiles are cleared. Entries are applied in
    /// order; an entry whose slot is outside the grid, outside this side's
    /// zone, or already taken becomes a placeholder remembering its
    /// character. Entries beyond [`PARTY_CAPACITY`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::CharacterNotFound`] for unknown character
    /// ids; the board is left unchanged in that case.
    pub fn load_party(
        &mut self,
        side: Side,
        record: &PartyRecord,
        catalog: &CharacterCatalog,
    ) -> Result<()> {
        let mut tiles = self.tiles.clone();
        for slot in self.party(side).members().iter().filter_map(|m| m.slot) {
            if let Some(tile) = tiles.get_mut(slot.index()) {
                tile.clear();
            }
        }

        if record.len() > PARTY_CAPACITY {
            tracing::warn!(
                ?side,
                entries = record.len(),
                "Party record has more than {PARTY_CAPACITY} entries, ignoring the rest"
            );
        }

        let mut taken = BTreeSet::new();
        let mut members = Vec::with_capacity(PARTY_CAPACITY);
        for (position, member) in record.members().take(PARTY_CAPACITY).enumerate() {
            if let Some(id) = &member.character {
                let _ = catalog.get(id)?;
            }

            let member = match (member.slot, member.character) {
                (Some(slot), Some(character)) => {
                    if self.accepts(side, slot) && taken.insert(slot) {
                        let tile = &mut tiles[slot.index()];
                        tile.character = Some(character.clone());
                        tile.position_in_party = Some(position);
                        PartyMember::placed(slot, character)
                    } else {
                        tracing::warn!(
                            ?side,
                            %slot,
                            "Dropping party entry on a foreign or taken slot"
                        );
                        PartyMember::placeholder(Some(character))
                    }
                }
                (Some(slot), None) => {
                    tracing::warn!(?side, %slot, "Dropping party entry without a character");
                    PartyMember::placeholder(None)
                }
                (None, character) => PartyMember::placeholder(character),
            };
            members.push(member);
        }

        let party = Party::from_members(side, members);
        tracing::debug!(?side, size = party.size(), "Party loaded");

        self.tiles = tiles;
        match side {
            Side::Good => self.good = party,
            Side::Evil => self.evil = party,
        }
        Ok(())
    }

    /// Replace one side's party from persisted text.
    ///
    /// Malformed text is logged and loads an empty party.
    pub fn load_party_text(
        &mut self,
        side: Side,
        text: &str,
        catalog: &CharacterCatalog,
    ) -> Result<()> {
        let record = match PartyRecord::from_text(text) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(?side, "Ignoring malformed party text: {e}");
                PartyRecord::default()
            }
        };
        self.load_party(side, &record, catalog)
    }

    /// Persisted record of one side.
    #[must_use]
    pub fn party_record(&self, side: Side) -> PartyRecord {
        PartyRecord::from_party(self.party(side))
    }

    /// Rerun all four targeting passes from scratch.
    ///
    /// # Errors
    ///
    /// Any failing pass aborts the recompute and leaves the board as it
    /// was before the call.
    pub fn recompute(
        &mut self,
        catalog: &CharacterCatalog,
        localizer: &dyn Localizer,
        lines: LinePreferences,
    ) -> Result<&Resolution> {
        let mut tiles = self.tiles.clone();
        tiles.iter_mut().for_each(Tile::clear_targets);

        let ctx = ResolveContext {
            layout: &self.layout,
            catalog,
            localizer,
            lines,
        };
        let resolution = resolve_all(&ctx, &mut tiles, &self.good, &self.evil)?;
        tracing::debug!(
            events = resolution.events.len(),
            state_hash = hash_state(&tiles, &resolution),
            "Board recomputed"
        );

        self.tiles = tiles;
        self.resolution = resolution;
        Ok(&self.resolution)
    }

    /// Deterministic hash of every tile and the last resolution.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        hash_state(&self.tiles, &self.resolution)
    }

    /// Serialize the board for handing a stable snapshot to a renderer.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| PreviewError::InvalidState(format!("Failed to serialize board: {e}")))
    }

    /// Restore a board from [`Board::snapshot`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::InvalidState`] for undecodable bytes and for
    /// boards whose tiles and rosters disagree.
    pub fn from_snapshot(data: &[u8]) -> Result<Self> {
        let board: Self = bincode::deserialize(data)
            .map_err(|e| PreviewError::InvalidState(format!("Failed to deserialize board: {e}")))?;
        board.layout.validate()?;
        if board.tiles.len() != board.layout.len() as usize {
            return Err(PreviewError::InvalidState(format!(
                "snapshot holds {} tiles for a grid of {}",
                board.tiles.len(),
                board.layout.len()
            )));
        }
        board.check_consistency()?;
        Ok(board)
    }

    /// Every placed member stands on its own side on a tile recording it,
    /// and every occupied tile belongs to exactly one member.
    fn check_consistency(&self) -> Result<()> {
        let mut referenced = BTreeSet::new();
        for side in [Side::Good, Side::Evil] {
            let party = self.party(side);
            if party.side() != side {
                return Err(PreviewError::InvalidState(format!(
                    "{side:?} roster is marked {:?}",
                    party.side()
                )));
            }
            for (position, member) in party.members().iter().enumerate() {
                let Some(slot) = member.slot else {
                    continue;
                };
                let on_tile = self.tiles.get(slot.index()).is_some_and(|tile| {
                    tile.character == member.character && tile.position_in_party == Some(position)
                });
                if !on_tile
                    || !member.is_occupied()
                    || !self.accepts(side, slot)
                    || !referenced.insert(slot)
                {
                    return Err(PreviewError::InvalidState(format!(
                        "{side:?} party entry {position} does not match tile {slot}"
                    )));
                }
            }
        }

        for (index, tile) in self.tiles.iter().enumerate() {
            if tile.id.index() != index || tile.disabled == self.layout.is_playable(tile.id) {
                return Err(PreviewError::InvalidState(format!(
                    "tile {} does not fit slot {index}",
                    tile.id
                )));
            }
            if tile.character.is_some() && !referenced.contains(&tile.id) {
                return Err(PreviewError::InvalidState(format!(
                    "tile {} holds a character outside both parties",
                    tile.id
                )));
            }
        }
        Ok(())
    }

    fn accepts(&self, side: Side, slot: SlotId) -> bool {
        self.layout.side(slot).is_ok_and(|owner| owner == side)
    }
}

fn hash_state(tiles: &[Tile], resolution: &Resolution) -> u64 {
    let mut hasher = DefaultHasher::new();
    tiles.hash(&mut hasher);
    for event in &resolution.events {
        event.pass.hash(&mut hasher);
        event.attacker.hash(&mut hasher);
        event.target.hash(&mut hasher);
        event.actor.hash(&mut hasher);
        event.ai.hash(&mut hasher);
        event.distance_squared.hash(&mut hasher);
        event.message.hash(&mut hasher);
    }
    resolution.claimed.hash(&mut hasher);
    hasher.finish()
}
