//! Party rosters.
//!
//! A party indexes into the board's tile store; it never owns tiles.

use serde::{Deserialize, Serialize};

use crate::character::CharacterId;
use crate::grid::{Side, SlotId};

/// Maximum number of members per party.
pub const PARTY_CAPACITY: usize = 4;

/// One roster entry.
///
/// A placeholder has no slot. It may still remember the character that
/// last filled this roster position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PartyMember {
    /// Grid slot, or `None` for a placeholder.
    pub slot: Option<SlotId>,
    /// Character placed in (or remembered by) this position.
    pub character: Option<CharacterId>,
}

impl PartyMember {
    /// A member standing on `slot`.
    #[must_use]
    pub fn placed(slot: SlotId, character: CharacterId) -> Self {
        Self {
            slot: Some(slot),
            character: Some(character),
        }
    }

    /// A placeholder, optionally remembering a character.
    #[must_use]
    pub fn placeholder(character: Option<CharacterId>) -> Self {
        Self {
            slot: None,
            character,
        }
    }

    /// Whether this member stands on the grid with a character.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.slot.is_some() && self.character.is_some()
    }
}

/// One side's roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    side: Side,
    members: Vec<PartyMember>,
}

impl Party {
    /// A party of [`PARTY_CAPACITY`] empty placeholders.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            members: vec![PartyMember::default(); PARTY_CAPACITY],
        }
    }

    /// Build a party from members, padding with placeholders. Members
    /// beyond [`PARTY_CAPACITY`] are ignored.
    #[must_use]
    pub fn from_members(side: Side, members: impl IntoIterator<Item = PartyMember>) -> Self {
        let mut party = Self::new(side);
        for (slot, member) in party.members.iter_mut().zip(members) {
            *slot = member;
        }
        party
    }

    /// Side this party fights for.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Roster in order, placeholders included.
    #[must_use]
    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    /// Number of members standing on the grid.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.iter().filter(|m| m.is_occupied()).count()
    }

    /// Whether no more members can be placed.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.size() >= PARTY_CAPACITY
    }

    /// Occupied slots in roster order.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.members
            .iter()
            .filter(|m| m.is_occupied())
            .filter_map(|m| m.slot)
    }

    /// Roster position of a slot.
    #[must_use]
    pub fn position_of(&self, slot: SlotId) -> Option<usize> {
        self.members.iter().position(|m| m.slot == Some(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_party_is_empty() {
        let party = Party::new(Side::Good);

        assert_eq!(party.members().len(), PARTY_CAPACITY);
        assert_eq!(party.size(), 0);
        assert!(!party.is_full());
    }

    #[test]
    fn test_placeholder_memory_does_not_count() {
        let party = Party::from_members(
            Side::Evil,
            [
                PartyMember::placed(SlotId(10), CharacterId::new("archer")),
                PartyMember::placeholder(Some(CharacterId::new("knight"))),
            ],
        );

        assert_eq!(party.size(), 1);
        assert_eq!(party.slots().collect::<Vec<_>>(), vec![SlotId(10)]);
        assert_eq!(party.position_of(SlotId(10)), Some(0));
        assert_eq!(party.position_of(SlotId(11)), None);
    }

    #[test]
    fn test_extra_members_are_dropped() {
        let members = (0..6).map(|i| PartyMember::placed(SlotId(i), CharacterId::new("a")));
        let party = Party::from_members(Side::Good, members);

        assert_eq!(party.size(), PARTY_CAPACITY);
        assert!(party.is_full());
    }
}
