//! Persisted party format.
//!
//! A party is stored as one `[slotId | null, characterId | null]` pair per
//! roster position, written as JSON text:
//!
//! ```text
//! [[0,"archer"],[15,"knight"],[null,"cleric"],[null,null]]
//! ```
//!
//! The third entry is a placeholder remembering a character.

use serde::{Deserialize, Serialize};

use crate::character::CharacterId;
use crate::error::{PreviewError, Result};
use crate::grid::SlotId;
use crate::party::{Party, PartyMember};

/// Serializable snapshot of one party.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyRecord(pub Vec<(Option<u32>, Option<String>)>);

impl PartyRecord {
    /// Record the roster of a party.
    #[must_use]
    pub fn from_party(party: &Party) -> Self {
        Self(
            party
                .members()
                .iter()
                .map(|member| {
                    (
                        member.slot.map(|slot| slot.0),
                        member.character.as_ref().map(|c| c.0.clone()),
                    )
                })
                .collect(),
        )
    }

    /// Parse the delimited text form.
    pub fn from_text(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PreviewError::PartyFormat(e.to_string()))
    }

    /// Write the delimited text form.
    pub fn to_text(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PreviewError::PartyFormat(e.to_string()))
    }

    /// Entries as roster members, without any validation.
    pub fn members(&self) -> impl Iterator<Item = PartyMember> + '_ {
        self.0.iter().map(|(slot, character)| PartyMember {
            slot: slot.map(SlotId),
            character: character.as_deref().map(CharacterId::new),
        })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
