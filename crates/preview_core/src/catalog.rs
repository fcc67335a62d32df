//! Character catalog.
//!
//! Holds every known [`Character`] keyed by id. The catalog is pure data;
//! reading it from disk is the caller's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::error::{PreviewError, Result};

/// Immutable lookup table of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Character>", into = "Vec<Character>")]
pub struct CharacterCatalog {
    characters: BTreeMap<CharacterId, Character>,
}

impl From<Vec<Character>> for CharacterCatalog {
    fn from(characters: Vec<Character>) -> Self {
        Self::from_characters(characters)
    }
}

impl From<CharacterCatalog> for Vec<Character> {
    fn from(catalog: CharacterCatalog) -> Self {
        catalog.characters.into_values().collect()
    }
}

impl CharacterCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog. A later character replaces an earlier one with the
    /// same id.
    pub fn from_characters(characters: impl IntoIterator<Item = Character>) -> Self {
        let mut catalog = Self::new();
        for character in characters {
            catalog.insert(character);
        }
        catalog
    }

    /// Parse a catalog from a RON list of characters.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        ron::from_str::<Vec<Character>>(ron)
            .map(Self::from_characters)
            .map_err(|e| PreviewError::DataParseError {
                source_name: "character catalog".to_string(),
                message: e.to_string(),
            })
    }

    /// Insert or replace a character.
    pub fn insert(&mut self, character: Character) {
        let _ = self.characters.insert(character.id.clone(), character);
    }

    /// Look up a character.
    pub fn get(&self, id: &CharacterId) -> Result<&Character> {
        self.characters
            .get(id)
            .ok_or_else(|| PreviewError::CharacterNotFound(id.to_string()))
    }

    /// Whether a character exists.
    #[must_use]
    pub fn contains(&self, id: &CharacterId) -> bool {
        self.characters.contains_key(id)
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// All characters in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Check that every summon reference resolves.
    ///
    /// Returns one message per dangling reference.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .iter()
            .filter_map(|character| {
                let summon = character.summon_id.as_ref()?;
                (!self.contains(summon)).then(|| {
                    format!(
                        "character '{}' summons unknown character '{}'",
                        character.id, summon
                    )
                })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
