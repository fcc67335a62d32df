//! Character reference data.
//!
//! Characters are immutable and owned by the
//! [`CharacterCatalog`](crate::catalog::CharacterCatalog).
//! Tiles only ever hold a [`CharacterId`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique string identifier for a character.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl CharacterId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Combat class of a character.
///
/// Only [`CharacterClass::Ranged`] influences targeting (assassins hunt it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CharacterClass {
    /// Attacks from the back line.
    Ranged,
    /// Front-line fighter.
    #[default]
    Melee,
    /// Healers and buffers.
    Support,
    /// Damage sponges.
    Tank,
}

/// Targeting archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AiType {
    /// Closest defender nobody has picked yet, else closest defender.
    #[default]
    Melee,
    /// Closest defender.
    Ranged,
    /// Farthest member of its own party.
    Ally,
    /// Closest ranged defender, preferring unclaimed ones.
    Assassin,
}

/// Data-driven character definition.
///
/// # Example RON
///
/// ```ron
/// Character(
///     id: "shadow_blade",
///     name: "character.shadow_blade.name",
///     class: Melee,
///     ai_type: Assassin,
///     fallback_ai_type: Some(Melee),
///     summon_id: None,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,

    /// Localization key for the display name.
    pub name: String,

    /// Combat class.
    #[serde(default)]
    pub class: CharacterClass,

    /// Primary targeting archetype.
    #[serde(default)]
    pub ai_type: AiType,

    /// Archetype used when the primary one finds no candidates.
    #[serde(default)]
    pub fallback_ai_type: Option<AiType>,

    /// Character that acts from this slot during the summon passes.
    #[serde(default)]
    pub summon_id: Option<CharacterId>,
}

impl Character {
    /// Create a character with no fallback and no summon.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: CharacterClass,
        ai_type: AiType,
    ) -> Self {
        Self {
            id: CharacterId::new(id),
            name: name.into(),
            class,
            ai_type,
            fallback_ai_type: None,
            summon_id: None,
        }
    }

    /// Builder method to set the fallback archetype.
    #[must_use]
    pub fn with_fallback(mut self, fallback: AiType) -> Self {
        self.fallback_ai_type = Some(fallback);
        self
    }

    /// Builder method to set the summoned character.
    #[must_use]
    pub fn with_summon(mut self, summon: impl Into<String>) -> Self {
        self.summon_id = Some(CharacterId::new(summon));
        self
    }

    /// Whether this character is of the ranged class.
    #[must_use]
    pub fn is_ranged(&self) -> bool {
        self.class == CharacterClass::Ranged
    }
}
