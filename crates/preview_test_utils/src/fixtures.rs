//! Test fixtures and helpers.
//!
//! Pre-built catalogs and boards for consistent testing.

use preview_core::prelude::*;

/// Ids of every character in [`sample_catalog`].
pub const SAMPLE_IDS: [&str; 8] = [
    "knight", "archer", "mage", "cleric", "rogue", "guardian", "tamer", "wolf",
];

/// A catalog covering every archetype, a fallback and a summon.
#[must_use]
pub fn sample_catalog() -> CharacterCatalog {
    CharacterCatalog::from_characters([
        Character::new("knight", "Knight", CharacterClass::Melee, AiType::Melee),
        Character::new("archer", "Archer", CharacterClass::Ranged, AiType::Ranged),
        Character::new("mage", "Mage", CharacterClass::Ranged, AiType::Ranged),
        Character::new("cleric", "Cleric", CharacterClass::Support, AiType::Ally)
            .with_fallback(AiType::Ranged),
        Character::new("rogue", "Rogue", CharacterClass::Melee, AiType::Assassin)
            .with_fallback(AiType::Melee),
        Character::new("guardian", "Guardian", CharacterClass::Tank, AiType::Melee),
        Character::new("tamer", "Tamer", CharacterClass::Ranged, AiType::Ranged)
            .with_summon("wolf"),
        Character::new("wolf", "Wolf", CharacterClass::Melee, AiType::Melee),
    ])
}

/// Build a party record from `(slot, character)` pairs.
#[must_use]
pub fn record(members: &[(u32, &str)]) -> PartyRecord {
    PartyRecord(
        members
            .iter()
            .map(|(slot, id)| (Some(*slot), Some((*id).to_string())))
            .collect(),
    )
}

/// A board on the default layout with the given parties loaded.
///
/// # Panics
///
/// Panics if a character id is missing from `catalog`.
#[must_use]
pub fn board_with(catalog: &CharacterCatalog, good: &PartyRecord, evil: &PartyRecord) -> Board {
    let mut board = Board::new(GridLayout::default()).expect("default layout is valid");
    board
        .load_party(Side::Good, good, catalog)
        .expect("good party loads");
    board
        .load_party(Side::Evil, evil, catalog)
        .expect("evil party loads");
    board
}

/// Both parties at full strength with a mix of archetypes.
#[must_use]
pub fn full_board(catalog: &CharacterCatalog) -> Board {
    let good = [(3, "knight"), (16, "archer"), (29, "rogue"), (42, "cleric")];
    let evil = [
        (10, "guardian"),
        (25, "mage"),
        (40, "tamer"),
        (53, "knight"),
    ];
    board_with(catalog, &record(&good), &record(&evil))
}
