//! Scenario loading.
//!
//! A scenario is a named pair of persisted party texts, one per side, in
//! the same format the preview stores between sessions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use preview_core::prelude::*;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
}

/// Both parties of one preview session.
///
/// # Example RON
///
/// ```ron
/// Scenario(
///     name: "Skirmish",
///     description: "Two full parties",
///     good: r#"[[3,"knight"],[16,"archer"],[null,null],[null,null]]"#,
///     evil: r#"[[10,"guardian"],[null,null],[null,null],[null,null]]"#,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Persisted text of the good party.
    #[serde(default)]
    pub good: String,
    /// Persisted text of the evil party.
    #[serde(default)]
    pub evil: String,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario: Scenario = ron::from_str(&contents)?;
        Ok(scenario)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> std::result::Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// Build a scenario from two party records.
    pub fn from_records(
        name: impl Into<String>,
        good: &PartyRecord,
        evil: &PartyRecord,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            description: String::new(),
            good: good.to_text()?,
            evil: evil.to_text()?,
        })
    }

    /// Persisted text for one side.
    #[must_use]
    pub fn party_text(&self, side: Side) -> &str {
        match side {
            Side::Good => &self.good,
            Side::Evil => &self.evil,
        }
    }

    /// Load both parties onto `board`.
    ///
    /// Malformed party texts load as empty parties; unknown characters
    /// are an error.
    pub fn apply(&self, board: &mut Board, catalog: &CharacterCatalog) -> Result<()> {
        for side in [Side::Good, Side::Evil] {
            board.load_party_text(side, self.party_text(side), catalog)?;
        }
        tracing::debug!(
            scenario = %self.name,
            good = board.party(Side::Good).size(),
            evil = board.party(Side::Evil).size(),
            "Scenario applied"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preview_test_utils::fixtures::{record, sample_catalog};

    const SKIRMISH: &str = r#"
        Scenario(
            name: "Skirmish",
            description: "Knight against mage",
            good: "[[3,\"knight\"],[null,null],[null,null],[null,null]]",
            evil: "[[10,\"mage\"],[null,null],[null,null],[null,null]]",
        )
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_ron_str(SKIRMISH).unwrap();
        assert_eq!(scenario.name, "Skirmish");
        assert!(scenario.party_text(Side::Good).contains("knight"));
        assert!(scenario.party_text(Side::Evil).contains("mage"));
    }

    #[test]
    fn test_missing_parties_default_empty() {
        let scenario = Scenario::from_ron_str(r#"Scenario(name: "Empty")"#).unwrap();
        assert!(scenario.good.is_empty());
        assert!(scenario.description.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Scenario::load("no/such/scenario.ron").unwrap_err();
        assert!(matches!(err, ScenarioError::FileNotFound(_)));
    }

    #[test]
    fn test_apply_loads_both_sides() {
        let catalog = preview_core::catalog::CharacterCatalog::from_ron_str(
            r#"[
                Character(id: "knight", name: "Knight"),
                Character(id: "mage", name: "Mage", class: Ranged, ai_type: Ranged),
            ]"#,
        )
        .unwrap();
        let scenario = Scenario::from_ron_str(SKIRMISH).unwrap();
        let mut board = Board::new(GridLayout::default()).unwrap();

        scenario.apply(&mut board, &catalog).unwrap();

        assert_eq!(board.party(Side::Good).size(), 1);
        assert_eq!(board.party(Side::Evil).size(), 1);
        assert!(board.tile(SlotId(10)).unwrap().is_occupied());
    }

    #[test]
    fn test_malformed_party_text_loads_empty() {
        let catalog = sample_catalog();
        let scenario = Scenario {
            name: "Broken".into(),
            description: String::new(),
            good: "not json".into(),
            evil: record(&[(10, "mage")]).to_text().unwrap(),
        };
        let mut board = Board::new(GridLayout::default()).unwrap();

        scenario.apply(&mut board, &catalog).unwrap();

        assert_eq!(board.party(Side::Good).size(), 0);
        assert_eq!(board.party(Side::Evil).size(), 1);
    }

    #[test]
    fn test_from_records_round_trip() {
        let good = record(&[(3, "knight")]);
        let evil = record(&[(10, "mage")]);
        let scenario = Scenario::from_records("Pair", &good, &evil).unwrap();

        assert_eq!(PartyRecord::from_text(&scenario.good).unwrap(), good);
        assert_eq!(PartyRecord::from_text(&scenario.evil).unwrap(), evil);
    }
}
