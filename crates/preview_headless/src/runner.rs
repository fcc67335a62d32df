//! Headless preview runner.
//!
//! Ties the data files, a scenario and the resolution engine together and
//! renders the resulting event list.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use preview_core::prelude::*;

use crate::config::PreviewConfig;
use crate::data_loader::{self, DataLoadError};
use crate::scenario::{Scenario, ScenarioError};

/// Errors surfaced by a headless run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Data files could not be loaded.
    #[error(transparent)]
    Data(#[from] DataLoadError),
    /// Scenario could not be loaded.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    /// Resolution failed.
    #[error(transparent)]
    Preview(#[from] PreviewError),
    /// Output could not be encoded.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for runner operations.
pub type RunnerResult<T> = std::result::Result<T, RunnerError>;

/// How events are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One localized attack line per event.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Where the runner reads its data from. Unset paths resolve inside the
/// data directory.
#[derive(Debug, Clone, Default)]
pub struct DataSources {
    /// Data directory override.
    pub data_dir: Option<PathBuf>,
    /// Catalog file override.
    pub catalog: Option<PathBuf>,
    /// Label file override.
    pub labels: Option<PathBuf>,
    /// Config file override.
    pub config: Option<PathBuf>,
}

impl DataSources {
    fn catalog_path(&self) -> RunnerResult<PathBuf> {
        match &self.catalog {
            Some(path) => Ok(path.clone()),
            None => Ok(self.data_dir()?.join(data_loader::CATALOG_FILE)),
        }
    }

    fn data_dir(&self) -> RunnerResult<PathBuf> {
        Ok(data_loader::resolve_data_dir(self.data_dir.as_deref())?)
    }

    /// Load the character catalog, checking summon references.
    pub fn load_catalog(&self) -> RunnerResult<CharacterCatalog> {
        Ok(data_loader::load_validated_catalog(&self.catalog_path()?)?)
    }

    /// Load the run configuration.
    pub fn load_config(&self) -> RunnerResult<PreviewConfig> {
        match &self.config {
            Some(path) => Ok(PreviewConfig::load(path)?),
            None => Ok(PreviewConfig::load_or_default(&self.data_dir()?)?),
        }
    }

    /// Load the label table for `language`.
    pub fn load_labels(&self, language: &str) -> RunnerResult<Labels> {
        match &self.labels {
            Some(path) => Ok(data_loader::load_labels(path)?),
            None => Ok(data_loader::load_language(&self.data_dir()?, language)?),
        }
    }
}

/// Everything loaded for a run.
#[derive(Debug, Clone)]
pub struct PreviewRunner {
    catalog: CharacterCatalog,
    labels: Labels,
    config: PreviewConfig,
}

impl PreviewRunner {
    /// Create a runner from already-loaded data.
    #[must_use]
    pub fn new(catalog: CharacterCatalog, labels: Labels, config: PreviewConfig) -> Self {
        Self {
            catalog,
            labels,
            config,
        }
    }

    /// Load catalog, config and labels from `sources`.
    pub fn from_sources(sources: &DataSources) -> RunnerResult<Self> {
        let catalog = sources.load_catalog()?;
        let config = sources.load_config()?;
        let labels = sources.load_labels(&config.language)?;
        Ok(Self::new(catalog, labels, config))
    }

    /// The loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// A board with the scenario's parties loaded but not yet resolved.
    pub fn load(&self, scenario: &Scenario) -> RunnerResult<Board> {
        let mut board = Board::new(self.config.layout)?;
        scenario.apply(&mut board, &self.catalog)?;
        Ok(board)
    }

    /// Load a scenario and run the full resolution.
    pub fn resolve(&self, scenario: &Scenario) -> RunnerResult<Board> {
        let mut board = self.load(scenario)?;
        let events = board
            .recompute(&self.catalog, &self.labels, self.config.lines)?
            .events
            .len();
        tracing::info!(scenario = %scenario.name, events, "Scenario resolved");
        tracing::debug!(state_hash = board.state_hash(), "Final state");
        Ok(board)
    }

    /// The normalized persisted records of both parties after loading.
    pub fn export(&self, scenario: &Scenario) -> RunnerResult<Scenario> {
        let board = self.load(scenario)?;
        let mut normalized = Scenario::from_records(
            scenario.name.clone(),
            &board.party_record(Side::Good),
            &board.party_record(Side::Evil),
        )?;
        normalized.description.clone_from(&scenario.description);
        Ok(normalized)
    }
}

/// JSON shape of one event line.
#[derive(Debug, Serialize)]
struct EventLine<'a> {
    pass: Pass,
    attacker: SlotId,
    target: SlotId,
    actor: &'a str,
    target_character: &'a str,
    distance: f64,
    line: LineColour,
    message: &'a str,
}

impl<'a> From<&'a TargetEvent> for EventLine<'a> {
    fn from(event: &'a TargetEvent) -> Self {
        Self {
            pass: event.pass,
            attacker: event.attacker,
            target: event.target,
            actor: event.actor.as_str(),
            target_character: event.target_character.as_str(),
            distance: event.distance,
            line: event.line_colour,
            message: &event.message,
        }
    }
}

/// Render every event of `resolution` as output lines.
pub fn render_events(resolution: &Resolution, format: OutputFormat) -> RunnerResult<Vec<String>> {
    match format {
        OutputFormat::Text => Ok(resolution.messages().map(str::to_string).collect()),
        OutputFormat::Json => resolution
            .events
            .iter()
            .map(|event| Ok(serde_json::to_string(&EventLine::from(event))?))
            .collect(),
    }
}

/// Load a scenario file from `path`.
pub fn load_scenario(path: &Path) -> RunnerResult<Scenario> {
    Ok(Scenario::load(path)?)
}
