//! Runner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use preview_core::grid::GridLayout;
use preview_core::targeting::LinePreferences;

use crate::data_loader::{DataLoadError, DataLoadResult};

/// File name of the runner configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Settings for one preview run.
///
/// Every field has a default, so an empty `PreviewConfig()` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Grid dimensions and zone boundaries.
    pub layout: GridLayout,
    /// Attack line display toggles.
    pub lines: LinePreferences,
    /// Language code of the label table.
    pub language: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            layout: GridLayout::default(),
            lines: LinePreferences::default(),
            language: "en".to_string(),
        }
    }
}

impl PreviewConfig {
    /// Load a configuration from a RON file.
    pub fn load(path: &Path) -> DataLoadResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| DataLoadError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = ron::from_str(&contents).map_err(|source| DataLoadError::ParseError {
            path: path.display().to_string(),
            source,
        })?;
        config
            .layout
            .validate()
            .map_err(|e| DataLoadError::ValidationError {
                errors: vec![e.to_string()],
            })?;
        Ok(config)
    }

    /// Load `<data_dir>/config.ron`, or the defaults if it does not exist.
    pub fn load_or_default(data_dir: &Path) -> DataLoadResult<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PreviewConfig = ron::from_str("PreviewConfig()").unwrap();
        assert_eq!(config, PreviewConfig::default());
        assert_eq!(config.layout.width, 14);
    }

    #[test]
    fn test_partial_lines_keep_other_toggle() {
        let config: PreviewConfig =
            ron::from_str("PreviewConfig(lines: (show_enemy_lines: false))").unwrap();
        assert!(config.lines.show_ally_lines);
        assert!(!config.lines.show_enemy_lines);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "PreviewConfig(layout: (width: 8, height: 4, good_columns: 4, separator_end: 10))"
        )
        .unwrap();

        let err = PreviewConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError { .. }));
    }

    #[test]
    fn test_missing_config_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PreviewConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.language, "en");
    }
}
