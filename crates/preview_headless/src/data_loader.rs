//! Character catalog and label loading.
//!
//! Loads RON data files from disk. All parsing happens in `preview_core`;
//! this module only adds file access and path resolution.

use std::path::{Path, PathBuf};

use preview_core::catalog::CharacterCatalog;
use preview_core::character::Character;
use preview_core::labels::Labels;
use thiserror::Error;

/// File name of the character catalog inside the data directory.
pub const CATALOG_FILE: &str = "characters.ron";

/// Directory of per-language label files inside the data directory.
pub const LABELS_DIR: &str = "labels";

/// Errors that can occur during data loading.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Failed to read file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON file.
    #[error("Failed to parse RON file '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Catalog validation failed.
    #[error("Catalog validation failed: {errors:?}")]
    ValidationError {
        /// List of validation errors.
        errors: Vec<String>,
    },

    /// Data directory not found.
    #[error("Data directory not found: {0}")]
    DirectoryNotFound(String),
}

/// Result type for data loading operations.
pub type DataLoadResult<T> = Result<T, DataLoadError>;

fn read(path: &Path) -> DataLoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| DataLoadError::IoError {
        path: path.display().to_string(),
        source,
    })
}

/// Load a character catalog from a RON list of characters.
pub fn load_catalog(path: &Path) -> DataLoadResult<CharacterCatalog> {
    let contents = read(path)?;
    let characters: Vec<Character> =
        ron::from_str(&contents).map_err(|source| DataLoadError::ParseError {
            path: path.display().to_string(),
            source,
        })?;

    let catalog = CharacterCatalog::from_characters(characters);
    tracing::info!(
        characters = catalog.len(),
        "Loaded character catalog from {:?}",
        path
    );
    Ok(catalog)
}

/// Load a catalog and check that every summon reference resolves.
pub fn load_validated_catalog(path: &Path) -> DataLoadResult<CharacterCatalog> {
    let catalog = load_catalog(path)?;
    catalog
        .validate()
        .map_err(|errors| DataLoadError::ValidationError { errors })?;
    Ok(catalog)
}

/// Load one label table.
pub fn load_labels(path: &Path) -> DataLoadResult<Labels> {
    let contents = read(path)?;
    let labels: Labels = ron::from_str(&contents).map_err(|source| DataLoadError::ParseError {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(language = %labels.language, entries = labels.entries.len(), "Loaded labels");
    Ok(labels)
}

/// Load the labels for `language` from `<data_dir>/labels/<language>.ron`.
///
/// A missing file is not an error: the preview falls back to default
/// phrases and raw name keys.
pub fn load_language(data_dir: &Path, language: &str) -> DataLoadResult<Labels> {
    let path = data_dir.join(LABELS_DIR).join(format!("{language}.ron"));
    if !path.exists() {
        tracing::warn!(
            "No labels for language '{language}' at {:?}, using defaults",
            path
        );
        return Ok(Labels::new(language));
    }
    load_labels(&path)
}

/// Resolve the default data directory.
///
/// Looks for data files in standard locations:
/// 1. Environment variable `PREVIEW_DATA_DIR`
/// 2. `./crates/preview_headless/assets/data/` (repo root)
/// 3. `./assets/data/` (running from preview_headless)
pub fn default_data_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("PREVIEW_DATA_DIR") {
        let path = PathBuf::from(dir);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates = ["crates/preview_headless/assets/data", "assets/data"];
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// The data directory to use: `explicit` if given, else the default.
pub fn resolve_data_dir(explicit: Option<&Path>) -> DataLoadResult<PathBuf> {
    match explicit {
        Some(path) if path.exists() => Ok(path.to_path_buf()),
        Some(path) => Err(DataLoadError::DirectoryNotFound(path.display().to_string())),
        None => default_data_dir()
            .ok_or_else(|| DataLoadError::DirectoryNotFound("preview data directory".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_catalog(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::IoError { .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[Character(id: ]").unwrap();

        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_dangling_summon_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[Character(id: "tamer", name: "Tamer", summon_id: Some("wolf"))]"#
        )
        .unwrap();

        assert!(load_catalog(file.path()).is_ok());
        let err = load_validated_catalog(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError { .. }));
    }

    #[test]
    fn test_missing_language_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let labels = load_language(dir.path(), "xx").unwrap();

        assert_eq!(labels.language, "xx");
        assert!(labels.entries.is_empty());
    }

    #[test]
    fn test_explicit_missing_dir() {
        let err = resolve_data_dir(Some(Path::new("no/such/dir"))).unwrap_err();
        assert!(matches!(err, DataLoadError::DirectoryNotFound(_)));
    }
}
