//! Localization seam for event text and character names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, Result};

/// Label key of the full attack template.
pub const ATTACK_TEMPLATE_KEY: &str = "attackTemplate";
/// Label key of the verb in the default phrase.
pub const TARGETS_KEY: &str = "targets";
/// Label key of the distance phrase in the default phrase.
pub const WITH_DISTANCE_KEY: &str = "withDistance";

/// Anything that can translate a label key.
pub trait Localizer {
    /// Translation for `key`, or `None` if it is not configured.
    fn label(&self, key: &str) -> Option<&str>;

    /// Translation for `key`, or `fallback` when missing.
    fn label_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.label(key).unwrap_or(fallback)
    }
}

/// Localizer that knows no labels. Every lookup falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLabels;

impl Localizer for NoLabels {
    fn label(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// A label table for one language.
///
/// # Example RON
///
/// ```ron
/// Labels(
///     language: "en",
///     entries: {
///         "attackTemplate": "ATTACKER targets TARGET at RANGE",
///         "character.archer.name": "Archer",
///     },
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Language code.
    pub language: String,
    /// Key to translated text.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Labels {
    /// Create an empty table for a language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Builder method to add one entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.entries.insert(key.into(), value.into());
        self
    }

    /// Parse a label table from RON.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        ron::from_str(ron).map_err(|e| PreviewError::DataParseError {
            source_name: "labels".to_string(),
            message: e.to_string(),
        })
    }
}

impl Localizer for Labels {
    fn label(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// Render one attack line.
///
/// Uses the `attackTemplate` label when configured, replacing the first
/// `ATTACKER`, `TARGET` and `RANGE` placeholders. Otherwise builds
/// `"{attacker} {targets} {target} {withDistance} {distance}"`.
pub fn format_attack(
    localizer: &dyn Localizer,
    attacker: &str,
    target: &str,
    distance: f64,
) -> String {
    let range = format!("{distance:.2}");
    match localizer.label(ATTACK_TEMPLATE_KEY) {
        Some(template) => template
            .replacen("ATTACKER", attacker, 1)
            .replacen("TARGET", target, 1)
            .replacen("RANGE", &range, 1),
        None => format!(
            "{attacker} {} {target} {} {range}",
            localizer.label_or(TARGETS_KEY, "targets"),
            localizer.label_or(WITH_DISTANCE_KEY, "with distance"),
        ),
    }
}
