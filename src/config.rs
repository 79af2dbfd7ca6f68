use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::CrossQuarterMode;

/// Calendar settings, usually read from a TOML file.
///
/// ```toml
/// cross_quarter_mode = "following-year"
/// upcoming_days = 45
///
/// [[rename]]
/// month = 4
/// name = "Zenith"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Which Spring Equinox the Winter Solstice pairs with for Imbolc.
    #[serde(default)]
    pub cross_quarter_mode: CrossQuarterMode,

    /// Look-ahead window for upcoming events.
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: u32,

    /// How close (in days) a seasonal marker must be to draw its special card.
    #[serde(default = "default_special_card_window_days")]
    pub special_card_window_days: u32,

    /// Replacement names for regular months, applied in order.
    #[serde(default, rename = "rename")]
    pub renames: Vec<MonthRename>,
}

/// One `[[rename]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonthRename {
    pub month: u8,
    pub name:  String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            cross_quarter_mode:       CrossQuarterMode::default(),
            upcoming_days:            default_upcoming_days(),
            special_card_window_days: default_special_card_window_days(),
            renames:                  Vec::new(),
        }
    }
}

const fn default_upcoming_days() -> u32 {
    30
}
const fn default_special_card_window_days() -> u32 {
    3
}

/// Error type for loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML was malformed or had unknown keys.
    #[error("failed to parse TOML config")]
    Parse(#[from] toml::de::Error),
}

impl CalendarConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` on malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
