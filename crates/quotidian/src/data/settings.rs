//! Application settings
//!
//! The persisted quote-mode preference.

use crate::data::storage;
use crate::data::types::QuoteMode;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings data file name
const SETTINGS_FILE: &str = "settings.json";

/// Persisted preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Quote category fetched on startup
    #[serde(default)]
    pub mode: QuoteMode,
}

impl Settings {
    /// Default location of the settings slot
    pub fn default_path() -> Result<PathBuf> {
        storage::data_path(SETTINGS_FILE)
    }

    /// Load settings from a specific path
    ///
    /// A missing or empty file yields the defaults; a corrupt file is an
    /// error the caller may downgrade.
    pub fn load_from(path: &Path) -> Result<Self> {
        match storage::load_from::<Settings>(path)? {
            Some(settings) => Ok(settings),
            None => Ok(Self::default()),
        }
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }
}
