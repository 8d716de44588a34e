//! User preferences for move playback.
//!
//! Preferences are layered: the built-in defaults from `default.yaml` first,
//! then an optional user file on top. Missing keys in the user file fall back
//! to the defaults.

#![allow(missing_docs)]

use std::path::Path;

use serde::{Deserialize, Serialize};

mod playback;

pub use playback::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static::lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    pub playback: PlaybackPreferences,
}

impl Preferences {
    /// Loads preferences, layering `user_file` (if any) over the defaults. If
    /// loading fails, then a warning is logged and the default preferences are
    /// returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        Self::try_load(user_file).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences, layering `user_file` (if any) over the defaults.
    pub fn try_load(user_file: Option<&Path>) -> eyre::Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = user_file {
            log::debug!("Loading preferences from {}", path.display());
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }
        Ok(config.build()?.try_deserialize()?)
    }

    /// Writes preferences to a YAML file, creating parent directories as
    /// needed.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }
}
