//! Settings persistence
//!
//! Saves and loads [`Settings`] to/from a JSON file so the preferred difficulty and engine
//! colour survive between sessions.
//!
//! # File Location
//!
//! `settings.json` in the platform configuration directory resolved by
//! [`directories::ProjectDirs`], or the current directory when none can be found.
//!
//! # Error Handling
//!
//! [`load_settings`] never fails: missing or unreadable files fall back to defaults with a
//! logged warning. [`save_settings`] reports errors to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chess_mcts::{Color, Difficulty, SearchConfig, TableMode};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read or write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Player preferences for a console game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Side the engine plays
    pub engine_color: Color,
    pub use_book: bool,
    /// Overrides the difficulty's iteration budget
    pub iterations: Option<u32>,
    pub exploration: f64,
    pub table: TableMode,
}

impl Default for Settings {
    fn default() -> Self {
        let search = SearchConfig::default();
        Settings {
            difficulty: Difficulty::default(),
            engine_color: Color::Black,
            use_book: search.use_book,
            iterations: None,
            exploration: search.exploration,
            table: search.table,
        }
    }
}

impl Settings {
    /// Engine configuration for these settings.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            iterations: self
                .iterations
                .unwrap_or_else(|| self.difficulty.iterations()),
            exploration: self.exploration,
            use_book: self.use_book,
            table: self.table,
            ..SearchConfig::default()
        }
    }
}

/// `settings.json` in the user's configuration directory, or in the working directory when
/// the platform has none.
pub fn settings_path() -> PathBuf {
    match ProjectDirs::from("com", "trilltino", "mcts-chess") {
        Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

pub fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings at `path`, or defaults when the file is missing or broken.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return Settings::default();
    }
    match read_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("[SETTINGS] {}. Using defaults.", e);
            Settings::default()
        }
    }
}

/// Write `settings` to `path`, creating the parent directory if needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let io_error = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }
    let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_error)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
