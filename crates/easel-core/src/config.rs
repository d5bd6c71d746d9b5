//! Session configuration.
//!
//! Paths and localized labels the session needs from its host. Loaded from a
//! JSON file, falling back to built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Localized strings shown by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Name given to a freshly created blank picture.
    pub new_picture: String,
    /// Fullscreen button label while windowed.
    pub fullscreen: String,
    /// Fullscreen button label while fullscreen.
    pub exit_fullscreen: String,
    /// Prompt shown when switching away from unsaved edits.
    pub save_modified_prompt: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            new_picture: "New picture".to_string(),
            fullscreen: "Fullscreen".to_string(),
            exit_fullscreen: "Exit fullscreen".to_string(),
            save_modified_prompt: "Save changes to the current picture?".to_string(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Root under which uploaded images live (`{default_path}/uploads/...`).
    pub default_path: String,
    /// Prefix for bundled media such as the 1x1 blank picture.
    pub media_file_path: String,
    /// Name of the initial blank session.
    pub default_name: String,
    pub labels: Labels,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_path: String::new(),
            media_file_path: "/lib/media/".to_string(),
            default_name: "Untitled".to_string(),
            labels: Labels::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load configuration, using defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Default config file location.
    ///
    /// On Unix: `~/.local/share/easel/config.json`
    /// On Windows: `%LOCALAPPDATA%\easel\config.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_location() -> ConfigResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| ConfigError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("easel").join("config.json"))
    }

    /// Location of the 1x1 blank picture used for new pictures.
    pub fn blank_picture_url(&self) -> String {
        format!("{}_1x1.png", self.media_file_path)
    }
}
