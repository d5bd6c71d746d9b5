//! Event scripts replayed by the headless host.

use easel_core::{HostEvent, KeyEvent, WidgetEvent};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Show the editor (creates the widget).
    Show,
    /// Deliver a host event.
    Host(HostEvent),
    /// Deliver a widget event.
    Widget(WidgetEvent),
    /// Draw a stroke: the widget reports a snapshot.
    Draw,
    /// Answer the pending save-or-discard question.
    Confirm(bool),
    /// Press or release a key.
    Key(KeyEvent),
    /// Start or stop the program without a run/stop event.
    Running(bool),
    /// Select or deselect the host object.
    Selected(bool),
}

/// A recorded sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> ScriptResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}
