//! The session record: which picture is open and whether it has unsaved edits.
//!
//! The record is only changed through the transition methods below, each of
//! which leaves it consistent. Saves work on a clone.

use crate::picture::PictureDescriptor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether saving creates a new asset or overwrites the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    New,
    Edit,
}

/// Extension of the last exported artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportExt {
    Png,
    Svg,
}

/// The active picture editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    id: String,
    name: String,
    modified: bool,
    mode: EditMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    object_id: Option<String>,
    #[serde(default)]
    is_update: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ext: Option<ExportExt>,
}

/// Generate a fresh session id.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl SessionRecord {
    /// A blank `new`-mode session with a fresh id.
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            modified: false,
            mode: EditMode::New,
            object_id: None,
            is_update: false,
            svg: None,
            ext: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True iff a user edit has not been persisted yet.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    /// True once the host stage was notified about this id.
    pub fn is_update(&self) -> bool {
        self.is_update
    }

    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    pub fn ext(&self) -> Option<ExportExt> {
        self.ext
    }

    /// Check whether a descriptor refers to the open picture.
    pub fn is_same_picture(&self, picture: &PictureDescriptor) -> bool {
        picture.id.as_deref() == Some(self.id.as_str())
    }

    /// Record an unsaved user edit.
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Drop the unsaved-edit marker without persisting.
    pub fn discard_modifications(&mut self) {
        self.modified = false;
    }

    /// Record that the host stage has been notified.
    pub fn mark_updated(&mut self) {
        self.is_update = true;
    }

    /// Force the next save to create a new asset.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Tag the record with the artifact about to be saved.
    pub fn set_export(&mut self, svg: Option<String>) {
        self.ext = Some(if svg.is_some() { ExportExt::Svg } else { ExportExt::Png });
        self.svg = svg;
    }

    /// Clear the flags a save settles.
    pub fn mark_saved(&mut self) {
        self.modified = false;
        self.is_update = false;
    }

    /// Replace the session with an existing picture opened for editing.
    ///
    /// Returns false (and leaves the record untouched) if the descriptor has
    /// no id.
    pub fn open(&mut self, picture: &PictureDescriptor) -> bool {
        let Some(id) = picture.id.clone() else {
            return false;
        };
        self.clear_transient();
        self.id = id;
        self.name = picture.name.clone().unwrap_or_default();
        self.mode = EditMode::Edit;
        self.object_id = picture.object_id.clone();
        true
    }

    /// Start a blank `new`-mode session under a fresh id, keeping the name.
    ///
    /// The object link is dropped so the next save creates a new asset.
    pub fn renew(&mut self) {
        self.clear_transient();
        self.id = generate_id();
        self.mode = EditMode::New;
        self.object_id = None;
    }

    fn clear_transient(&mut self) {
        self.modified = false;
        self.svg = None;
        self.ext = None;
    }
}
