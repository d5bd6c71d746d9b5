//! Events exchanged with the host application and the drawing widget.

use crate::picture::PictureDescriptor;
use crate::session::SessionRecord;
use crate::widget::ImageArtifact;
use serde::{Deserialize, Serialize};

/// Events the host application sends to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "picture", rename_all = "camelCase")]
pub enum HostEvent {
    /// Import an image into the current session.
    PictureImport(PictureDescriptor),
    /// The execution engine started running.
    Run,
    /// The execution engine stopped.
    Stop,
    /// The host selected a picture for editing.
    PictureSelected(PictureDescriptor),
    /// The host view changed size.
    Resized,
}

/// Host event kinds the controller can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    PictureImport,
    Run,
    Stop,
    PictureSelected,
    Resized,
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::PictureImport(_) => HostEventKind::PictureImport,
            HostEvent::Run => HostEventKind::Run,
            HostEvent::Stop => HostEventKind::Stop,
            HostEvent::PictureSelected(_) => HostEventKind::PictureSelected,
            HostEvent::Resized => HostEventKind::Resized,
        }
    }
}

/// Opaque handle to an edit checkpoint reported by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotHandle(pub u64);

/// Events emitted by the drawing widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetEvent {
    SnapshotSaved { snapshot: SnapshotHandle },
    NewPicture,
    ImportImage,
    SavePicture,
    SaveNewPicture,
    FullScreenOn,
    FullScreenOff,
}

/// A persistence request for the current picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveRequest {
    /// Point-in-time copy of the session record.
    pub file: SessionRecord,
    /// Rendered artifact.
    pub image: ImageArtifact,
    /// True when the save was triggered by a switch confirmation.
    pub task: bool,
}

/// Events the session sends back to the host application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundEvent {
    /// Ask the host to open its import chooser.
    OpenPictureImport,
    /// Ask the host to persist the picture.
    SaveCanvasImage(SaveRequest),
}
