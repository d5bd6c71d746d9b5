//! Save protocol: turns the widget's current picture into a persistence
//! request for the host.
//!
//! Saving is fire-and-forget. The host owns persistence and its failures;
//! the session clears its flags as soon as the request is emitted.

use crate::events::{OutboundEvent, SaveRequest};
use crate::host::{EventSink, Stage};
use crate::session::SessionRecord;
use crate::widget::PaintWidget;

/// Result of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A request was emitted.
    Emitted,
    /// No host object is selected. Nothing was emitted.
    NoSubject,
    /// The widget has not been created yet. Nothing was emitted.
    NoWidget,
}

/// Builds and emits `saveCanvasImage` requests.
#[derive(Debug, Default)]
pub struct SaveProtocol;

impl SaveProtocol {
    pub fn new() -> Self {
        Self
    }

    /// Save the current picture.
    ///
    /// `is_task` marks saves triggered by a switch confirmation rather than
    /// by the user pressing save.
    pub fn save(
        &self,
        session: &mut SessionRecord,
        is_task: bool,
        widget: &dyn PaintWidget,
        stage: &dyn Stage,
        events: &mut dyn EventSink,
    ) -> SaveOutcome {
        if !stage.has_selected_object() {
            log::debug!("Save ignored, no object selected");
            return SaveOutcome::NoSubject;
        }

        let image = widget.data_url();
        let svg = widget.graphics_mode().is_vector().then(|| widget.export_svg());
        session.set_export(svg);

        let file = session.clone();
        log::info!("Saving picture {} ({:?}, task: {})", file.id(), file.ext(), is_task);
        events.publish(OutboundEvent::SaveCanvasImage(SaveRequest {
            file,
            image,
            task: is_task,
        }));

        session.mark_saved();
        SaveOutcome::Emitted
    }
}
