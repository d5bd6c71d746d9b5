//! Boundary to the host application.
//!
//! Each collaborator the session talks to is a small trait. They are bundled
//! in a [`SessionContext`] that is built once and handed to the controller.
//!
//! Note: the session runs on the host's single event-loop thread, so none of
//! these traits require `Send`.

mod recording;

pub use recording::{HostCall, RecordingHost};

use crate::config::SessionConfig;
use crate::events::{OutboundEvent, SnapshotHandle};
use crate::keyboard::{InputSubscription, KeyPhase};
use crate::picture::PictureDescriptor;

/// The host's stage and its object selection.
pub trait Stage {
    /// Check if a host object is currently selected.
    fn has_selected_object(&self) -> bool;

    /// Tell the stage the selected object's picture changed.
    fn update_object(&mut self);
}

/// Run/stop state of the program-execution engine.
pub trait Engine {
    fn is_running(&self) -> bool;

    /// Stop the running program.
    fn pause(&mut self);

    /// Start the program again after a pause.
    fn resume(&mut self);
}

/// The host's picture list.
pub trait Playground {
    /// Add a picture to the selected object. With `is_switch` the new
    /// picture is also selected, which switches the session to it.
    fn add_picture(&mut self, picture: PictureDescriptor, is_switch: bool);
}

/// The host's undo history for picture commands.
pub trait PictureHistory {
    /// Record a user edit so it can be undone from the host.
    fn record_edit(&mut self, snapshot: SnapshotHandle);

    /// Drop every picture command from undo/redo.
    fn clear_picture_commands(&mut self);
}

/// Save-or-discard prompt.
///
/// The answer is delivered later through
/// [`SessionController::resolve_confirmation`](crate::SessionController::resolve_confirmation).
pub trait Confirmation {
    fn request(&mut self, message: &str);
}

/// Outbound event channel to the host.
pub trait EventSink {
    fn publish(&mut self, event: OutboundEvent);
}

/// Placement of the editor view inside the host page.
pub trait ViewContainer {
    /// Check if the view carries the fullscreen marker.
    fn is_fullscreen(&self) -> bool;

    /// Move the view back into its normal picture panel.
    fn attach_to_picture_view(&mut self);

    /// Move the view to the document root.
    fn attach_to_document_root(&mut self);

    fn set_fullscreen_marker(&mut self, fullscreen: bool);

    /// Update the fullscreen button's title, if the view has one.
    fn set_button_label(&mut self, label: &str);
}

/// Source of raw key events.
pub trait InputSource {
    /// Subscribe to one phase. Returns `None` if the source has no such
    /// channel.
    fn subscribe(&mut self, phase: KeyPhase) -> Option<InputSubscription>;

    /// Release a subscription returned by `subscribe`.
    fn release(&mut self, subscription: InputSubscription);
}

/// Everything the session needs from its host, built once at startup.
pub struct SessionContext {
    pub stage: Box<dyn Stage>,
    pub engine: Box<dyn Engine>,
    pub playground: Box<dyn Playground>,
    pub history: Box<dyn PictureHistory>,
    pub confirmation: Box<dyn Confirmation>,
    pub events: Box<dyn EventSink>,
    pub view: Box<dyn ViewContainer>,
    pub input: Box<dyn InputSource>,
    pub config: SessionConfig,
}

impl SessionContext {
    /// Build a context where one host object plays every role.
    pub fn from_host<H>(host: H, config: SessionConfig) -> Self
    where
        H: Stage
            + Engine
            + Playground
            + PictureHistory
            + Confirmation
            + EventSink
            + ViewContainer
            + InputSource
            + Clone
            + 'static,
    {
        Self {
            stage: Box::new(host.clone()),
            engine: Box::new(host.clone()),
            playground: Box::new(host.clone()),
            history: Box::new(host.clone()),
            confirmation: Box::new(host.clone()),
            events: Box::new(host.clone()),
            view: Box::new(host.clone()),
            input: Box::new(host),
            config,
        }
    }
}
