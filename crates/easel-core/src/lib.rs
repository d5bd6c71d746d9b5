//! Easel Core Library
//!
//! Coordinates a single picture editing session between a host application's
//! stage and an embedded drawing widget: which picture is open, whether it
//! has unsaved edits, and how to switch pictures without losing work.

pub mod bridge;
pub mod config;
pub mod controller;
pub mod events;
pub mod host;
pub mod keyboard;
pub mod picture;
pub mod save;
pub mod session;
pub mod view;
pub mod widget;

pub use bridge::{ImportBridge, ImportOutcome, SnapshotOrigin, resolve_image_source};
pub use config::{ConfigError, ConfigResult, Labels, SessionConfig};
pub use controller::{
    ConfirmResolution, ConfirmState, PendingConfirmation, SessionController, SwitchOutcome,
};
pub use events::{HostEvent, HostEventKind, OutboundEvent, SaveRequest, SnapshotHandle, WidgetEvent};
pub use host::{RecordingHost, SessionContext};
pub use keyboard::{KeyEvent, KeyPhase, KeyboardScope};
pub use picture::{ImageType, PictureDescriptor};
pub use save::{SaveOutcome, SaveProtocol};
pub use session::{EditMode, ExportExt, SessionRecord};
pub use view::{ViewAttachment, ViewPlacement};
pub use widget::{GraphicsMode, HeadlessWidget, ImageArtifact, PaintWidget, WidgetFactory};
