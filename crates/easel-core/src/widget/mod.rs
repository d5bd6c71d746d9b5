//! Boundary to the embedded drawing widget.
//!
//! The widget owns rendering, tools and its own undo stack. The session only
//! needs to reset it, push images into it, pull the current artifact out of
//! it and forward input to it.

mod headless;
mod state;

pub use headless::{HeadlessWidget, WidgetCall};
pub use state::{GraphicsMode, RasterImport, VectorImport};

use crate::events::WidgetEvent;
use crate::keyboard::KeyEvent;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// A rendered picture as handed to persistence (a data URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageArtifact(String);

impl ImageArtifact {
    /// Wrap an existing data URL or image URI.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Encode PNG bytes as a data URL.
    pub fn from_png_bytes(data: &[u8]) -> Self {
        Self(format!("data:image/png;base64,{}", STANDARD.encode(data)))
    }

    pub fn as_uri(&self) -> &str {
        &self.0
    }

    /// Decode the payload of a base64 data URL.
    pub fn decode(&self) -> Option<Vec<u8>> {
        let (_, payload) = self.0.split_once(";base64,")?;
        STANDARD.decode(payload).ok()
    }
}

/// The drawing surface the session drives.
pub trait PaintWidget {
    /// Current editing mode.
    fn graphics_mode(&self) -> GraphicsMode;

    /// Discard the in-memory document.
    fn reset(&mut self);

    /// Load a raster image from `src`.
    fn add_bitmap(&mut self, src: &str, options: RasterImport);

    /// Load a vector image from `src`.
    fn add_svg(&mut self, src: &str, options: VectorImport);

    /// Render the current picture.
    fn data_url(&self) -> ImageArtifact;

    /// Serialize the current vector document.
    fn export_svg(&self) -> String;

    /// Re-layout after the container changed size.
    fn realign(&mut self);

    /// Handle a key event routed from the host.
    fn handle_key(&mut self, event: &KeyEvent);

    /// Take the events emitted since the last call.
    fn drain_events(&mut self) -> Vec<WidgetEvent>;
}

/// Lazily creates the widget on first initialization.
pub type WidgetFactory = Box<dyn FnOnce() -> Box<dyn PaintWidget>>;
