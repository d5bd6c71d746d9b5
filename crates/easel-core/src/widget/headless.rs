//! In-memory widget for tests and headless hosts.

use super::{GraphicsMode, ImageArtifact, PaintWidget, RasterImport, VectorImport};
use crate::events::{SnapshotHandle, WidgetEvent};
use crate::keyboard::KeyEvent;
use std::cell::RefCell;
use std::rc::Rc;

const EMPTY_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;

/// A call the session made into the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCall {
    Reset,
    AddBitmap { src: String, options: RasterImport },
    AddSvg { src: String, options: VectorImport },
    Realign,
    Key(KeyEvent),
}

#[derive(Debug, Default)]
struct HeadlessState {
    mode: GraphicsMode,
    image: Vec<u8>,
    svg: Option<String>,
    calls: Vec<WidgetCall>,
    pending: Vec<WidgetEvent>,
    next_snapshot: u64,
}

/// Widget without a surface. Records every call and queues emitted events.
///
/// Clones share state, so a host can keep a handle after handing a boxed
/// clone to the session.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWidget {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raster content returned by `data_url`.
    pub fn set_image(&self, png: Vec<u8>) {
        self.state.borrow_mut().image = png;
    }

    /// Switch the editing mode as a user would from the toolbar.
    pub fn set_graphics_mode(&self, mode: GraphicsMode) {
        self.state.borrow_mut().mode = mode;
    }

    /// Set the vector document returned by `export_svg`.
    pub fn set_svg(&self, svg: impl Into<String>) {
        self.state.borrow_mut().svg = Some(svg.into());
    }

    /// Queue an event as if the widget emitted it.
    pub fn emit(&self, event: WidgetEvent) {
        self.state.borrow_mut().pending.push(event);
    }

    /// Queue an edit checkpoint and return its handle.
    pub fn snapshot(&self) -> SnapshotHandle {
        let mut state = self.state.borrow_mut();
        state.next_snapshot += 1;
        let snapshot = SnapshotHandle(state.next_snapshot);
        state.pending.push(WidgetEvent::SnapshotSaved { snapshot });
        snapshot
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<WidgetCall> {
        self.state.borrow().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Number of image imports received so far.
    pub fn import_count(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| matches!(call, WidgetCall::AddBitmap { .. } | WidgetCall::AddSvg { .. }))
            .count()
    }

    fn record(&self, call: WidgetCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl PaintWidget for HeadlessWidget {
    fn graphics_mode(&self) -> GraphicsMode {
        self.state.borrow().mode
    }

    fn reset(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            state.image.clear();
            state.svg = None;
        }
        self.record(WidgetCall::Reset);
    }

    fn add_bitmap(&mut self, src: &str, options: RasterImport) {
        if let Some(mode) = options.mode {
            self.state.borrow_mut().mode = mode;
        }
        self.record(WidgetCall::AddBitmap { src: src.to_string(), options });
    }

    fn add_svg(&mut self, src: &str, options: VectorImport) {
        if let Some(mode) = options.mode {
            self.state.borrow_mut().mode = mode;
        }
        self.record(WidgetCall::AddSvg { src: src.to_string(), options });
    }

    fn data_url(&self) -> ImageArtifact {
        ImageArtifact::from_png_bytes(&self.state.borrow().image)
    }

    fn export_svg(&self) -> String {
        self.state
            .borrow()
            .svg
            .clone()
            .unwrap_or_else(|| EMPTY_SVG.to_string())
    }

    fn realign(&mut self) {
        self.record(WidgetCall::Realign);
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        self.record(WidgetCall::Key(event.clone()));
    }

    fn drain_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }
}
