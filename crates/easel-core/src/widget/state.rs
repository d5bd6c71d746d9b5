//! Widget editing state definitions.

use serde::{Deserialize, Serialize};

/// The editing mode of the drawing widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsMode {
    /// Raster editing - the picture is a bitmap layer.
    #[default]
    Bitmap,
    /// Vector editing - the picture is an SVG document.
    Vector,
}

impl GraphicsMode {
    /// Check if the widget is editing vectors.
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector)
    }
}

/// Options for pushing a raster image into the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterImport {
    /// Replace the current layer instead of pasting on top of it.
    pub replace_layer: bool,
    /// Mode to switch the widget into, if any.
    pub mode: Option<GraphicsMode>,
}

/// Options for pushing a vector image into the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VectorImport {
    /// Mode to switch the widget into, if any.
    pub mode: Option<GraphicsMode>,
}

impl RasterImport {
    /// Options for an import: a picture being opened replaces the layer and
    /// forces bitmap mode, a plain import is pasted in the current mode.
    pub fn new(opening: bool) -> Self {
        Self {
            replace_layer: opening,
            mode: opening.then_some(GraphicsMode::Bitmap),
        }
    }
}

impl VectorImport {
    /// See [`RasterImport::new`].
    pub fn new(opening: bool) -> Self {
        Self {
            mode: opening.then_some(GraphicsMode::Vector),
        }
    }
}
