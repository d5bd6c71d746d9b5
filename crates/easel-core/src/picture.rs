//! Picture descriptors handed over by the host.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image type of a stored picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageType {
    /// Raster image, imported as a bitmap.
    Png,
    /// Vector image, imported as an SVG document.
    Svg,
    /// Anything else. Never dispatched to the widget.
    Other(String),
}

impl ImageType {
    /// Parse an image type tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "png" => ImageType::Png,
            "svg" => ImageType::Svg,
            other => ImageType::Other(other.to_string()),
        }
    }

    /// The tag as it appears in descriptors and file extensions.
    pub fn tag(&self) -> &str {
        match self {
            ImageType::Png => "png",
            ImageType::Svg => "svg",
            ImageType::Other(tag) => tag,
        }
    }
}

impl Default for ImageType {
    fn default() -> Self {
        Self::Png
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A picture as described by the host's object model.
///
/// Every field is optional on the wire; a descriptor without an `id` asks for
/// a blank session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Size>,
    /// Explicit image location. Wins over `filename`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fileurl: Option<String>,
    /// Content-hash style file name of an uploaded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl PictureDescriptor {
    /// Create a descriptor for an existing picture.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the explicit image location.
    pub fn with_fileurl(mut self, url: impl Into<String>) -> Self {
        self.fileurl = Some(url.into());
        self
    }

    /// Set the uploaded file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the image type tag.
    pub fn with_image_type(mut self, tag: impl Into<String>) -> Self {
        self.image_type = Some(tag.into());
        self
    }

    /// Set the owning host object.
    pub fn with_object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    /// Set the picture dimensions.
    pub fn with_dimension(mut self, width: f64, height: f64) -> Self {
        self.dimension = Some(Size::new(width, height));
        self
    }

    /// Image type, defaulting to PNG when absent.
    pub fn image_type(&self) -> ImageType {
        self.image_type
            .as_deref()
            .map(ImageType::from_tag)
            .unwrap_or_default()
    }
}
