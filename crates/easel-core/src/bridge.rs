//! Import bridge: resolves where a picture's image lives and loads it into
//! the widget in the matching editing mode.

use crate::picture::{ImageType, PictureDescriptor};
use crate::widget::{PaintWidget, RasterImport, VectorImport};

/// Where the next widget snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Produced by loading a picture. Not an edit.
    Import,
    /// Produced by the user drawing.
    User,
}

/// Result of an import request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Loaded as a bitmap from the given source.
    Raster(String),
    /// Loaded as a vector document from the given source.
    Vector(String),
    /// The image type is not one the widget can load. Nothing was loaded.
    Unsupported(String),
    /// The descriptor has neither `fileurl` nor `filename`. Nothing was loaded.
    MissingSource,
}

impl ImportOutcome {
    /// Check if the widget received the image.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Raster(_) | Self::Vector(_))
    }
}

/// Resolve the canonical image location of a picture.
///
/// An explicit `fileurl` wins. Otherwise the uploaded file is found under
/// `{default_path}/uploads/{ab}/{cd}/image/{filename}.{type}`, where `ab`
/// and `cd` are the first two pairs of characters of the file name.
pub fn resolve_image_source(picture: &PictureDescriptor, default_path: &str) -> Option<String> {
    if let Some(url) = &picture.fileurl {
        return Some(url.clone());
    }

    let filename = picture.filename.as_deref()?;
    let first: String = filename.chars().take(2).collect();
    let second: String = filename.chars().skip(2).take(2).collect();
    Some(format!(
        "{}/uploads/{}/{}/image/{}.{}",
        default_path,
        first,
        second,
        filename,
        picture.image_type()
    ))
}

/// Loads pictures into the widget and tracks whether the next snapshot is
/// the echo of such a load.
#[derive(Debug, Default)]
pub struct ImportBridge {
    import_pending: bool,
}

impl ImportBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the next snapshot as import-originated.
    pub fn mark_import(&mut self) {
        self.import_pending = true;
    }

    /// Check if the next snapshot will be treated as import-originated.
    pub fn is_import_pending(&self) -> bool {
        self.import_pending
    }

    /// Consume the marker for one snapshot.
    pub fn take_snapshot_origin(&mut self) -> SnapshotOrigin {
        if std::mem::take(&mut self.import_pending) {
            SnapshotOrigin::Import
        } else {
            SnapshotOrigin::User
        }
    }

    /// Load a picture into the widget.
    ///
    /// With `is_switch` the picture is being opened for editing: the load
    /// replaces the current layer and the snapshot it causes is not an edit.
    /// Otherwise the image is pasted into the open picture.
    pub fn import_picture(
        &mut self,
        picture: &PictureDescriptor,
        is_switch: bool,
        widget: &mut dyn PaintWidget,
        default_path: &str,
    ) -> ImportOutcome {
        let Some(src) = resolve_image_source(picture, default_path) else {
            log::warn!("Picture {:?} has no image source, skipping import", picture.id);
            return ImportOutcome::MissingSource;
        };

        if is_switch {
            self.mark_import();
        }

        match picture.image_type() {
            ImageType::Png => {
                widget.add_bitmap(&src, RasterImport::new(self.import_pending));
                log::debug!("Imported bitmap {}", src);
                ImportOutcome::Raster(src)
            }
            ImageType::Svg => {
                widget.add_svg(&src, VectorImport::new(self.import_pending));
                log::debug!("Imported vector {}", src);
                ImportOutcome::Vector(src)
            }
            ImageType::Other(tag) => {
                log::warn!("Unsupported image type {:?} for {}, skipping import", tag, src);
                ImportOutcome::Unsupported(tag)
            }
        }
    }
}
