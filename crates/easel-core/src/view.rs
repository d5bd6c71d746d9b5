//! Fullscreen placement of the editor view.

use crate::config::Labels;
use crate::host::ViewContainer;
use crate::widget::PaintWidget;

/// Where the editor view ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPlacement {
    /// Inside the host's picture panel.
    Embedded,
    /// At the document root, covering the page.
    Fullscreen,
}

/// Moves the editor view between its panel and fullscreen.
#[derive(Debug, Default)]
pub struct ViewAttachment;

impl ViewAttachment {
    pub fn new() -> Self {
        Self
    }

    /// Enter or leave fullscreen.
    ///
    /// `Some(false)` always leaves. `None` toggles: it leaves if the view is
    /// fullscreen and enters otherwise. `Some(true)` always enters. The
    /// widget is re-laid out in every case.
    pub fn set_fullscreen(
        &self,
        flag: Option<bool>,
        view: &mut dyn ViewContainer,
        widget: &mut dyn PaintWidget,
        labels: &Labels,
    ) -> ViewPlacement {
        let leave = flag == Some(false) || (flag != Some(true) && view.is_fullscreen());

        let placement = if leave {
            view.attach_to_picture_view();
            view.set_fullscreen_marker(false);
            view.set_button_label(&labels.fullscreen);
            ViewPlacement::Embedded
        } else {
            view.attach_to_document_root();
            view.set_fullscreen_marker(true);
            view.set_button_label(&labels.exit_fullscreen);
            ViewPlacement::Fullscreen
        };

        widget.realign();
        log::debug!("View placement: {:?}", placement);
        placement
    }
}
