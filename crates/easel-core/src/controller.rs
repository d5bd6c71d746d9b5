//! Session controller.
//!
//! Owns the session record and decides, for every request to edit another
//! picture, whether to switch right away, re-sync the host, or pause the
//! program and ask the user to save or discard first. At most one such
//! question is outstanding at any time; switch requests arriving while it is
//! open are dropped.

use std::collections::HashSet;

use crate::bridge::{ImportBridge, ImportOutcome, SnapshotOrigin};
use crate::config::SessionConfig;
use crate::events::{HostEvent, HostEventKind, OutboundEvent, SnapshotHandle, WidgetEvent};
use crate::host::SessionContext;
use crate::keyboard::{KeyEvent, KeyboardScope};
use crate::picture::PictureDescriptor;
use crate::save::{SaveOutcome, SaveProtocol};
use crate::session::{EditMode, SessionRecord, generate_id};
use crate::view::{ViewAttachment, ViewPlacement};
use crate::widget::{PaintWidget, WidgetFactory};

/// A switch waiting for the user's save-or-discard answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirmation {
    /// The picture the user asked for.
    pub target: PictureDescriptor,
    /// Whether the program was running (and got paused) when asked.
    pub was_running: bool,
}

/// Confirmation state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    Pending(PendingConfirmation),
}

impl ConfirmState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Result of a switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The picture was already open. The host was re-synced if needed.
    Reselected,
    /// The picture is now open.
    Switched,
    /// The current picture has unsaved edits; the user was asked.
    ConfirmRequested,
    /// A question is already open. The request was dropped.
    Rejected,
    /// The widget does not exist yet. Nothing happened.
    Uninitialized,
}

/// What answering the question did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmResolution {
    /// The user chose to save (as opposed to discard).
    pub saved: bool,
    /// The requested switch was applied. False when the program had been
    /// running: it is resumed on the current picture instead.
    pub switched: bool,
}

/// Coordinates one picture editing session between host and widget.
pub struct SessionController {
    ctx: SessionContext,
    session: SessionRecord,
    confirm: ConfirmState,
    widget: Option<Box<dyn PaintWidget>>,
    factory: Option<WidgetFactory>,
    registrations: HashSet<HostEventKind>,
    keyboard: KeyboardScope,
    bridge: ImportBridge,
    saver: SaveProtocol,
    view: ViewAttachment,
}

impl SessionController {
    /// Create a controller with a blank session. The widget is created on
    /// the first [`initialize`](Self::initialize).
    pub fn new(ctx: SessionContext, factory: WidgetFactory) -> Self {
        let session = SessionRecord::blank(ctx.config.default_name.clone());
        let registrations = [HostEventKind::PictureImport, HostEventKind::Run, HostEventKind::Stop]
            .into_iter()
            .collect();
        Self {
            ctx,
            session,
            confirm: ConfirmState::Idle,
            widget: None,
            factory: Some(factory),
            registrations,
            keyboard: KeyboardScope::new(),
            bridge: ImportBridge::new(),
            saver: SaveProtocol::new(),
            view: ViewAttachment::new(),
        }
    }

    /// Create the widget and start listening for selection changes.
    ///
    /// Returns false if the widget already exists.
    pub fn initialize(&mut self) -> bool {
        if self.widget.is_some() {
            return false;
        }
        let Some(factory) = self.factory.take() else {
            return false;
        };

        self.widget = Some(factory());
        // The widget's first snapshot is its blank document
        self.bridge.mark_import();
        self.registrations.insert(HostEventKind::PictureSelected);
        self.registrations.insert(HostEventKind::Resized);
        log::info!("Picture editor initialized");
        true
    }

    /// Show the editor, creating the widget on first use.
    pub fn show(&mut self) {
        self.initialize();
    }

    pub fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    /// The active session.
    pub fn session(&self) -> &SessionRecord {
        &self.session
    }

    pub fn confirm_state(&self) -> &ConfirmState {
        &self.confirm
    }

    pub fn is_confirm_pending(&self) -> bool {
        self.confirm.is_pending()
    }

    pub fn keyboard(&self) -> &KeyboardScope {
        &self.keyboard
    }

    pub fn config(&self) -> &SessionConfig {
        &self.ctx.config
    }

    /// Check if the controller currently listens to a host event kind.
    pub fn is_registered(&self, kind: HostEventKind) -> bool {
        self.registrations.contains(&kind)
    }

    // --- Event dispatch ---

    /// Dispatch an event from the host application.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        if !self.registrations.contains(&event.kind()) {
            log::debug!("Ignoring unregistered host event {:?}", event.kind());
            return;
        }

        match event {
            HostEvent::PictureImport(picture) => {
                self.import_picture(&picture);
            }
            HostEvent::Run => self.keyboard.detach(self.ctx.input.as_mut()),
            HostEvent::Stop => self.keyboard.attach(self.ctx.input.as_mut()),
            HostEvent::PictureSelected(picture) => {
                self.switch_to(picture);
            }
            HostEvent::Resized => {
                if let Some(widget) = self.widget.as_mut() {
                    widget.realign();
                }
            }
        }
    }

    /// Dispatch an event emitted by the widget.
    pub fn handle_widget_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::SnapshotSaved { snapshot } => self.on_snapshot(snapshot),
            WidgetEvent::NewPicture => self.start_new_picture(),
            WidgetEvent::ImportImage => self.ctx.events.publish(OutboundEvent::OpenPictureImport),
            WidgetEvent::SavePicture => {
                self.save(false);
            }
            WidgetEvent::SaveNewPicture => {
                self.session.set_mode(EditMode::New);
                self.save(false);
            }
            WidgetEvent::FullScreenOn => {
                self.set_fullscreen(Some(true));
            }
            WidgetEvent::FullScreenOff => {
                self.set_fullscreen(Some(false));
            }
        }
    }

    /// Drain the widget's queued events and dispatch them in order.
    ///
    /// Returns the number of events handled.
    pub fn pump_widget_events(&mut self) -> usize {
        let events = match self.widget.as_mut() {
            Some(widget) => widget.drain_events(),
            None => return 0,
        };
        let count = events.len();
        for event in events {
            self.handle_widget_event(event);
        }
        count
    }

    /// Forward a key event to the widget if the keyboard scope is attached.
    ///
    /// Returns true if the widget received it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.keyboard.accepts(event) {
            return false;
        }
        match self.widget.as_mut() {
            Some(widget) => {
                widget.handle_key(event);
                true
            }
            None => false,
        }
    }

    fn on_snapshot(&mut self, snapshot: SnapshotHandle) {
        let origin = self.bridge.take_snapshot_origin();
        if origin == SnapshotOrigin::User && self.ctx.stage.has_selected_object() {
            self.ctx.history.record_edit(snapshot);
            self.session.mark_modified();
        }
    }

    // --- Switching ---

    /// Request editing another picture.
    pub fn switch_to(&mut self, picture: PictureDescriptor) -> SwitchOutcome {
        if self.widget.is_none() {
            log::debug!("Switch ignored, editor not initialized");
            return SwitchOutcome::Uninitialized;
        }

        if self.session.is_same_picture(&picture) {
            if !self.session.is_update() {
                self.ctx.stage.update_object();
                self.session.mark_updated();
            }
            return SwitchOutcome::Reselected;
        }

        let outcome = if !self.session.is_modified() {
            self.apply_switch(&picture);
            SwitchOutcome::Switched
        } else {
            if self.confirm.is_pending() {
                log::debug!("Switch to {:?} dropped, confirmation already pending", picture.id);
                return SwitchOutcome::Rejected;
            }

            let was_running = self.ctx.engine.is_running();
            if was_running {
                self.ctx.engine.pause();
            }
            log::info!("Picture {} has unsaved edits, asking before switching", self.session.id());
            self.confirm = ConfirmState::Pending(PendingConfirmation {
                target: picture,
                was_running,
            });
            self.ctx
                .confirmation
                .request(&self.ctx.config.labels.save_modified_prompt);
            SwitchOutcome::ConfirmRequested
        };

        // The host hears about the switch before the user has answered
        self.ctx.stage.update_object();
        self.session.mark_updated();
        outcome
    }

    /// Deliver the user's answer to the pending question.
    ///
    /// Returns `None` (and does nothing) if no question is pending.
    pub fn resolve_confirmation(&mut self, accepted: bool) -> Option<ConfirmResolution> {
        let ConfirmState::Pending(pending) = std::mem::take(&mut self.confirm) else {
            log::debug!("No confirmation pending");
            return None;
        };

        if accepted {
            self.save(true);
        } else {
            log::info!("Discarding edits to picture {}", self.session.id());
            self.session.discard_modifications();
        }

        let switched = if pending.was_running {
            self.ctx.engine.resume();
            false
        } else {
            self.apply_switch(&pending.target);
            true
        };

        Some(ConfirmResolution {
            saved: accepted,
            switched,
        })
    }

    fn apply_switch(&mut self, picture: &PictureDescriptor) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };

        self.session.discard_modifications();
        self.bridge.mark_import();
        widget.reset();

        if self.session.open(picture) {
            self.bridge.import_picture(
                picture,
                true,
                widget.as_mut(),
                &self.ctx.config.default_path,
            );
        } else {
            self.session.renew();
        }

        self.ctx.history.clear_picture_commands();
        log::info!("Switched to picture {}", self.session.id());
    }

    /// Ask the host to add and select a blank 1x1 picture.
    pub fn start_new_picture(&mut self) {
        let name = self.ctx.config.labels.new_picture.clone();
        let mut picture = PictureDescriptor::new(generate_id(), name)
            .with_dimension(1.0, 1.0)
            .with_fileurl(self.ctx.config.blank_picture_url());
        if let Some(object_id) = self.session.object_id() {
            picture = picture.with_object_id(object_id);
        }
        self.ctx.playground.add_picture(picture, true);
    }

    // --- Import / save / view ---

    /// Paste an image into the open picture.
    pub fn import_picture(&mut self, picture: &PictureDescriptor) -> Option<ImportOutcome> {
        let widget = self.widget.as_mut()?;
        Some(self.bridge.import_picture(
            picture,
            false,
            widget.as_mut(),
            &self.ctx.config.default_path,
        ))
    }

    /// Save the current picture. `is_task` marks saves made on behalf of a
    /// switch confirmation.
    pub fn save(&mut self, is_task: bool) -> SaveOutcome {
        let Some(widget) = self.widget.as_deref() else {
            return SaveOutcome::NoWidget;
        };
        self.saver.save(
            &mut self.session,
            is_task,
            widget,
            self.ctx.stage.as_ref(),
            self.ctx.events.as_mut(),
        )
    }

    /// Enter (`Some(true)`), leave (`Some(false)`) or toggle (`None`)
    /// fullscreen. Returns `None` before the widget exists.
    pub fn set_fullscreen(&mut self, flag: Option<bool>) -> Option<ViewPlacement> {
        let widget = self.widget.as_mut()?;
        Some(self.view.set_fullscreen(
            flag,
            self.ctx.view.as_mut(),
            widget.as_mut(),
            &self.ctx.config.labels,
        ))
    }

    /// Put the view back in its panel.
    pub fn clear(&mut self) {
        self.set_fullscreen(Some(false));
    }

    /// Release key subscriptions and stop listening to the host.
    pub fn dispose(&mut self) {
        self.keyboard.detach(self.ctx.input.as_mut());
        self.registrations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use crate::session::ExportExt;
    use crate::widget::{GraphicsMode, HeadlessWidget, RasterImport, WidgetCall};

    struct Fixture {
        host: RecordingHost,
        widget: HeadlessWidget,
        controller: SessionController,
    }

    fn fixture() -> Fixture {
        let host = RecordingHost::new();
        let widget = HeadlessWidget::new();
        let handle = widget.clone();
        let mut controller = SessionController::new(
            SessionContext::from_host(host.clone(), SessionConfig::default()),
            Box::new(move || Box::new(handle) as Box<dyn PaintWidget>),
        );
        controller.initialize();
        Fixture { host, widget, controller }
    }

    fn picture(id: &str) -> PictureDescriptor {
        PictureDescriptor::new(id, format!("picture {}", id)).with_fileurl(format!("{}.png", id))
    }

    /// Open `id` and make a user edit on it.
    fn edited(f: &mut Fixture, id: &str) {
        f.controller.switch_to(picture(id));
        // Echo of the import
        f.widget.snapshot();
        f.widget.snapshot();
        f.controller.pump_widget_events();
        assert!(f.controller.session().is_modified());
        f.host.clear_calls();
        f.widget.clear_calls();
    }

    fn update_count(host: &RecordingHost) -> usize {
        host.count(|c| matches!(c, HostCall::UpdateObject))
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let created = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = created.clone();
        let mut controller = SessionController::new(
            SessionContext::from_host(RecordingHost::new(), SessionConfig::default()),
            Box::new(move || {
                counter.set(counter.get() + 1);
                Box::new(HeadlessWidget::new()) as Box<dyn PaintWidget>
            }),
        );

        assert!(!controller.is_initialized());
        assert!(controller.initialize());
        assert!(!controller.initialize());
        controller.show();
        assert_eq!(created.get(), 1);
    }

    #[test]
    fn test_new_controller_session() {
        let f = fixture();
        let session = f.controller.session();
        assert_eq!(session.name(), f.controller.config().default_name);
        assert_eq!(session.name(), "Untitled");
        assert_eq!(session.mode(), EditMode::New);
        assert!(!session.is_modified());
    }

    #[test]
    fn test_selection_ignored_before_initialize() {
        let host = RecordingHost::new();
        let mut controller = SessionController::new(
            SessionContext::from_host(host.clone(), SessionConfig::default()),
            Box::new(|| Box::new(HeadlessWidget::new()) as Box<dyn PaintWidget>),
        );
        let id = controller.session().id().to_string();

        assert!(!controller.is_registered(HostEventKind::PictureSelected));
        controller.handle_host_event(HostEvent::PictureSelected(picture("a")));
        assert_eq!(controller.session().id(), id);
        assert_eq!(controller.switch_to(picture("a")), SwitchOutcome::Uninitialized);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_initial_snapshot_is_not_an_edit() {
        let mut f = fixture();
        f.widget.snapshot();
        f.controller.pump_widget_events();

        assert!(!f.controller.session().is_modified());
        assert_eq!(f.host.count(|c| matches!(c, HostCall::RecordEdit(_))), 0);
    }

    #[test]
    fn test_user_snapshot_marks_modified() {
        let mut f = fixture();
        f.widget.snapshot();
        let edit = f.widget.snapshot();
        f.controller.pump_widget_events();

        assert!(f.controller.session().is_modified());
        assert_eq!(f.host.calls(), vec![HostCall::RecordEdit(edit)]);
    }

    #[test]
    fn test_snapshot_without_selected_object() {
        let mut f = fixture();
        f.host.set_selected_object(false);
        f.widget.snapshot();
        f.widget.snapshot();
        f.controller.pump_widget_events();

        assert!(!f.controller.session().is_modified());
    }

    #[test]
    fn test_switch_unmodified_opens_picture() {
        let mut f = fixture();

        let outcome = f.controller.switch_to(picture("a").with_object_id("obj1"));

        assert_eq!(outcome, SwitchOutcome::Switched);
        let session = f.controller.session();
        assert_eq!(session.id(), "a");
        assert_eq!(session.name(), "picture a");
        assert_eq!(session.mode(), EditMode::Edit);
        assert_eq!(session.object_id(), Some("obj1"));
        assert!(session.is_update());
        assert!(f.host.prompts().is_empty());
        assert_eq!(
            f.widget.calls(),
            vec![
                WidgetCall::Reset,
                WidgetCall::AddBitmap {
                    src: "a.png".to_string(),
                    options: RasterImport::new(true),
                },
            ]
        );
        assert_eq!(
            f.host.calls(),
            vec![HostCall::ClearPictureCommands, HostCall::UpdateObject]
        );
    }

    #[test]
    fn test_switch_to_blank_descriptor() {
        let mut f = fixture();
        f.controller.switch_to(picture("a").with_object_id("obj1"));
        f.widget.clear_calls();

        f.controller.switch_to(PictureDescriptor::default());

        let session = f.controller.session();
        assert_ne!(session.id(), "a");
        assert!(!session.id().is_empty());
        assert_eq!(session.mode(), EditMode::New);
        assert_eq!(session.object_id(), None);
        assert_eq!(f.widget.calls(), vec![WidgetCall::Reset]);

        // Saving the blank session creates a new asset
        f.controller.save(false);
        let saves = f.host.saves();
        assert_eq!(saves[0].file.mode(), EditMode::New);
        assert_eq!(saves[0].file.object_id(), None);
    }

    #[test]
    fn test_reselect_notifies_once() {
        let mut f = fixture();
        f.controller.switch_to(picture("a"));
        f.controller.save(false);
        assert!(!f.controller.session().is_update());
        f.host.clear_calls();

        assert_eq!(f.controller.switch_to(picture("a")), SwitchOutcome::Reselected);
        assert_eq!(f.controller.switch_to(picture("a")), SwitchOutcome::Reselected);

        assert_eq!(update_count(&f.host), 1);
        assert!(f.controller.session().is_update());
    }

    #[test]
    fn test_reselect_keeps_modified() {
        let mut f = fixture();
        edited(&mut f, "a");

        assert_eq!(f.controller.switch_to(picture("a")), SwitchOutcome::Reselected);
        assert!(f.controller.session().is_modified());
        assert!(f.host.prompts().is_empty());
    }

    #[test]
    fn test_modified_switch_prompts_once() {
        let mut f = fixture();
        edited(&mut f, "a");

        assert_eq!(f.controller.switch_to(picture("b")), SwitchOutcome::ConfirmRequested);
        assert_eq!(f.host.prompts(), vec![SessionConfig::default().labels.save_modified_prompt]);
        assert!(f.controller.is_confirm_pending());
        // Optimistic host notification
        assert_eq!(update_count(&f.host), 1);
        assert!(f.controller.session().is_update());
        assert_eq!(f.controller.session().id(), "a");
    }

    #[test]
    fn test_second_switch_while_pending_is_rejected() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.controller.switch_to(picture("b"));
        let before = f.controller.session().clone();
        f.host.clear_calls();

        assert_eq!(f.controller.switch_to(picture("c")), SwitchOutcome::Rejected);

        assert_eq!(f.controller.session(), &before);
        assert!(f.host.calls().is_empty());
        match f.controller.confirm_state() {
            ConfirmState::Pending(pending) => assert_eq!(pending.target.id.as_deref(), Some("b")),
            ConfirmState::Idle => panic!("Expected pending confirmation"),
        }

        // The original target wins once answered
        f.controller.resolve_confirmation(false);
        assert_eq!(f.controller.session().id(), "b");
    }

    #[test]
    fn test_accept_saves_then_switches() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.controller.switch_to(picture("b"));

        let resolution = f.controller.resolve_confirmation(true);

        assert_eq!(resolution, Some(ConfirmResolution { saved: true, switched: true }));
        let saves = f.host.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].file.id(), "a");
        assert!(saves[0].task);

        let session = f.controller.session();
        assert_eq!(session.id(), "b");
        assert!(!session.is_modified());
        assert_eq!(session.mode(), EditMode::Edit);
        assert!(!f.controller.is_confirm_pending());
    }

    #[test]
    fn test_reject_discards_then_switches() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.controller.switch_to(picture("b"));

        let resolution = f.controller.resolve_confirmation(false);

        assert_eq!(resolution, Some(ConfirmResolution { saved: false, switched: true }));
        assert!(f.host.saves().is_empty());
        assert_eq!(f.controller.session().id(), "b");
        assert!(!f.controller.session().is_modified());
        assert!(!f.controller.is_confirm_pending());
    }

    #[test]
    fn test_running_program_is_paused_and_resumed() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.host.set_running(true);

        f.controller.switch_to(picture("b"));
        assert!(!f.host.running());

        let resolution = f.controller.resolve_confirmation(true);

        assert_eq!(resolution, Some(ConfirmResolution { saved: true, switched: false }));
        assert!(f.host.running());
        assert_eq!(f.controller.session().id(), "a");
        assert_eq!(f.host.count(|c| matches!(c, HostCall::Pause)), 1);
        assert_eq!(f.host.count(|c| matches!(c, HostCall::Resume)), 1);
        assert!(!f.controller.is_confirm_pending());
    }

    #[test]
    fn test_running_program_resumed_after_discard() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.host.set_running(true);

        f.controller.switch_to(picture("b"));
        let resolution = f.controller.resolve_confirmation(false);

        assert_eq!(resolution, Some(ConfirmResolution { saved: false, switched: false }));
        let session = f.controller.session();
        assert_eq!(session.id(), "a");
        assert!(!session.is_modified());
        assert!(f.host.running());
        assert_eq!(f.host.count(|c| matches!(c, HostCall::Pause)), 1);
        assert_eq!(f.host.count(|c| matches!(c, HostCall::Resume)), 1);
        assert!(f.host.published().is_empty());
        assert!(!f.widget.calls().contains(&WidgetCall::Reset));
    }

    #[test]
    fn test_switch_after_save_while_pending() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.controller.switch_to(picture("b"));

        // Saving settles the edits, so the next request goes straight through
        f.controller.handle_widget_event(WidgetEvent::SavePicture);
        assert_eq!(f.controller.switch_to(picture("c")), SwitchOutcome::Switched);
        assert_eq!(f.controller.session().id(), "c");
        assert!(f.controller.is_confirm_pending());

        // The older question still resolves against its own target
        f.controller.resolve_confirmation(true);
        let saves = f.host.saves();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1].file.id(), "c");
        assert!(saves[1].task);
        assert_eq!(f.controller.session().id(), "b");
    }

    #[test]
    fn test_resolve_without_pending_does_nothing() {
        let mut f = fixture();
        assert_eq!(f.controller.resolve_confirmation(true), None);
        assert!(f.host.calls().is_empty());
    }

    #[test]
    fn test_pending_blocks_forever_without_answer() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.controller.switch_to(picture("b"));

        for id in ["c", "d", "e"] {
            assert_eq!(f.controller.switch_to(picture(id)), SwitchOutcome::Rejected);
        }
        assert_eq!(f.host.prompts().len(), 1);
    }

    #[test]
    fn test_host_selection_event_switches() {
        let mut f = fixture();
        f.controller.handle_host_event(HostEvent::PictureSelected(picture("a")));
        assert_eq!(f.controller.session().id(), "a");
    }

    #[test]
    fn test_save_picture_event() {
        let mut f = fixture();
        edited(&mut f, "a");

        f.controller.handle_widget_event(WidgetEvent::SavePicture);

        let saves = f.host.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].file.mode(), EditMode::Edit);
        assert!(!saves[0].task);
        assert!(!f.controller.session().is_modified());
        assert!(!f.controller.session().is_update());
    }

    #[test]
    fn test_save_new_picture_forces_new_mode() {
        let mut f = fixture();
        edited(&mut f, "a");
        f.widget.set_graphics_mode(GraphicsMode::Vector);

        f.controller.handle_widget_event(WidgetEvent::SaveNewPicture);

        let saves = f.host.saves();
        assert_eq!(saves[0].file.mode(), EditMode::New);
        assert_eq!(saves[0].file.ext(), Some(ExportExt::Svg));
        assert_eq!(f.controller.session().mode(), EditMode::New);
    }

    #[test]
    fn test_save_before_initialize() {
        let mut controller = SessionController::new(
            SessionContext::from_host(RecordingHost::new(), SessionConfig::default()),
            Box::new(|| Box::new(HeadlessWidget::new()) as Box<dyn PaintWidget>),
        );
        assert_eq!(controller.save(false), SaveOutcome::NoWidget);
    }

    #[test]
    fn test_import_image_event_asks_host() {
        let mut f = fixture();
        f.widget.emit(WidgetEvent::ImportImage);
        f.controller.pump_widget_events();

        assert_eq!(f.host.published(), vec![OutboundEvent::OpenPictureImport]);
    }

    #[test]
    fn test_picture_import_event_pastes_image() {
        let mut f = fixture();
        f.controller.switch_to(picture("a"));
        f.widget.clear_calls();

        f.controller.handle_host_event(HostEvent::PictureImport(
            PictureDescriptor::new("x", "stamp").with_filename("ab12cd34"),
        ));

        assert_eq!(
            f.widget.calls(),
            vec![WidgetCall::AddBitmap {
                src: "/uploads/ab/12/image/ab12cd34.png".to_string(),
                // The echo of opening "a" has not arrived yet
                options: RasterImport::new(true),
            }]
        );
        assert_eq!(f.controller.session().id(), "a");
    }

    #[test]
    fn test_unsupported_import_is_dropped() {
        let mut f = fixture();
        f.widget.clear_calls();

        let outcome = f.controller.import_picture(
            &PictureDescriptor::new("x", "stamp").with_filename("ab12cd34").with_image_type("bmp"),
        );

        assert_eq!(outcome, Some(ImportOutcome::Unsupported("bmp".to_string())));
        assert_eq!(f.widget.import_count(), 0);
    }

    #[test]
    fn test_new_picture_event() {
        let mut f = fixture();
        f.controller.switch_to(picture("a").with_object_id("obj1"));
        f.host.clear_calls();

        f.controller.handle_widget_event(WidgetEvent::NewPicture);

        let calls = f.host.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            HostCall::AddPicture { picture, is_switch } => {
                assert!(*is_switch);
                assert_eq!(picture.name.as_deref(), Some("New picture"));
                assert_eq!(picture.fileurl.as_deref(), Some("/lib/media/_1x1.png"));
                assert_eq!(picture.object_id.as_deref(), Some("obj1"));
                assert_eq!(picture.dimension, Some(kurbo::Size::new(1.0, 1.0)));
                assert!(picture.id.is_some());
            }
            other => panic!("Unexpected call {:?}", other),
        }
    }

    #[test]
    fn test_run_stop_drive_keyboard() {
        let mut f = fixture();

        f.controller.handle_host_event(HostEvent::Stop);
        f.controller.handle_host_event(HostEvent::Stop);
        assert_eq!(f.host.live_subscriptions(), 2);
        assert_eq!(f.controller.keyboard().len(), 2);
        assert!(f.controller.handle_key(&KeyEvent::Pressed("Delete".to_string())));

        f.controller.handle_host_event(HostEvent::Run);
        assert_eq!(f.host.live_subscriptions(), 0);
        assert!(f.controller.keyboard().is_empty());
        assert!(!f.controller.handle_key(&KeyEvent::Released("Delete".to_string())));
        assert_eq!(
            f.widget.calls(),
            vec![WidgetCall::Key(KeyEvent::Pressed("Delete".to_string()))]
        );
    }

    #[test]
    fn test_fullscreen_events() {
        let mut f = fixture();

        f.controller.handle_widget_event(WidgetEvent::FullScreenOn);
        assert!(f.host.fullscreen());
        f.controller.handle_widget_event(WidgetEvent::FullScreenOff);
        assert!(!f.host.fullscreen());

        f.controller.set_fullscreen(None);
        assert!(f.host.fullscreen());
        f.controller.clear();
        assert!(!f.host.fullscreen());
        assert_eq!(f.widget.calls().iter().filter(|c| **c == WidgetCall::Realign).count(), 4);
    }

    #[test]
    fn test_resize_realigns() {
        let mut f = fixture();
        f.controller.handle_host_event(HostEvent::Resized);
        assert_eq!(f.widget.calls(), vec![WidgetCall::Realign]);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let mut f = fixture();
        f.controller.handle_host_event(HostEvent::Stop);

        f.controller.dispose();

        assert_eq!(f.host.live_subscriptions(), 0);
        f.controller.handle_host_event(HostEvent::PictureSelected(picture("a")));
        assert_ne!(f.controller.session().id(), "a");
    }
}
