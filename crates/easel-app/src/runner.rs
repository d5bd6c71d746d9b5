//! Drives a session over in-memory collaborators.

use crate::script::{Script, Step};
use easel_core::{
    HeadlessWidget, OutboundEvent, PaintWidget, RecordingHost, SessionConfig, SessionContext,
    SessionController, SessionRecord,
};
use serde::Serialize;

/// What a replayed script produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Every event the session sent to the host, in order.
    pub events: Vec<OutboundEvent>,
    /// Prompts shown to the user.
    pub prompts: Vec<String>,
    /// The session after the last step.
    pub session: SessionRecord,
}

/// Headless host: a recording host and a headless widget around one session.
pub struct Runner {
    host: RecordingHost,
    widget: HeadlessWidget,
    controller: SessionController,
}

impl Runner {
    pub fn new(config: SessionConfig) -> Self {
        let host = RecordingHost::new();
        let widget = HeadlessWidget::new();
        let handle = widget.clone();
        let controller = SessionController::new(
            SessionContext::from_host(host.clone(), config),
            Box::new(move || Box::new(handle) as Box<dyn PaintWidget>),
        );
        Self { host, widget, controller }
    }

    /// Apply one step, then handle whatever the widget emitted.
    pub fn apply(&mut self, step: Step) {
        log::debug!("Step: {:?}", step);
        match step {
            Step::Show => self.controller.show(),
            Step::Host(event) => self.controller.handle_host_event(event),
            Step::Widget(event) => self.controller.handle_widget_event(event),
            Step::Draw => {
                self.widget.snapshot();
            }
            Step::Confirm(accepted) => {
                if self.controller.resolve_confirmation(accepted).is_none() {
                    log::warn!("Confirm step without a pending question");
                }
            }
            Step::Key(event) => {
                self.controller.handle_key(&event);
            }
            Step::Running(running) => self.host.set_running(running),
            Step::Selected(selected) => self.host.set_selected_object(selected),
        }
        self.controller.pump_widget_events();
    }

    /// Replay a whole script.
    pub fn run(mut self, script: Script) -> Report {
        for step in script.steps {
            self.apply(step);
        }
        Report {
            events: self.host.published(),
            prompts: self.host.prompts(),
            session: self.controller.session().clone(),
        }
    }
}
