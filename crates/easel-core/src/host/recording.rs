//! In-memory host for tests and headless use.

use super::{
    Confirmation, Engine, EventSink, InputSource, Playground, PictureHistory, Stage, ViewContainer,
};
use crate::events::{OutboundEvent, SaveRequest, SnapshotHandle};
use crate::keyboard::{InputSubscription, KeyPhase};
use crate::picture::PictureDescriptor;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// A call the session made into the host, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    UpdateObject,
    Pause,
    Resume,
    AddPicture { picture: PictureDescriptor, is_switch: bool },
    RecordEdit(SnapshotHandle),
    ClearPictureCommands,
    Confirm(String),
    Publish(OutboundEvent),
    AttachToPictureView,
    AttachToDocumentRoot,
    ButtonLabel(String),
}

#[derive(Debug)]
struct RecordingState {
    selected_object: bool,
    running: bool,
    fullscreen: bool,
    has_input: bool,
    next_subscription: u64,
    live_subscriptions: HashSet<u64>,
    calls: Vec<HostCall>,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self {
            selected_object: true,
            running: false,
            fullscreen: false,
            has_input: true,
            next_subscription: 0,
            live_subscriptions: HashSet::new(),
            calls: Vec::new(),
        }
    }
}

/// Host that records every call and answers queries from settable state.
///
/// Starts with an object selected, the engine stopped and both key
/// channels available. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selected_object(&self, selected: bool) {
        self.state.borrow_mut().selected_object = selected;
    }

    pub fn set_running(&self, running: bool) {
        self.state.borrow_mut().running = running;
    }

    pub fn running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn fullscreen(&self) -> bool {
        self.state.borrow().fullscreen
    }

    /// Make the input source report no key channels.
    pub fn set_has_input(&self, available: bool) {
        self.state.borrow_mut().has_input = available;
    }

    /// Number of key subscriptions not yet released.
    pub fn live_subscriptions(&self) -> usize {
        self.state.borrow().live_subscriptions.len()
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Count calls matching a predicate.
    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| predicate(*c)).count()
    }

    /// Outbound events published so far.
    pub fn published(&self) -> Vec<OutboundEvent> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Publish(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    /// Save requests published so far.
    pub fn saves(&self) -> Vec<SaveRequest> {
        self.published()
            .into_iter()
            .filter_map(|event| match event {
                OutboundEvent::SaveCanvasImage(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Confirm(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl Stage for RecordingHost {
    fn has_selected_object(&self) -> bool {
        self.state.borrow().selected_object
    }

    fn update_object(&mut self) {
        self.record(HostCall::UpdateObject);
    }
}

impl Engine for RecordingHost {
    fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    fn pause(&mut self) {
        self.state.borrow_mut().running = false;
        self.record(HostCall::Pause);
    }

    fn resume(&mut self) {
        self.state.borrow_mut().running = true;
        self.record(HostCall::Resume);
    }
}

impl Playground for RecordingHost {
    fn add_picture(&mut self, picture: PictureDescriptor, is_switch: bool) {
        self.record(HostCall::AddPicture { picture, is_switch });
    }
}

impl PictureHistory for RecordingHost {
    fn record_edit(&mut self, snapshot: SnapshotHandle) {
        self.record(HostCall::RecordEdit(snapshot));
    }

    fn clear_picture_commands(&mut self) {
        self.record(HostCall::ClearPictureCommands);
    }
}

impl Confirmation for RecordingHost {
    fn request(&mut self, message: &str) {
        self.record(HostCall::Confirm(message.to_string()));
    }
}

impl EventSink for RecordingHost {
    fn publish(&mut self, event: OutboundEvent) {
        self.record(HostCall::Publish(event));
    }
}

impl ViewContainer for RecordingHost {
    fn is_fullscreen(&self) -> bool {
        self.state.borrow().fullscreen
    }

    fn attach_to_picture_view(&mut self) {
        self.record(HostCall::AttachToPictureView);
    }

    fn attach_to_document_root(&mut self) {
        self.record(HostCall::AttachToDocumentRoot);
    }

    fn set_fullscreen_marker(&mut self, fullscreen: bool) {
        self.state.borrow_mut().fullscreen = fullscreen;
    }

    fn set_button_label(&mut self, label: &str) {
        self.record(HostCall::ButtonLabel(label.to_string()));
    }
}

impl InputSource for RecordingHost {
    fn subscribe(&mut self, phase: KeyPhase) -> Option<InputSubscription> {
        let mut state = self.state.borrow_mut();
        if !state.has_input {
            return None;
        }
        state.next_subscription += 1;
        let id = state.next_subscription;
        state.live_subscriptions.insert(id);
        Some(InputSubscription { id, phase })
    }

    fn release(&mut self, subscription: InputSubscription) {
        self.state.borrow_mut().live_subscriptions.remove(&subscription.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let host = RecordingHost::new();
        let mut stage: Box<dyn Stage> = Box::new(host.clone());

        stage.update_object();
        assert_eq!(host.calls(), vec![HostCall::UpdateObject]);
    }

    #[test]
    fn test_engine_pause_resume() {
        let host = RecordingHost::new();
        host.set_running(true);
        let mut engine = host.clone();

        engine.pause();
        assert!(!host.running());
        engine.resume();
        assert!(host.running());
    }

    #[test]
    fn test_input_subscriptions() {
        let mut host = RecordingHost::new();
        let down = host.subscribe(KeyPhase::Down).unwrap();
        let _up = host.subscribe(KeyPhase::Up).unwrap();
        assert_eq!(host.live_subscriptions(), 2);

        host.release(down);
        assert_eq!(host.live_subscriptions(), 1);

        host.set_has_input(false);
        assert!(host.subscribe(KeyPhase::Down).is_none());
    }
}
