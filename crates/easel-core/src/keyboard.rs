//! Keyboard scope: the editor's key subscriptions, live only while the
//! program is stopped.

use crate::host::InputSource;
use serde::{Deserialize, Serialize};

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    pub fn phase(&self) -> KeyPhase {
        match self {
            KeyEvent::Pressed(_) => KeyPhase::Down,
            KeyEvent::Released(_) => KeyPhase::Up,
        }
    }
}

/// Which half of a key stroke a subscription listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Down,
    Up,
}

/// Handle to a live subscription on an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputSubscription {
    pub id: u64,
    pub phase: KeyPhase,
}

/// Owns the editor's key-down/key-up subscriptions.
#[derive(Debug, Default)]
pub struct KeyboardScope {
    subscriptions: Vec<InputSubscription>,
}

impl KeyboardScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to key-down and key-up, dropping any previous subscriptions
    /// first. Channels the source does not offer are skipped.
    pub fn attach(&mut self, source: &mut dyn InputSource) {
        self.detach(source);

        for phase in [KeyPhase::Down, KeyPhase::Up] {
            if let Some(subscription) = source.subscribe(phase) {
                self.subscriptions.push(subscription);
            }
        }
        log::debug!("Keyboard attached ({} subscriptions)", self.subscriptions.len());
    }

    /// Release every subscription. Safe to call repeatedly.
    pub fn detach(&mut self, source: &mut dyn InputSource) {
        if self.subscriptions.is_empty() {
            return;
        }
        while let Some(subscription) = self.subscriptions.pop() {
            source.release(subscription);
        }
        log::debug!("Keyboard detached");
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Check if a key event has a live subscription.
    pub fn accepts(&self, event: &KeyEvent) -> bool {
        let phase = event.phase();
        self.subscriptions.iter().any(|s| s.phase == phase)
    }
}
