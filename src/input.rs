//! Held-key tracking between host key events and the simulation step.
//!
//! Instead of acting on each key event, the tracker records the frame of the
//! last press/repeat for every key and the step reads a `HeldKeys` snapshot
//! once per tick.  That lets Space be held together with the arrows.
//!
//! Two classes of host are covered:
//! * hosts that report releases remove the key immediately;
//! * hosts that only report presses (OS key-repeat shows up as repeated
//!   presses) rely on the hold window: a key with no press for longer than
//!   `hold_window` frames counts as released.

use std::collections::HashMap;

use crossterm::event::KeyCode;

/// Where a key event originated.  Typing into a text field is not game input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTarget {
    Game,
    TextInput,
}

/// Per-tick view of the directional/action keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub climb: bool,
    pub attack: bool,
}

#[derive(Debug, Clone)]
pub struct InputTracker {
    last_seen: HashMap<KeyCode, u64>,
    frame: u64,
    hold_window: Option<u64>,
}

impl InputTracker {
    pub fn new(hold_window: Option<u64>) -> Self {
        Self {
            last_seen: HashMap::new(),
            frame: 0,
            hold_window,
        }
    }

    /// Record a press or key-repeat.
    pub fn press(&mut self, code: KeyCode, target: KeyTarget) {
        if target == KeyTarget::TextInput {
            return;
        }
        self.last_seen.insert(normalize(code), self.frame);
    }

    pub fn release(&mut self, code: KeyCode, target: KeyTarget) {
        if target == KeyTarget::TextInput {
            return;
        }
        self.last_seen.remove(&normalize(code));
    }

    pub fn advance_frame(&mut self) {
        self.frame += 1;
        if let Some(window) = self.hold_window {
            let frame = self.frame;
            self.last_seen
                .retain(|_, &mut last| frame.saturating_sub(last) <= window);
        }
    }

    pub fn is_held(&self, code: KeyCode) -> bool {
        let Some(&last) = self.last_seen.get(&normalize(code)) else {
            return false;
        };
        match self.hold_window {
            Some(window) => self.frame.saturating_sub(last) <= window,
            None => true,
        }
    }

    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            left: self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            right: self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            climb: self.is_held(KeyCode::Up) || self.is_held(KeyCode::Char('w')),
            attack: self.is_held(KeyCode::Char(' ')),
        }
    }

    /// Forget every held key, e.g. when the input listener is detached.
    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}

/// Shift state should not split a key into two entries.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
