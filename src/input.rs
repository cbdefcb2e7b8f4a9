/// Keyboard → intent mapping for the terminal host.
///
/// Instead of acting on each key event, the tracker records the frame of
/// the last press/repeat per key.  A key counts as held while it was seen
/// within `HOLD_WINDOW` frames, which covers terminals that never send
/// release events: the OS key-repeat keeps refreshing it.  Terminals with
/// keyboard enhancement send proper releases and drop the key at once.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::{Intent, Intents};

pub const HOLD_WINDOW: u64 = 4;

/// One-shot host commands that are not simulation intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    ToggleDebug,
    Fullscreen,
    Quit,
}

fn intent_for(code: &KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Left => Some(Intent::Left),
        KeyCode::Right => Some(Intent::Right),
        KeyCode::Up => Some(Intent::Up),
        KeyCode::Down => Some(Intent::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Roll),
        _ => None,
    }
}

pub fn command_for(code: &KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Start),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::ToggleDebug),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::Fullscreen),
        _ => None,
    }
}

#[derive(Clone, Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event seen during `frame`.  Presses of command keys are
    /// returned to the caller; everything else only updates held state.
    pub fn handle(&mut self, event: &KeyEvent, frame: u64) -> Option<Command> {
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(event.code, frame);
                command_for(&event.code, event.modifiers)
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(event.code, frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&event.code);
                None
            }
        }
    }

    pub fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Snapshot of the intents whose keys are still live at `frame`.
    pub fn intents(&self, frame: u64) -> Intents {
        self.key_frame
            .keys()
            .filter(|key| self.is_held(key, frame))
            .filter_map(intent_for)
            .collect()
    }

    /// Forget keys that expired long ago so the map stays small.
    pub fn expire(&mut self, frame: u64) {
        self.key_frame
            .retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
    }
}
