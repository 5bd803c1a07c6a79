//! Key input for the frame loop.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

/// Non-blocking source of key presses, polled once per tick.
pub trait KeySource {
    /// Return the next pending key press, or `None` when there is none.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Reads key presses from the terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        // Drain pending events; resizes, mouse and key releases are skipped
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// Key presses scheduled by poll index, for driving the frame loop in tests.
///
/// Poll `n` (0-based) returns the key scheduled at `n`, if any.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    script: BTreeMap<u64, KeyEvent>,
    polls: u64,
}

impl ScriptedKeys {
    /// No keys at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a plain key press at poll `poll`.
    pub fn press_at(self, poll: u64, code: KeyCode) -> Self {
        self.event_at(poll, KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Schedule an arbitrary key event at poll `poll`.
    pub fn event_at(mut self, poll: u64, key: KeyEvent) -> Self {
        self.script.insert(poll, key);
        self
    }

    /// How many times the source was polled.
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let current = self.polls;
        self.polls += 1;
        Ok(self.script.remove(&current))
    }
}

/// True for keys that cancel a reveal: Escape, or Ctrl+C.
pub fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
