//! Held-key tracker for terminal environments.
//!
//! Movement needs "is this key down right now", but many terminals only report
//! presses (plus auto-repeat). When release events are unavailable a key is
//! considered held until `key_release_timeout_ms` passes without a press or
//! repeat for it.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{direction_for, Direction};
use crate::types::MoveInput;

// Hold time granted by one press or auto-repeat when releases are not reported.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks which movement keys are held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Timestamp (ms) of the last press/repeat per direction, `None` when released.
    held_since: [Option<u64>; 4],
    key_release_timeout_ms: u64,
    release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held_since: [None; 4],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Declare that the terminal reports key releases; disables the timeout.
    pub fn with_release_events(mut self, release_events: bool) -> Self {
        self.release_events = release_events;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event. Returns the direction it affected, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now_ms: u64) -> Option<Direction> {
        let direction = direction_for(key.code)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(direction, now_ms),
            KeyEventKind::Release => self.release(direction),
        }
        Some(direction)
    }

    pub fn press(&mut self, direction: Direction, now_ms: u64) {
        self.held_since[direction.index()] = Some(now_ms);
    }

    pub fn release(&mut self, direction: Direction) {
        self.held_since[direction.index()] = None;
    }

    pub fn is_held(&self, direction: Direction, now_ms: u64) -> bool {
        match self.held_since[direction.index()] {
            Some(at) => {
                self.release_events || now_ms.saturating_sub(at) <= self.key_release_timeout_ms
            }
            None => false,
        }
    }

    /// Movement state for the frame starting at `now_ms`.
    ///
    /// Keys whose timeout has lapsed are released here.
    pub fn state(&mut self, now_ms: u64) -> MoveInput {
        for direction in Direction::ALL {
            if !self.is_held(direction, now_ms) {
                self.release(direction);
            }
        }
        MoveInput {
            up: self.held_since[Direction::Up.index()].is_some(),
            down: self.held_since[Direction::Down.index()].is_some(),
            left: self.held_since[Direction::Left.index()].is_some(),
            right: self.held_since[Direction::Right.index()].is_some(),
        }
    }

    pub fn reset(&mut self) {
        self.held_since = [None; 4];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
