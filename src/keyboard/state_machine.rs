//! Key state machine
//!
//! Owns the session buffer, keyboard mode and shift state, and applies key events to
//! both the buffer and the host field so the two stay consistent.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::buffer::{CONTEXT_WINDOW_CHARS, TextBuffer};
use super::host::{FieldMetadata, HostField, SubmitAction};
use super::key_event::{KeyEvent, KeyOutcome};
use super::mode::{KeyboardMode, ShiftState};

/// Two shift taps closer together than this engage caps lock
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Host field and buffer disagree about the text before the cursor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("buffer out of sync with host field (buffer ends {buffer_tail:?}, host ends {host_tail:?})")]
pub struct DesyncError {
    pub buffer_tail: String,
    pub host_tail: String,
}

/// Keyboard state for one input session
#[derive(Debug, Clone)]
pub struct KeyStateMachine {
    buffer: TextBuffer,
    mode: KeyboardMode,
    shift: ShiftState,
    last_shift_tap: Option<Instant>,
    double_tap_window: Duration,
    submit_action: SubmitAction,
}

impl Default for KeyStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW)
    }
}

impl KeyStateMachine {
    pub fn new(double_tap_window: Duration) -> Self {
        Self {
            buffer: TextBuffer::new(),
            mode: KeyboardMode::Letters,
            shift: ShiftState::Off,
            last_shift_tap: None,
            double_tap_window,
            submit_action: SubmitAction::None,
        }
    }

    /// Reset for a new input session
    ///
    /// Numeric and phone fields force Numbers mode; the declared submit action decides
    /// what the enter/done key does for the rest of the session.
    pub fn start_session(&mut self, metadata: &FieldMetadata) {
        self.buffer.clear();
        self.shift = ShiftState::Off;
        self.last_shift_tap = None;
        self.mode = if metadata.input_class.prefers_numbers() {
            KeyboardMode::Numbers
        } else {
            KeyboardMode::Letters
        };
        self.submit_action = metadata.submit_action;
        log::debug!(
            "Key session started in {:?} mode (submit action {:?})",
            self.mode,
            self.submit_action
        );
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    pub fn shift(&self) -> ShiftState {
        self.shift
    }

    /// Apply a key event using the current time for double-tap detection
    pub fn apply(&mut self, event: KeyEvent, host: &mut dyn HostField) -> KeyOutcome {
        self.apply_at(event, host, Instant::now())
    }

    /// Apply a key event that happened at `now`
    pub fn apply_at(&mut self, event: KeyEvent, host: &mut dyn HostField, now: Instant) -> KeyOutcome {
        match event {
            KeyEvent::Character(c) => self.commit_character(c, host),
            KeyEvent::Space => {
                let outcome = self.commit(" ".to_string(), host);
                self.release_shift();
                outcome
            }
            KeyEvent::Delete => self.delete(host),
            KeyEvent::DeleteWord => self.delete_word(host),
            KeyEvent::Enter | KeyEvent::Done => self.submit(host),
            KeyEvent::Shift => {
                self.tap_shift(now);
                KeyOutcome::unchanged()
            }
            KeyEvent::ModeChange => {
                self.mode = self.mode.next();
                KeyOutcome::unchanged()
            }
            KeyEvent::SwitchMode(mode) => {
                self.mode = mode;
                KeyOutcome::unchanged()
            }
            KeyEvent::InsertText(text) => self.insert_text(&text, host),
            KeyEvent::Replace(text) => self.replace_current_word(&text, host),
        }
    }

    /// Check that the host's text before the cursor ends with the buffer
    pub fn verify_sync(&self, host: &dyn HostField) -> Result<(), DesyncError> {
        let host_text = host.text_before_cursor(CONTEXT_WINDOW_CHARS);
        if host_text.ends_with(self.buffer.as_str()) {
            return Ok(());
        }
        Err(DesyncError {
            buffer_tail: tail(self.buffer.as_str(), 16),
            host_tail: tail(&host_text, 16),
        })
    }

    /// Rebuild the buffer from the host's text before the cursor
    pub fn resync_from(&mut self, host: &dyn HostField) {
        self.buffer
            .replace_with(&host.text_before_cursor(CONTEXT_WINDOW_CHARS));
    }

    fn commit_character(&mut self, c: char, host: &mut dyn HostField) -> KeyOutcome {
        let resolved: String = if c.is_alphabetic() {
            if self.shift.is_upper() {
                c.to_uppercase().collect()
            } else {
                c.to_lowercase().collect()
            }
        } else {
            c.to_string()
        };
        let outcome = self.commit(resolved, host);
        self.release_shift();
        outcome
    }

    fn commit(&mut self, text: String, host: &mut dyn HostField) -> KeyOutcome {
        if host.selected_text().is_some() {
            host.commit_text(&text);
            self.resync_from(host);
            return KeyOutcome {
                committed_text: Some(text),
                ..KeyOutcome::resynced()
            };
        }
        host.commit_text(&text);
        self.buffer.push_str(&text);
        KeyOutcome::committed(text, 0)
    }

    /// Shift auto-releases after one committed character; caps lock persists
    fn release_shift(&mut self) {
        if self.shift == ShiftState::Shifted && self.mode == KeyboardMode::Letters {
            self.shift = ShiftState::Off;
        }
    }

    fn tap_shift(&mut self, now: Instant) {
        let double_tap = self
            .last_shift_tap
            .is_some_and(|last| now.saturating_duration_since(last) <= self.double_tap_window);
        self.shift = match self.shift {
            ShiftState::Off => ShiftState::Shifted,
            ShiftState::Shifted if double_tap => ShiftState::CapsLocked,
            ShiftState::Shifted | ShiftState::CapsLocked => ShiftState::Off,
        };
        self.last_shift_tap = Some(now);
    }

    fn delete(&mut self, host: &mut dyn HostField) -> KeyOutcome {
        if self.clear_selection(host) {
            return KeyOutcome::resynced();
        }
        host.delete_surrounding(1, 0);
        match self.buffer.pop() {
            Some(_) => KeyOutcome::removed(1),
            None => KeyOutcome::unchanged(),
        }
    }

    /// Delete the host selection, if any, and rebuild the buffer from the host
    fn clear_selection(&mut self, host: &mut dyn HostField) -> bool {
        if host.selected_text().is_none() {
            return false;
        }
        host.commit_text("");
        self.resync_from(host);
        true
    }

    /// With a selection active only the selection is removed
    fn delete_word(&mut self, host: &mut dyn HostField) -> KeyOutcome {
        if self.clear_selection(host) {
            return KeyOutcome::resynced();
        }
        let count = self.buffer.current_word_len();
        if count == 0 {
            return KeyOutcome::unchanged();
        }
        host.delete_surrounding(count, 0);
        self.buffer.delete_current_word();
        KeyOutcome::removed(count)
    }

    fn submit(&mut self, host: &mut dyn HostField) -> KeyOutcome {
        match self.submit_action {
            SubmitAction::None => self.commit("\n".to_string(), host),
            action => {
                host.perform_editor_action(action);
                KeyOutcome {
                    editor_action: Some(action),
                    ..KeyOutcome::unchanged()
                }
            }
        }
    }

    fn insert_text(&mut self, text: &str, host: &mut dyn HostField) -> KeyOutcome {
        if text.is_empty() {
            return KeyOutcome::unchanged();
        }
        self.commit(text.to_string(), host)
    }

    /// A selection is removed first; the word before it is then replaced
    fn replace_current_word(&mut self, text: &str, host: &mut dyn HostField) -> KeyOutcome {
        let resynced = self.clear_selection(host);
        let count = self.buffer.current_word_len();
        if count > 0 {
            host.delete_surrounding(count, 0);
            self.buffer.delete_current_word();
        }
        let inserted = format!("{} ", text);
        host.commit_text(&inserted);
        self.buffer.push_str(&inserted);
        if resynced {
            return KeyOutcome {
                committed_text: Some(inserted),
                ..KeyOutcome::resynced()
            };
        }
        KeyOutcome::committed(inserted, count)
    }
}

fn tail(text: &str, max_chars: usize) -> String {
    let skip = text.chars().count().saturating_sub(max_chars);
    text.chars().skip(skip).collect()
}

#[cfg(test)]
#[path = "state_machine_tests.rs"]
mod state_machine_tests;
