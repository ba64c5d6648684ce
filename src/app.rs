//! Terminal host
//!
//! Plays the part of the host application: an in-memory text field, a suggestion bar and
//! a key map from terminal keys to keyboard events.

use crossterm::event::{KeyCode, KeyEvent as TermKey, KeyModifiers};

use keycoach::keyboard::{FieldMetadata, KeyEvent, MemoryField};
use keycoach::orchestrator::{SubmitOutcome, SuggestionEvent};
use keycoach::{CoachError, KeyboardSession};

mod render;

/// Number of suggestions reachable with Alt+1..5
pub const MAX_SELECTABLE: usize = 5;

/// What a terminal key asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Key(KeyEvent),
    Accept(usize),
    More,
    Dismiss,
    ToggleSuggestions,
    Quit,
}

/// Map a terminal key press to an app action
pub fn map_key(key: TermKey) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(c) if ctrl => match c {
            'w' => Some(Action::Key(KeyEvent::DeleteWord)),
            'n' => Some(Action::More),
            'd' => Some(Action::Dismiss),
            't' => Some(Action::ToggleSuggestions),
            _ => None,
        },
        KeyCode::Char(c) if alt => c
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|d| (1..=MAX_SELECTABLE).contains(d))
            .map(|d| Action::Accept(d - 1)),
        KeyCode::Char(' ') => Some(Action::Key(KeyEvent::Space)),
        // Terminal shift already produced the upper-case letter
        KeyCode::Char(c) if c.is_uppercase() => Some(Action::Key(KeyEvent::InsertText(c.to_string()))),
        KeyCode::Char(c) => Some(Action::Key(KeyEvent::Character(c))),
        KeyCode::Backspace => Some(Action::Key(KeyEvent::Delete)),
        KeyCode::Enter => Some(Action::Key(KeyEvent::Enter)),
        KeyCode::Tab => Some(Action::Key(KeyEvent::Shift)),
        KeyCode::F(2) => Some(Action::Key(KeyEvent::ModeChange)),
        _ => None,
    }
}

pub struct App {
    session: KeyboardSession,
    host: MemoryField,
    host_app_id: String,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    /// Create the app and start an input session for `host_app_id`
    pub fn new(
        mut session: KeyboardSession,
        metadata: FieldMetadata,
        host_app_id: &str,
    ) -> Result<Self, CoachError> {
        let host = MemoryField::new(metadata);
        session.start_session(&host, host_app_id)?;
        Ok(Self {
            session,
            host,
            host_app_id: host_app_id.to_string(),
            status: None,
            should_quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn session(&self) -> &KeyboardSession {
        &self.session
    }

    pub fn host(&self) -> &MemoryField {
        &self.host
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_key_event(&mut self, key: TermKey) {
        let Some(action) = map_key(key) else {
            return;
        };

        match action {
            Action::Key(event) => {
                self.session.handle_key(event, &mut self.host);
            }
            Action::Accept(index) => {
                if self.session.accept_suggestion(index, &mut self.host).is_none() {
                    self.status = Some(format!("No suggestion {}", index + 1));
                }
            }
            Action::More => {
                self.status = match self.session.request_more(&self.host) {
                    Some(SubmitOutcome::Submitted { .. }) => None,
                    Some(SubmitOutcome::InFlight) => Some("Still thinking...".to_string()),
                    Some(SubmitOutcome::WorkerUnavailable) => {
                        Some("Suggestion service unavailable".to_string())
                    }
                    None => Some("Suggestions are off (Ctrl+T)".to_string()),
                };
            }
            Action::Dismiss => {
                self.session.dismiss_suggestions();
                self.status = None;
            }
            Action::ToggleSuggestions => {
                let enabled = !self.session.suggestions_enabled();
                self.session.set_suggestions_enabled(enabled);
                self.status = Some(if enabled {
                    "Suggestions on".to_string()
                } else {
                    "Suggestions off".to_string()
                });
            }
            Action::Quit => {
                self.session.end_session();
                self.should_quit = true;
            }
        }
    }

    /// Drive the session's timers and turn outcomes into a status line
    pub fn tick(&mut self) {
        for event in self.session.tick(&self.host) {
            match event {
                SuggestionEvent::Delivered { .. } => self.status = None,
                SuggestionEvent::Failed {
                    fallback_shown: true,
                    ..
                } => self.status = Some("Coach unreachable, showing starters".to_string()),
                SuggestionEvent::Failed { error, .. } => {
                    self.status = Some(format!("Couldn't load more: {}", error));
                }
                SuggestionEvent::UpgradeRequired { .. } | SuggestionEvent::Discarded { .. } => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
