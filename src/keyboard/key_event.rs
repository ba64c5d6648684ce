use super::host::SubmitAction;
use super::mode::KeyboardMode;

/// Discrete key events accepted by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// A character key; letters are cased by the shift state
    Character(char),
    Delete,
    DeleteWord,
    Space,
    Enter,
    /// Done/dismiss key, same commit behaviour as enter
    Done,
    Shift,
    /// Cycle Letters → Symbols → Numbers → Letters
    ModeChange,
    /// Jump straight to a mode (dedicated layout keys)
    SwitchMode(KeyboardMode),
    /// Raw text insertion (paste, autocomplete text)
    InsertText(String),
    /// Replace the current word with the given text plus a trailing space
    Replace(String),
}

impl KeyEvent {
    /// Key kind for analytics; never includes typed text
    pub fn kind(&self) -> &'static str {
        match self {
            KeyEvent::Character(_) => "character",
            KeyEvent::Delete => "delete",
            KeyEvent::DeleteWord => "delete_word",
            KeyEvent::Space => "space",
            KeyEvent::Enter => "enter",
            KeyEvent::Done => "done",
            KeyEvent::Shift => "shift",
            KeyEvent::ModeChange => "mode_change",
            KeyEvent::SwitchMode(_) => "switch_mode",
            KeyEvent::InsertText(_) => "insert_text",
            KeyEvent::Replace(_) => "replace",
        }
    }
}

/// How the buffer changed in response to an event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BufferDelta {
    #[default]
    Unchanged,
    /// `removed` chars were dropped from the end, then `inserted` was appended
    Edit { removed: usize, inserted: String },
    /// Buffer was rebuilt from the host field
    Resynced,
}

/// Result of applying one key event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// Text committed to the host field, if any
    pub committed_text: Option<String>,
    pub delta: BufferDelta,
    /// Editor action performed instead of inserting a newline
    pub editor_action: Option<SubmitAction>,
}

impl KeyOutcome {
    pub(crate) fn unchanged() -> Self {
        Self::default()
    }

    pub(crate) fn committed(text: String, removed: usize) -> Self {
        Self {
            committed_text: Some(text.clone()),
            delta: BufferDelta::Edit {
                removed,
                inserted: text,
            },
            editor_action: None,
        }
    }

    pub(crate) fn removed(count: usize) -> Self {
        if count == 0 {
            return Self::unchanged();
        }
        Self {
            committed_text: None,
            delta: BufferDelta::Edit {
                removed: count,
                inserted: String::new(),
            },
            editor_action: None,
        }
    }

    pub(crate) fn resynced() -> Self {
        Self {
            delta: BufferDelta::Resynced,
            ..Self::default()
        }
    }

    /// Whether the buffer text changed
    pub fn text_changed(&self) -> bool {
        self.delta != BufferDelta::Unchanged
    }
}
