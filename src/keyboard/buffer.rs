//! Session text buffer
//!
//! Tracks the text typed since the input session began, independently of the host
//! field. Only the last [`CONTEXT_WINDOW_CHARS`] characters before the cursor are kept.

/// Maximum number of characters retained in the buffer
pub const CONTEXT_WINDOW_CHARS: usize = 1000;

/// Text typed in the current session, bounded to the context window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    /// Cached char count; `text.len()` is in bytes
    char_len: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`, truncated to the context window
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.push_str(text);
        buffer
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
        self.char_len += 1;
        self.enforce_window();
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.char_len += s.chars().count();
        self.enforce_window();
    }

    /// Remove the last character, if any. Deleting from an empty buffer is a no-op.
    pub fn pop(&mut self) -> Option<char> {
        let removed = self.text.pop();
        if removed.is_some() {
            self.char_len -= 1;
        }
        removed
    }

    /// Number of characters in the trailing run after the last space
    ///
    /// This is the "current word". It is empty when the buffer ends with a space.
    pub fn current_word_len(&self) -> usize {
        self.text[self.current_word_start()..].chars().count()
    }

    /// Remove the current word and return it
    pub fn delete_current_word(&mut self) -> String {
        let start = self.current_word_start();
        let removed = self.text.split_off(start);
        self.char_len -= removed.chars().count();
        removed
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Replace the whole content, e.g. when resynchronising from the host field
    pub fn replace_with(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.char_len = 0;
    }

    fn current_word_start(&self) -> usize {
        self.text.rfind(' ').map(|i| i + 1).unwrap_or(0)
    }

    fn enforce_window(&mut self) {
        if self.char_len <= CONTEXT_WINDOW_CHARS {
            return;
        }
        let excess = self.char_len - CONTEXT_WINDOW_CHARS;
        let cut = self
            .text
            .char_indices()
            .nth(excess)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        self.text.drain(..cut);
        self.char_len = CONTEXT_WINDOW_CHARS;
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod buffer_tests;
