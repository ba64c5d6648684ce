//! Host input field abstraction
//!
//! The host field is the authoritative text store. The keyboard only sees bounded
//! cursor-relative windows of it and edits it through a few primitive operations.

/// Input-type class declared by the host field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputClass {
    #[default]
    Text,
    Number,
    Phone,
}

impl InputClass {
    /// Whether the field should open in Numbers mode
    pub fn prefers_numbers(self) -> bool {
        matches!(self, InputClass::Number | InputClass::Phone)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputClass::Text => "text",
            InputClass::Number => "number",
            InputClass::Phone => "phone",
        }
    }
}

/// Submit action declared by the host field for the enter/done key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitAction {
    /// No specific action; enter inserts a newline
    #[default]
    None,
    Send,
    Search,
    Go,
}

/// Host field metadata, read once at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldMetadata {
    pub input_class: InputClass,
    pub submit_action: SubmitAction,
}

/// Editable field owned by the host application
pub trait HostField {
    /// Up to `max_chars` characters immediately before the cursor
    fn text_before_cursor(&self, max_chars: usize) -> String;

    /// Up to `max_chars` characters immediately after the cursor
    fn text_after_cursor(&self, max_chars: usize) -> String;

    /// Currently selected text, if a non-empty selection exists
    fn selected_text(&self) -> Option<String>;

    /// Insert `text` at the cursor, replacing the selection if there is one
    fn commit_text(&mut self, text: &str);

    /// Delete `before` characters before and `after` characters after the cursor
    fn delete_surrounding(&mut self, before: usize, after: usize);

    fn perform_editor_action(&mut self, action: SubmitAction);

    fn metadata(&self) -> FieldMetadata;
}

/// In-memory host field
///
/// Used by the terminal host and by tests. Cursor and selection are byte offsets that
/// always sit on char boundaries.
#[derive(Debug, Clone, Default)]
pub struct MemoryField {
    text: String,
    cursor: usize,
    selection: Option<(usize, usize)>,
    metadata: FieldMetadata,
    performed_actions: Vec<SubmitAction>,
}

impl MemoryField {
    pub fn new(metadata: FieldMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Create a field pre-filled with `text`, cursor at the end
    pub fn with_text(text: &str, metadata: FieldMetadata) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
            metadata,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters
    pub fn cursor_chars(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// Select the character range `start..end` (clamped to the text)
    pub fn select(&mut self, start: usize, end: usize) {
        let start = self.byte_offset(start);
        let end = self.byte_offset(end);
        if start < end {
            self.selection = Some((start, end));
            self.cursor = end;
        } else {
            self.selection = None;
        }
    }

    /// Move the cursor to a character position, clearing any selection
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = self.byte_offset(position);
        self.selection = None;
    }

    /// Editor actions performed so far, oldest first
    pub fn performed_actions(&self) -> &[SubmitAction] {
        &self.performed_actions
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.selection = None;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl HostField for MemoryField {
    fn text_before_cursor(&self, max_chars: usize) -> String {
        let before = &self.text[..self.cursor];
        let skip = before.chars().count().saturating_sub(max_chars);
        before.chars().skip(skip).collect()
    }

    fn text_after_cursor(&self, max_chars: usize) -> String {
        self.text[self.cursor..].chars().take(max_chars).collect()
    }

    fn selected_text(&self) -> Option<String> {
        self.selection
            .map(|(start, end)| self.text[start..end].to_string())
    }

    fn commit_text(&mut self, text: &str) {
        let (start, end) = self.selection.take().unwrap_or((self.cursor, self.cursor));
        self.text.replace_range(start..end, text);
        self.cursor = start + text.len();
    }

    fn delete_surrounding(&mut self, before: usize, after: usize) {
        self.selection = None;
        let start = if before == 0 {
            self.cursor
        } else {
            self.text[..self.cursor]
                .char_indices()
                .rev()
                .take(before)
                .last()
                .map(|(i, _)| i)
                .unwrap_or(self.cursor)
        };
        let end = self.text[self.cursor..]
            .char_indices()
            .nth(after)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len());
        self.text.drain(start..end);
        self.cursor = start;
    }

    fn perform_editor_action(&mut self, action: SubmitAction) {
        self.performed_actions.push(action);
    }

    fn metadata(&self) -> FieldMetadata {
        self.metadata
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod host_tests;
