//! Tests for keyboard/buffer

use super::*;
use proptest::prelude::*;

#[test]
fn test_new_buffer_is_empty() {
    let buffer = TextBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.as_str(), "");
}

#[test]
fn test_pop_on_empty_buffer_is_noop() {
    let mut buffer = TextBuffer::new();
    assert_eq!(buffer.pop(), None);
    assert_eq!(buffer.len(), 0);
}

#[test]
fn test_pop_counts_chars_not_bytes() {
    let mut buffer = TextBuffer::from_text("café");
    assert_eq!(buffer.len(), 4);
    assert_eq!(buffer.pop(), Some('é'));
    assert_eq!(buffer.as_str(), "caf");
    assert_eq!(buffer.len(), 3);
}

#[test]
fn test_delete_current_word() {
    let mut buffer = TextBuffer::from_text("hey how ar");
    assert_eq!(buffer.current_word_len(), 2);
    assert_eq!(buffer.delete_current_word(), "ar");
    assert_eq!(buffer.as_str(), "hey how ");
    assert_eq!(buffer.len(), 8);
}

#[test]
fn test_delete_current_word_without_space_clears_buffer() {
    let mut buffer = TextBuffer::from_text("hello");
    assert_eq!(buffer.delete_current_word(), "hello");
    assert!(buffer.is_empty());
}

#[test]
fn test_delete_current_word_after_trailing_space_removes_nothing() {
    let mut buffer = TextBuffer::from_text("hey how ");
    assert_eq!(buffer.current_word_len(), 0);
    assert_eq!(buffer.delete_current_word(), "");
    assert_eq!(buffer.as_str(), "hey how ");
}

#[test]
fn test_word_count_ignores_extra_whitespace() {
    let buffer = TextBuffer::from_text("  so   what\nnow ");
    assert_eq!(buffer.word_count(), 3);
}

#[test]
fn test_window_keeps_most_recent_chars() {
    let long = "a".repeat(CONTEXT_WINDOW_CHARS) + "xyz";
    let buffer = TextBuffer::from_text(&long);
    assert_eq!(buffer.len(), CONTEXT_WINDOW_CHARS);
    assert!(buffer.as_str().ends_with("axyz"));
}

#[test]
fn test_replace_with_resets_content() {
    let mut buffer = TextBuffer::from_text("old text");
    buffer.replace_with("new");
    assert_eq!(buffer.as_str(), "new");
    assert_eq!(buffer.len(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The cached length always matches the content and never exceeds the window
    #[test]
    fn prop_len_tracks_content(chunks in prop::collection::vec("[a-zé ]{0,300}", 0..12), pops in 0usize..50) {
        let mut buffer = TextBuffer::new();
        for chunk in &chunks {
            buffer.push_str(chunk);
        }
        for _ in 0..pops {
            buffer.pop();
        }
        prop_assert_eq!(buffer.len(), buffer.as_str().chars().count());
        prop_assert!(buffer.len() <= CONTEXT_WINDOW_CHARS);
    }

    // Delete-word removes exactly the run after the last space, or everything
    #[test]
    fn prop_delete_word_removes_trailing_run(text in "[a-z ]{0,60}") {
        let mut buffer = TextBuffer::from_text(&text);
        let removed = buffer.delete_current_word();

        let expected_kept = match text.rfind(' ') {
            Some(i) => &text[..=i],
            None => "",
        };
        prop_assert_eq!(buffer.as_str(), expected_kept);
        prop_assert!(!removed.contains(' '));
        prop_assert_eq!(format!("{}{}", buffer.as_str(), removed), text);
    }
}
