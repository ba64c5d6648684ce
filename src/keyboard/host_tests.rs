//! Tests for keyboard/host

use super::*;

fn field(text: &str) -> MemoryField {
    MemoryField::with_text(text, FieldMetadata::default())
}

#[test]
fn test_text_before_cursor_is_bounded() {
    let field = field("hello world");
    assert_eq!(field.text_before_cursor(5), "world");
    assert_eq!(field.text_before_cursor(100), "hello world");
    assert_eq!(field.text_after_cursor(10), "");
}

#[test]
fn test_text_after_cursor() {
    let mut field = field("hello world");
    field.set_cursor(5);
    assert_eq!(field.text_before_cursor(100), "hello");
    assert_eq!(field.text_after_cursor(3), " wo");
}

#[test]
fn test_commit_inserts_at_cursor() {
    let mut field = field("ac");
    field.set_cursor(1);
    field.commit_text("b");
    assert_eq!(field.text(), "abc");
    assert_eq!(field.cursor_chars(), 2);
}

#[test]
fn test_commit_replaces_selection() {
    let mut field = field("hello world");
    field.select(6, 11);
    assert_eq!(field.selected_text().as_deref(), Some("world"));
    field.commit_text("there");
    assert_eq!(field.text(), "hello there");
    assert_eq!(field.selected_text(), None);
}

#[test]
fn test_empty_selection_is_ignored() {
    let mut field = field("hello");
    field.select(2, 2);
    assert_eq!(field.selected_text(), None);
}

#[test]
fn test_delete_surrounding_before() {
    let mut field = field("hey how ar");
    field.delete_surrounding(2, 0);
    assert_eq!(field.text(), "hey how ");
    assert_eq!(field.cursor_chars(), 8);
}

#[test]
fn test_delete_surrounding_clamps_at_start() {
    let mut field = field("ab");
    field.delete_surrounding(10, 0);
    assert_eq!(field.text(), "");
    field.delete_surrounding(1, 0);
    assert_eq!(field.text(), "");
}

#[test]
fn test_delete_surrounding_after() {
    let mut field = field("abcdef");
    field.set_cursor(3);
    field.delete_surrounding(1, 2);
    assert_eq!(field.text(), "abf");
    assert_eq!(field.cursor_chars(), 2);
}

#[test]
fn test_delete_surrounding_multibyte() {
    let mut field = field("naïve café");
    field.delete_surrounding(4, 0);
    assert_eq!(field.text(), "naïve ");
}

#[test]
fn test_editor_actions_are_recorded() {
    let mut field = field("");
    field.perform_editor_action(SubmitAction::Send);
    assert_eq!(field.performed_actions(), &[SubmitAction::Send]);
}

#[test]
fn test_input_class_prefers_numbers() {
    assert!(InputClass::Number.prefers_numbers());
    assert!(InputClass::Phone.prefers_numbers());
    assert!(!InputClass::Text.prefers_numbers());
}
