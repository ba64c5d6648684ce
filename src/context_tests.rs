//! Tests for context

use super::*;

#[test]
fn test_classify_known_bundle_ids() {
    assert_eq!(Platform::classify("com.cardify.tinder"), Platform::Tinder);
    assert_eq!(Platform::classify("com.bumble.app"), Platform::Bumble);
    assert_eq!(Platform::classify("co.hinge.app"), Platform::Hinge);
    assert_eq!(Platform::classify("com.match.match"), Platform::Match);
}

#[test]
fn test_classify_is_case_insensitive() {
    assert_eq!(Platform::classify("com.Tinder.Android"), Platform::Tinder);
    assert_eq!(Platform::classify("BUMBLE"), Platform::Bumble);
}

#[test]
fn test_classify_unknown() {
    assert_eq!(Platform::classify("com.okcupid.okcupid"), Platform::Unknown);
    assert_eq!(Platform::classify(""), Platform::Unknown);
}

#[test]
fn test_build_context_defaults() {
    let context = build_context("com.bumble.app");
    assert_eq!(context.platform, Platform::Bumble);
    assert_eq!(context.host_app_id, "com.bumble.app");
    assert_eq!(context.conversation_type, ConversationType::Opener);
    assert!(context.prior_messages.is_empty());
}

#[test]
fn test_with_prior_messages_sets_reply() {
    let context =
        build_context("co.hinge.app").with_prior_messages(vec!["hey there".to_string()]);
    assert_eq!(context.conversation_type, ConversationType::Reply);
    assert_eq!(context.prior_messages, vec!["hey there"]);
}

#[test]
fn test_extract_prior_messages_single_line_is_empty() {
    assert!(extract_prior_messages("just typing").is_empty());
    assert!(extract_prior_messages("").is_empty());
}

#[test]
fn test_extract_prior_messages_skips_current_line() {
    let messages = extract_prior_messages("hi!\n\n  how was the hike?\nit was gre");
    assert_eq!(messages, vec!["hi!", "how was the hike?"]);
}

#[test]
fn test_extract_prior_messages_keeps_most_recent() {
    let text = (1..=8)
        .map(|i| format!("message {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    let messages = extract_prior_messages(&format!("{}\ndraft", text));
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0], "message 4");
    assert_eq!(messages[4], "message 8");
}
