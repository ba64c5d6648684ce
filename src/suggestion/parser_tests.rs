//! Tests for suggestion/parser

use super::*;

#[test]
fn test_parse_full_response() {
    let body = r#"{"suggestions": [
        {"text": "Tell me more!", "tone": "casual", "score": 8.0, "rationale": "Invites sharing"},
        {"text": "Sounds like a plan", "tone": "Playful"}
    ]}"#;

    let suggestions = parse_suggestions(body).unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].text, "Tell me more!");
    assert_eq!(suggestions[0].tone, Some(SuggestionTone::Casual));
    assert_eq!(suggestions[0].score, Some(8.0));
    assert_eq!(suggestions[0].rationale.as_deref(), Some("Invites sharing"));
    assert_eq!(suggestions[1].tone, Some(SuggestionTone::Playful));
    assert_eq!(suggestions[1].score, None);
}

#[test]
fn test_parse_accepts_legacy_field_names() {
    let body = r#"{"nextMessageSuggestions": [
        {"text": "Hi!", "engagementPrediction": 7.5, "reasoning": "Friendly"}
    ]}"#;

    let suggestions = parse_suggestions(body).unwrap();

    assert_eq!(suggestions[0].score, Some(7.5));
    assert_eq!(suggestions[0].rationale.as_deref(), Some("Friendly"));
}

#[test]
fn test_unknown_tone_becomes_none() {
    let body = r#"{"suggestions": [{"text": "ok", "tone": "sarcastic"}]}"#;
    let suggestions = parse_suggestions(body).unwrap();
    assert_eq!(suggestions[0].tone, None);
}

#[test]
fn test_blank_entries_are_skipped() {
    let body = r#"{"suggestions": [{"text": "   "}, {"text": " Nice "}]}"#;
    let suggestions = parse_suggestions(body).unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].text, "Nice");
}

#[test]
fn test_invalid_json_is_malformed() {
    let result = parse_suggestions("<html>502 Bad Gateway</html>");
    assert!(matches!(result, Err(EngineError::MalformedResponse(_))));
}

#[test]
fn test_empty_list_is_malformed() {
    let result = parse_suggestions(r#"{"suggestions": []}"#);
    assert!(matches!(result, Err(EngineError::MalformedResponse(_))));

    let result = parse_suggestions("{}");
    assert!(matches!(result, Err(EngineError::MalformedResponse(_))));
}
