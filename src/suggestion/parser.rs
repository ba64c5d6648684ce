//! Coaching engine response parsing
//!
//! Parses the JSON body returned by the coaching service:
//! ```text
//! {"suggestions": [
//!   {"text": "Tell me more!", "tone": "casual", "score": 8.0, "rationale": "..."}
//! ]}
//! ```
//! Entries without usable text are skipped. A body that does not decode, or that
//! contains no usable entries, is a malformed response.

use serde::Deserialize;

use crate::engine::EngineError;
use crate::suggestion::{Suggestion, SuggestionTone};

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default, alias = "nextMessageSuggestions")]
    suggestions: Vec<WireSuggestion>,
}

#[derive(Debug, Deserialize)]
struct WireSuggestion {
    #[serde(default)]
    text: String,
    #[serde(default)]
    tone: Option<String>,
    #[serde(default, alias = "engagementPrediction")]
    score: Option<f64>,
    #[serde(default, alias = "reasoning")]
    rationale: Option<String>,
}

impl WireSuggestion {
    fn into_suggestion(self) -> Option<Suggestion> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Suggestion {
            text: text.to_string(),
            tone: self.tone.as_deref().and_then(SuggestionTone::parse_tone),
            score: self.score.filter(|s| s.is_finite()),
            rationale: self.rationale.filter(|r| !r.trim().is_empty()),
        })
    }
}

/// Parse suggestions from a coaching engine response body
pub fn parse_suggestions(body: &str) -> Result<Vec<Suggestion>, EngineError> {
    let response: WireResponse = serde_json::from_str(body)
        .map_err(|e| EngineError::MalformedResponse(e.to_string()))?;

    let suggestions: Vec<Suggestion> = response
        .suggestions
        .into_iter()
        .filter_map(WireSuggestion::into_suggestion)
        .collect();

    if suggestions.is_empty() {
        return Err(EngineError::MalformedResponse(
            "response contained no usable suggestions".to_string(),
        ));
    }
    Ok(suggestions)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
