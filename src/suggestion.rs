//! Suggestion types and the local fallback set

pub mod parser;

use serde::Serialize;

pub use parser::parse_suggestions;

/// Tone tag attached to a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionTone {
    Casual,
    Enthusiastic,
    Flirty,
    Thoughtful,
    Playful,
}

impl SuggestionTone {
    /// Parse a tone name, case-insensitively
    pub fn parse_tone(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "casual" => Some(SuggestionTone::Casual),
            "enthusiastic" => Some(SuggestionTone::Enthusiastic),
            "flirty" => Some(SuggestionTone::Flirty),
            "thoughtful" => Some(SuggestionTone::Thoughtful),
            "playful" => Some(SuggestionTone::Playful),
            _ => None,
        }
    }

    /// Display label for the suggestion bar
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionTone::Casual => "Casual",
            SuggestionTone::Enthusiastic => "Enthusiastic",
            SuggestionTone::Flirty => "Flirty",
            SuggestionTone::Thoughtful => "Thoughtful",
            SuggestionTone::Playful => "Playful",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionTone::Casual => "casual",
            SuggestionTone::Enthusiastic => "enthusiastic",
            SuggestionTone::Flirty => "flirty",
            SuggestionTone::Thoughtful => "thoughtful",
            SuggestionTone::Playful => "playful",
        }
    }
}

/// A single reply suggestion
///
/// Produced by the coaching engine or the fallback generator and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub text: String,
    pub tone: Option<SuggestionTone>,
    /// Predicted engagement score
    pub score: Option<f64>,
    pub rationale: Option<String>,
}

impl Suggestion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
            score: None,
            rationale: None,
        }
    }

    pub fn with_tone(mut self, tone: SuggestionTone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

/// Generic suggestions shown when the coaching engine fails
pub fn fallback_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion::new("That sounds interesting! Tell me more.")
            .with_tone(SuggestionTone::Casual)
            .with_score(8.0)
            .with_rationale("Shows interest and encourages continuation"),
        Suggestion::new("I'd love to hear about that!")
            .with_tone(SuggestionTone::Enthusiastic)
            .with_score(7.5)
            .with_rationale("Enthusiastic response that invites sharing"),
        Suggestion::new("What's your favorite part about it?")
            .with_tone(SuggestionTone::Thoughtful)
            .with_score(8.5)
            .with_rationale("Thoughtful question that shows genuine interest"),
    ]
}
