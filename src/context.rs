//! Conversation context extraction
//!
//! Classifies the host application into a known dating platform and packages the
//! best-effort conversation context sent with each suggestion request.

use serde::Serialize;

/// Known messaging platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tinder,
    Bumble,
    Hinge,
    Match,
    Unknown,
}

/// Substring markers checked in order; first match wins
const PLATFORM_MARKERS: [(&str, Platform); 4] = [
    ("tinder", Platform::Tinder),
    ("bumble", Platform::Bumble),
    ("hinge", Platform::Hinge),
    ("match", Platform::Match),
];

/// At most this many prior messages are extracted from the field
const MAX_PRIOR_MESSAGES: usize = 5;

impl Platform {
    /// Classify a host app identifier by case-insensitive substring match
    pub fn classify(host_app_id: &str) -> Self {
        let id = host_app_id.to_lowercase();
        PLATFORM_MARKERS
            .iter()
            .find(|(marker, _)| id.contains(marker))
            .map(|(_, platform)| *platform)
            .unwrap_or(Platform::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Tinder => "tinder",
            Platform::Bumble => "bumble",
            Platform::Hinge => "hinge",
            Platform::Match => "match",
            Platform::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    /// No earlier messages are known; the user is writing an opener
    Opener,
    Reply,
}

/// Context sent with one analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    pub platform: Platform,
    pub host_app_id: String,
    pub conversation_type: ConversationType,
    pub prior_messages: Vec<String>,
}

impl ConversationContext {
    /// Attach prior messages, updating the conversation type to match
    pub fn with_prior_messages(mut self, prior_messages: Vec<String>) -> Self {
        self.conversation_type = if prior_messages.is_empty() {
            ConversationType::Opener
        } else {
            ConversationType::Reply
        };
        self.prior_messages = prior_messages;
        self
    }
}

/// Build the context descriptor for a host application
pub fn build_context(host_app_id: &str) -> ConversationContext {
    ConversationContext {
        platform: Platform::classify(host_app_id),
        host_app_id: host_app_id.to_string(),
        conversation_type: ConversationType::Opener,
        prior_messages: Vec::new(),
    }
}

/// Best-effort prior messages from the text before the cursor
///
/// Every complete line before the one being typed counts as a message. Usually this
/// is empty: chat fields rarely contain earlier messages.
pub fn extract_prior_messages(text_before_cursor: &str) -> Vec<String> {
    let mut lines: Vec<&str> = text_before_cursor.split('\n').collect();
    lines.pop();
    let messages: Vec<String> = lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    let skip = messages.len().saturating_sub(MAX_PRIOR_MESSAGES);
    messages.into_iter().skip(skip).collect()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod context_tests;
