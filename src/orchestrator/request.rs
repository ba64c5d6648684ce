use crate::context::ConversationContext;
use crate::entitlement::Feature;
use crate::suggestion::Suggestion;

/// Whether results replace or extend the displayed list
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    Fresh,
    /// "More suggestions": results are appended, `existing` is sent so the engine
    /// can avoid repeats
    More { existing: Vec<Suggestion> },
}

impl RequestKind {
    /// Entitlement feature gating this kind of request
    pub fn feature(&self) -> Feature {
        match self {
            RequestKind::Fresh => Feature::Suggestions,
            RequestKind::More { .. } => Feature::MoreSuggestions,
        }
    }

    pub fn is_append(&self) -> bool {
        matches!(self, RequestKind::More { .. })
    }
}

/// One analysis request, tagged with the generation it was issued under
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    pub source_text: String,
    pub context: ConversationContext,
    pub requested_count: usize,
    pub generation: u64,
    pub kind: RequestKind,
}
