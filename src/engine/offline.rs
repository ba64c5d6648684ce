use futures::future::{self, BoxFuture, FutureExt};

use super::{CoachingEngine, EngineError};
use crate::context::ConversationContext;
use crate::suggestion::Suggestion;

/// Engine used when no coaching endpoint is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineEngine;

fn offline() -> EngineError {
    EngineError::Transport("no coaching endpoint configured".to_string())
}

impl CoachingEngine for OfflineEngine {
    fn generate<'a>(
        &'a self,
        _text: &'a str,
        _context: &'a ConversationContext,
        _count: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, EngineError>> {
        future::ready(Err(offline())).boxed()
    }

    fn generate_more<'a>(
        &'a self,
        _text: &'a str,
        _context: &'a ConversationContext,
        _existing: &'a [Suggestion],
        _count: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, EngineError>> {
        future::ready(Err(offline())).boxed()
    }
}
