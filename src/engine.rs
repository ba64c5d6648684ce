//! Coaching engine abstraction
//!
//! Defines the CoachingEngine trait, EngineError types, and factory for creating an
//! engine from configuration.

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::context::ConversationContext;
use crate::error::CoachError;
use crate::suggestion::Suggestion;

mod http;
mod offline;

pub use http::HttpCoachingEngine;
pub use offline::OfflineEngine;

/// Errors that can occur while generating suggestions
///
/// All variants collapse to "suggestion generation failed" and are recovered by
/// showing the fallback set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Network error or non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    /// Response body could not be turned into suggestions
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl EngineError {
    /// Stable name used in analytics params
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Transport(_) => "transport",
            EngineError::Timeout => "timeout",
            EngineError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Remote service producing reply suggestions
///
/// Timeouts are the engine's responsibility and surface as [`EngineError::Timeout`].
pub trait CoachingEngine: Send + Sync {
    fn generate<'a>(
        &'a self,
        text: &'a str,
        context: &'a ConversationContext,
        count: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, EngineError>>;

    /// Generate suggestions different from `existing`
    fn generate_more<'a>(
        &'a self,
        text: &'a str,
        context: &'a ConversationContext,
        existing: &'a [Suggestion],
        count: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, EngineError>>;
}

/// Create a coaching engine from configuration
///
/// Without a configured endpoint the offline engine is used, which always fails so the
/// fallback suggestions are shown.
pub fn engine_from_config(config: &EngineConfig) -> Result<Arc<dyn CoachingEngine>, CoachError> {
    let endpoint = config
        .endpoint
        .as_ref()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty());

    match endpoint {
        Some(endpoint) => {
            let api_key = config
                .api_key
                .as_ref()
                .filter(|k| !k.trim().is_empty())
                .cloned();
            let engine = HttpCoachingEngine::new(endpoint, api_key, config.timeout())?;
            Ok(Arc::new(engine))
        }
        None => {
            log::info!("No coaching endpoint configured, using offline engine");
            Ok(Arc::new(OfflineEngine))
        }
    }
}
