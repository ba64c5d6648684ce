//! Analytics/observability sink
//!
//! Events are fire-and-forget: sinks must return immediately and never fail the caller.

use serde_json::Value;

/// Event names reported by the core
pub mod events {
    pub const SESSION_START: &str = "session_start";
    pub const SESSION_END: &str = "session_end";
    pub const KEY_PRESS: &str = "key_press";
    pub const SUGGESTION_GENERATED: &str = "suggestion_generated";
    pub const SUGGESTION_USED: &str = "suggestion_used";
    pub const SUGGESTION_ERROR: &str = "suggestion_error";
    pub const UPGRADE_REQUESTED: &str = "upgrade_requested";
}

pub trait AnalyticsSink: Send + Sync {
    /// Record `event` with a JSON object of params
    fn track(&self, event: &str, params: Value);
}

/// Sink that writes every event to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn track(&self, event: &str, params: Value) {
        log::info!(target: "keycoach::analytics", "{} {}", event, params);
    }
}
