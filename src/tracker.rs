//! Suggestion consumption tracking
//!
//! Accepting a suggestion replaces the current word, reports the acceptance and clears
//! the displayed list. Nothing here waits on analytics or entitlement calls.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

use crate::analytics::{AnalyticsSink, events};
use crate::entitlement::Feature;
use crate::keyboard::{HostField, KeyEvent, KeyOutcome, KeyStateMachine};
use crate::orchestrator::Orchestrator;
use crate::suggestion::Suggestion;

pub struct ConsumptionTracker {
    analytics: Arc<dyn AnalyticsSink>,
}

impl ConsumptionTracker {
    pub fn new(analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self { analytics }
    }

    /// Apply an accepted suggestion to the buffer and host field
    pub fn on_accept(
        &self,
        suggestion: &Suggestion,
        keys: &mut KeyStateMachine,
        host: &mut dyn HostField,
        orchestrator: &mut Orchestrator,
    ) -> KeyOutcome {
        self.on_accept_at(suggestion, keys, host, orchestrator, Utc::now())
    }

    /// Same as [`on_accept`](Self::on_accept) with an explicit acceptance time
    pub fn on_accept_at(
        &self,
        suggestion: &Suggestion,
        keys: &mut KeyStateMachine,
        host: &mut dyn HostField,
        orchestrator: &mut Orchestrator,
        accepted_at: DateTime<Utc>,
    ) -> KeyOutcome {
        let buffer_snapshot = keys.buffer().as_str().to_string();
        let outcome = keys.apply(KeyEvent::Replace(suggestion.text.clone()), host);

        self.analytics.track(
            events::SUGGESTION_USED,
            json!({
                "text": suggestion.text,
                "buffer_snapshot": buffer_snapshot,
                "platform": orchestrator.platform().as_str(),
                "tone": suggestion.tone.map(|tone| tone.as_str()),
                "accepted_at": accepted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            }),
        );
        orchestrator.track_usage(Feature::SuggestionUsed);

        orchestrator.clear_suggestions();
        orchestrator.invalidate();
        log::debug!("Accepted suggestion, generation now {}", orchestrator.current_generation());
        outcome
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tracker_tests;
