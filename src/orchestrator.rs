//! Suggestion orchestrator
//!
//! Owns the displayed suggestion list and the single in-flight request. All state here
//! is mutated on the UI thread only; the [`SuggestionWorker`] does the async work and
//! hands outcomes back through [`Orchestrator::poll_responses`].
//!
//! Cancellation is cooperative. Every request carries the generation it was issued
//! under, and [`Orchestrator::invalidate`] bumps the generation so late outcomes are
//! dropped. The in-flight flag stays set until the outstanding request resolves, even
//! after invalidation, so two engine calls never overlap.

mod request;
mod worker;

use std::sync::Arc;

use serde_json::json;

use crate::analytics::{AnalyticsSink, events};
use crate::context::{ConversationContext, Platform};
use crate::engine::EngineError;
use crate::entitlement::{AccessDecision, Feature};
use crate::suggestion::{Suggestion, fallback_suggestions};

pub use request::{RequestKind, SuggestionRequest};
pub use worker::{SuggestionWorker, WorkerRequest, WorkerResponse};

/// Result of asking the orchestrator to start a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { generation: u64 },
    /// Another request is still in flight; nothing was sent
    InFlight,
    /// No session worker is running
    WorkerUnavailable,
}

/// UI-facing result of applying one worker outcome
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionEvent {
    Delivered { count: usize, appended: bool },
    /// Engine failed; `fallback_shown` is false when a "more" request failed and the
    /// existing list was kept
    Failed {
        error: EngineError,
        fallback_shown: bool,
    },
    UpgradeRequired { prompt: String },
    /// Outcome belonged to a superseded generation
    Discarded { generation: u64 },
}

const DEFAULT_UPGRADE_PROMPT: &str = "Upgrade to keep getting suggestions.";

pub struct Orchestrator {
    worker: Option<SuggestionWorker>,
    analytics: Arc<dyn AnalyticsSink>,
    generation: u64,
    in_flight_generation: Option<u64>,
    suggestions: Vec<Suggestion>,
    upgrade_prompt: Option<String>,
    last_error: Option<EngineError>,
    platform: Platform,
}

impl Orchestrator {
    pub fn new(analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            worker: None,
            analytics,
            generation: 0,
            in_flight_generation: None,
            suggestions: Vec::new(),
            upgrade_prompt: None,
            last_error: None,
            platform: Platform::Unknown,
        }
    }

    /// Attach the worker for a new session and reset all request state
    pub fn begin_session(&mut self, worker: SuggestionWorker) {
        self.worker = Some(worker);
        self.generation = 0;
        self.in_flight_generation = None;
        self.suggestions.clear();
        self.upgrade_prompt = None;
        self.last_error = None;
        self.platform = Platform::Unknown;
    }

    /// Drop the session worker, abandoning anything still running
    pub fn end_session(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.shutdown();
        }
        self.invalidate();
        self.in_flight_generation = None;
        self.suggestions.clear();
        self.upgrade_prompt = None;
    }

    pub fn has_worker(&self) -> bool {
        self.worker.is_some()
    }

    /// Start a fresh request whose results replace the displayed list
    pub fn request_suggestions(
        &mut self,
        source_text: &str,
        context: ConversationContext,
        count: usize,
    ) -> SubmitOutcome {
        self.submit(source_text, context, count, RequestKind::Fresh)
    }

    /// Ask for suggestions beyond the displayed ones; results are appended
    pub fn request_more(
        &mut self,
        source_text: &str,
        context: ConversationContext,
        count: usize,
    ) -> SubmitOutcome {
        let existing = self.suggestions.clone();
        self.submit(source_text, context, count, RequestKind::More { existing })
    }

    fn submit(
        &mut self,
        source_text: &str,
        context: ConversationContext,
        count: usize,
        kind: RequestKind,
    ) -> SubmitOutcome {
        if let Some(in_flight) = self.in_flight_generation {
            log::debug!("Request suppressed, generation {} still in flight", in_flight);
            return SubmitOutcome::InFlight;
        }
        let Some(worker) = &self.worker else {
            log::debug!("Request dropped, no session worker");
            return SubmitOutcome::WorkerUnavailable;
        };

        let generation = self.generation.wrapping_add(1);
        self.platform = context.platform;
        let request = SuggestionRequest {
            source_text: source_text.to_string(),
            context,
            requested_count: count,
            generation,
            kind,
        };

        if !worker.send(WorkerRequest::Suggest(request)) {
            log::error!("Suggestion worker stopped, dropping generation {}", generation);
            return SubmitOutcome::WorkerUnavailable;
        }

        self.generation = generation;
        self.in_flight_generation = Some(generation);
        self.upgrade_prompt = None;
        self.last_error = None;
        log::debug!("Submitted suggestion request, generation {}", generation);
        SubmitOutcome::Submitted { generation }
    }

    /// Apply every outcome the worker has finished. Never blocks.
    pub fn poll_responses(&mut self) -> Vec<SuggestionEvent> {
        let mut responses = Vec::new();
        if let Some(worker) = &self.worker {
            while let Some(response) = worker.try_recv() {
                responses.push(response);
            }
        }
        responses
            .into_iter()
            .map(|response| self.apply_response(response))
            .collect()
    }

    /// Resolve one worker outcome against the current generation
    pub fn apply_response(&mut self, response: WorkerResponse) -> SuggestionEvent {
        let generation = response.generation();
        if self.in_flight_generation == Some(generation) {
            self.in_flight_generation = None;
        }
        if generation != self.generation {
            log::debug!(
                "Discarding stale outcome for generation {} (current {})",
                generation,
                self.generation
            );
            return SuggestionEvent::Discarded { generation };
        }

        match response {
            WorkerResponse::Suggestions {
                append,
                suggestions,
                ..
            } => self.deliver(suggestions, append),
            WorkerResponse::Failed { append, error, .. } => self.fail(error, append),
            WorkerResponse::AccessDenied {
                feature, decision, ..
            } => self.deny(feature, decision),
        }
    }

    fn deliver(&mut self, suggestions: Vec<Suggestion>, append: bool) -> SuggestionEvent {
        let count = suggestions.len();
        if append {
            self.suggestions.extend(suggestions);
        } else {
            self.suggestions = suggestions;
        }
        self.analytics.track(
            events::SUGGESTION_GENERATED,
            json!({
                "count": count,
                "platform": self.platform.as_str(),
                "append": append,
            }),
        );
        SuggestionEvent::Delivered {
            count,
            appended: append,
        }
    }

    fn fail(&mut self, error: EngineError, append: bool) -> SuggestionEvent {
        log::warn!("Suggestion generation failed: {}", error);
        self.analytics.track(
            events::SUGGESTION_ERROR,
            json!({
                "error": error.kind(),
                "message": error.to_string(),
                "platform": self.platform.as_str(),
            }),
        );

        let fallback_shown = !(append && !self.suggestions.is_empty());
        if fallback_shown {
            self.suggestions = fallback_suggestions();
        }
        self.last_error = Some(error.clone());
        SuggestionEvent::Failed {
            error,
            fallback_shown,
        }
    }

    fn deny(&mut self, feature: Feature, decision: AccessDecision) -> SuggestionEvent {
        let prompt = decision
            .reason
            .as_ref()
            .map(|reason| reason.upgrade_prompt())
            .unwrap_or_else(|| DEFAULT_UPGRADE_PROMPT.to_string());
        log::debug!("Upgrade required for {}", feature.as_str());
        self.analytics.track(
            events::UPGRADE_REQUESTED,
            json!({
                "feature": feature.as_str(),
                "reason": decision.reason.as_ref().map(|reason| reason.as_str()),
                "platform": self.platform.as_str(),
            }),
        );

        if feature == Feature::Suggestions {
            self.suggestions.clear();
        }
        self.upgrade_prompt = Some(prompt.clone());
        SuggestionEvent::UpgradeRequired { prompt }
    }

    /// Supersede the current generation; outcomes already on their way become no-ops
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        log::debug!("Invalidated suggestions, generation now {}", self.generation);
    }

    /// Remove the displayed list and any upgrade prompt
    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.upgrade_prompt = None;
    }

    /// Record entitlement usage without waiting for it
    pub fn track_usage(&self, feature: Feature) {
        match &self.worker {
            Some(worker) => {
                if !worker.send(WorkerRequest::TrackUsage(feature)) {
                    log::warn!("Could not record {} usage, worker stopped", feature.as_str());
                }
            }
            None => log::warn!("Could not record {} usage, no session", feature.as_str()),
        }
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn suggestion(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    /// True while the request for the current generation is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight_generation == Some(self.generation)
    }

    pub fn has_in_flight_request(&self) -> bool {
        self.in_flight_generation.is_some()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    pub fn upgrade_prompt(&self) -> Option<&str> {
        self.upgrade_prompt.as_deref()
    }

    pub fn last_error(&self) -> Option<&EngineError> {
        self.last_error.as_ref()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
