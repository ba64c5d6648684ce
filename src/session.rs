//! Keyboard input session
//!
//! One session runs from the keyboard being shown to it being hidden. It routes key
//! events through the state machine, feeds text changes to the debouncer and hands due
//! triggers to the orchestrator. Callers drive it from their event loop with
//! [`KeyboardSession::tick`] so debounce deadlines fire and finished requests land.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;

use crate::analytics::{AnalyticsSink, events};
use crate::config::Config;
use crate::context::{ConversationContext, build_context, extract_prior_messages};
use crate::engine::{CoachingEngine, EngineError};
use crate::entitlement::EntitlementService;
use crate::error::CoachError;
use crate::keyboard::{
    CONTEXT_WINDOW_CHARS, HostField, KeyEvent, KeyOutcome, KeyStateMachine, KeyboardMode,
    ShiftState,
};
use crate::orchestrator::{Orchestrator, SubmitOutcome, SuggestionEvent, SuggestionWorker};
use crate::scheduler::{Debouncer, TriggerDecision};
use crate::suggestion::Suggestion;
use crate::tracker::ConsumptionTracker;

/// Tunables for a keyboard session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub suggestions_enabled: bool,
    pub quiet_period: Duration,
    pub min_words: usize,
    pub suggestion_count: usize,
    pub double_tap_window: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        let suggestions = &config.suggestions;
        Self {
            suggestions_enabled: suggestions.enabled,
            quiet_period: Duration::from_millis(suggestions.debounce_ms),
            min_words: suggestions.min_words,
            suggestion_count: suggestions.count,
            double_tap_window: Duration::from_millis(suggestions.double_tap_ms),
        }
    }
}

pub struct KeyboardSession {
    settings: SessionSettings,
    engine: Arc<dyn CoachingEngine>,
    entitlements: Arc<dyn EntitlementService>,
    analytics: Arc<dyn AnalyticsSink>,
    keys: KeyStateMachine,
    debouncer: Debouncer,
    orchestrator: Orchestrator,
    tracker: ConsumptionTracker,
    /// Set while a session is active
    context: Option<ConversationContext>,
    started_at: Option<Instant>,
    suggestions_enabled: bool,
    /// A due trigger found a request in flight; fire it once that request resolves
    deferred_trigger: bool,
}

impl KeyboardSession {
    pub fn new(
        settings: SessionSettings,
        engine: Arc<dyn CoachingEngine>,
        entitlements: Arc<dyn EntitlementService>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            settings,
            engine,
            entitlements,
            keys: KeyStateMachine::new(settings.double_tap_window),
            debouncer: Debouncer::new(settings.quiet_period, settings.min_words),
            orchestrator: Orchestrator::new(Arc::clone(&analytics)),
            tracker: ConsumptionTracker::new(Arc::clone(&analytics)),
            analytics,
            context: None,
            started_at: None,
            suggestions_enabled: settings.suggestions_enabled,
            deferred_trigger: false,
        }
    }

    /// Begin an input session for `host`, owned by the app `host_app_id`
    ///
    /// Resets the buffer, modifiers and generation counter and starts a fresh worker.
    /// An active session is ended first.
    pub fn start_session(
        &mut self,
        host: &dyn HostField,
        host_app_id: &str,
    ) -> Result<(), CoachError> {
        if self.is_active() {
            self.end_session();
        }

        let worker = SuggestionWorker::spawn(
            Arc::clone(&self.engine),
            Arc::clone(&self.entitlements),
        )?;
        let metadata = host.metadata();
        self.keys.start_session(&metadata);
        self.debouncer.cancel();
        self.deferred_trigger = false;
        self.orchestrator.begin_session(worker);
        let context = build_context(host_app_id);

        self.analytics.track(
            events::SESSION_START,
            json!({
                "platform": context.platform.as_str(),
                "host_app_id": host_app_id,
                "input_class": metadata.input_class.as_str(),
                "mode": self.keys.mode().as_str(),
            }),
        );
        log::debug!(
            "Session started for {} ({})",
            host_app_id,
            context.platform.as_str()
        );
        self.context = Some(context);
        self.started_at = Some(Instant::now());
        Ok(())
    }

    /// End the active session; pending and in-flight requests are abandoned
    pub fn end_session(&mut self) {
        let Some(context) = self.context.take() else {
            return;
        };
        self.orchestrator.end_session();
        self.debouncer.cancel();
        self.deferred_trigger = false;

        let duration_ms = self
            .started_at
            .take()
            .map(|started| started.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.analytics.track(
            events::SESSION_END,
            json!({
                "platform": context.platform.as_str(),
                "duration_ms": duration_ms,
            }),
        );
        log::debug!("Session ended after {} ms", duration_ms);
    }

    pub fn handle_key(&mut self, event: KeyEvent, host: &mut dyn HostField) -> KeyOutcome {
        self.handle_key_at(event, host, Instant::now())
    }

    /// Apply a key event that happened at `now`
    pub fn handle_key_at(
        &mut self,
        event: KeyEvent,
        host: &mut dyn HostField,
        now: Instant,
    ) -> KeyOutcome {
        let kind = event.kind();
        let mode = self.keys.mode();
        let outcome = self.keys.apply_at(event, host, now);

        self.analytics.track(
            events::KEY_PRESS,
            json!({ "kind": kind, "mode": mode.as_str() }),
        );

        if outcome.text_changed() {
            self.on_text_changed(&*host, now);
        }
        outcome
    }

    /// Drive timers and collect finished requests
    pub fn tick(&mut self, host: &dyn HostField) -> Vec<SuggestionEvent> {
        self.tick_at(host, Instant::now())
    }

    /// A trigger deferred behind an in-flight request fires on the first tick after
    /// that request resolves.
    pub fn tick_at(&mut self, host: &dyn HostField, now: Instant) -> Vec<SuggestionEvent> {
        let events = self.orchestrator.poll_responses();
        let due = self.debouncer.poll_due(now);
        let released = self.deferred_trigger && !self.orchestrator.has_in_flight_request();
        if due || released {
            self.deferred_trigger = false;
            self.trigger(host);
        }
        events
    }

    /// Accept the suggestion at `index`, replacing the current word
    ///
    /// Returns `None` when no suggestion is displayed at that position.
    pub fn accept_suggestion(
        &mut self,
        index: usize,
        host: &mut dyn HostField,
    ) -> Option<KeyOutcome> {
        let suggestion: Suggestion = self.orchestrator.suggestion(index).cloned()?;
        self.debouncer.cancel();
        self.deferred_trigger = false;
        Some(
            self.tracker
                .on_accept(&suggestion, &mut self.keys, host, &mut self.orchestrator),
        )
    }

    /// Ask for suggestions beyond the displayed ones
    ///
    /// Returns `None` while suggestions are turned off.
    pub fn request_more(&mut self, host: &dyn HostField) -> Option<SubmitOutcome> {
        if !self.suggestions_enabled {
            return None;
        }
        let context = self.request_context(host)?;
        Some(self.orchestrator.request_more(
            self.keys.buffer().as_str(),
            context,
            self.settings.suggestion_count,
        ))
    }

    /// Hide the displayed suggestions; late outcomes are ignored
    pub fn dismiss_suggestions(&mut self) {
        self.debouncer.cancel();
        self.deferred_trigger = false;
        self.orchestrator.clear_suggestions();
        self.orchestrator.invalidate();
    }

    pub fn set_suggestions_enabled(&mut self, enabled: bool) {
        self.suggestions_enabled = enabled;
        if !enabled {
            self.dismiss_suggestions();
        }
        log::debug!("Suggestions {}", if enabled { "enabled" } else { "disabled" });
    }

    /// The host field changed outside of a key event (cursor move, external edit)
    ///
    /// Returns true when the buffer had drifted and was rebuilt from the host.
    pub fn host_text_changed(&mut self, host: &dyn HostField) -> bool {
        match self.keys.verify_sync(host) {
            Ok(()) => false,
            Err(e) => {
                log::debug!("{}, resynchronising", e);
                self.keys.resync_from(host);
                self.on_text_changed(host, Instant::now());
                true
            }
        }
    }

    fn on_text_changed(&mut self, host: &dyn HostField, now: Instant) {
        if !self.suggestions_enabled {
            return;
        }
        match self
            .debouncer
            .on_text_changed_at(self.keys.buffer().as_str(), now)
        {
            TriggerDecision::Suppress => {
                self.deferred_trigger = false;
                if !self.orchestrator.suggestions().is_empty()
                    || self.orchestrator.is_loading()
                    || self.orchestrator.upgrade_prompt().is_some()
                {
                    self.orchestrator.clear_suggestions();
                    self.orchestrator.invalidate();
                }
            }
            // The debouncer owns the next trigger again
            TriggerDecision::ScheduleDelayed => self.deferred_trigger = false,
            TriggerDecision::FireNow => {
                self.trigger(host);
            }
        }
    }

    fn trigger(&mut self, host: &dyn HostField) {
        let Some(context) = self.request_context(host) else {
            return;
        };
        let outcome = self.orchestrator.request_suggestions(
            self.keys.buffer().as_str(),
            context,
            self.settings.suggestion_count,
        );
        if outcome == SubmitOutcome::InFlight {
            log::debug!("Trigger deferred until the in-flight request resolves");
            self.deferred_trigger = true;
        }
    }

    /// Context for one request, with prior messages read from the host field
    fn request_context(&self, host: &dyn HostField) -> Option<ConversationContext> {
        let base = self.context.clone()?;
        let before_cursor = host.text_before_cursor(CONTEXT_WINDOW_CHARS);
        Some(base.with_prior_messages(extract_prior_messages(&before_cursor)))
    }

    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&ConversationContext> {
        self.context.as_ref()
    }

    pub fn keys(&self) -> &KeyStateMachine {
        &self.keys
    }

    pub fn buffer_text(&self) -> &str {
        self.keys.buffer().as_str()
    }

    pub fn mode(&self) -> KeyboardMode {
        self.keys.mode()
    }

    pub fn shift(&self) -> ShiftState {
        self.keys.shift()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.orchestrator.suggestions()
    }

    pub fn is_loading(&self) -> bool {
        self.orchestrator.is_loading()
    }

    pub fn has_pending_trigger(&self) -> bool {
        self.debouncer.has_pending()
    }

    pub fn has_deferred_trigger(&self) -> bool {
        self.deferred_trigger
    }

    pub fn upgrade_prompt(&self) -> Option<&str> {
        self.orchestrator.upgrade_prompt()
    }

    pub fn last_error(&self) -> Option<&EngineError> {
        self.orchestrator.last_error()
    }

    pub fn suggestions_enabled(&self) -> bool {
        self.suggestions_enabled
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }
}

impl Drop for KeyboardSession {
    fn drop(&mut self) {
        self.end_session();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
