#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use futures::future::{self, BoxFuture, FutureExt};
    use serde_json::Value;
    use tokio::sync::Semaphore;

    use crate::analytics::AnalyticsSink;
    use crate::context::ConversationContext;
    use crate::engine::{CoachingEngine, EngineError};
    use crate::entitlement::{
        AccessDecision, DenyReason, EntitlementError, EntitlementService, Feature,
    };
    use crate::orchestrator::{Orchestrator, SuggestionEvent};
    use crate::suggestion::{Suggestion, SuggestionTone};

    type EngineResult = Result<Vec<Suggestion>, EngineError>;

    pub fn sample_suggestions(texts: &[&str]) -> Vec<Suggestion> {
        texts
            .iter()
            .map(|text| Suggestion::new(*text).with_tone(SuggestionTone::Playful))
            .collect()
    }

    /// Coaching engine returning queued results, then a default
    ///
    /// Calls are counted when the engine is invoked, before the gate (if any) is
    /// passed. A gated engine holds every call until the test adds a permit.
    pub struct ScriptedEngine {
        queued: Mutex<VecDeque<EngineResult>>,
        default: EngineResult,
        calls: AtomicUsize,
        more_calls: AtomicUsize,
        seen_texts: Mutex<Vec<String>>,
        gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedEngine {
        pub fn succeeding(suggestions: Vec<Suggestion>) -> Self {
            Self::with_default(Ok(suggestions))
        }

        pub fn failing(error: EngineError) -> Self {
            Self::with_default(Err(error))
        }

        fn with_default(default: EngineResult) -> Self {
            Self {
                queued: Mutex::new(VecDeque::new()),
                default,
                calls: AtomicUsize::new(0),
                more_calls: AtomicUsize::new(0),
                seen_texts: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        /// Queue a result for the next call
        pub fn then(self, result: EngineResult) -> Self {
            self.queued.lock().unwrap().push_back(result);
            self
        }

        pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
            self.gate = Some(gate);
            self
        }

        /// Total engine calls, fresh and "more"
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn more_calls(&self) -> usize {
            self.more_calls.load(Ordering::SeqCst)
        }

        pub fn seen_texts(&self) -> Vec<String> {
            self.seen_texts.lock().unwrap().clone()
        }

        fn respond<'a>(&'a self, text: &str) -> BoxFuture<'a, EngineResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen_texts.lock().unwrap().push(text.to_string());
            let result = self
                .queued
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.default.clone());
            let gate = self.gate.clone();
            async move {
                if let Some(gate) = gate {
                    if let Ok(permit) = gate.acquire().await {
                        permit.forget();
                    }
                }
                result
            }
            .boxed()
        }
    }

    impl CoachingEngine for ScriptedEngine {
        fn generate<'a>(
            &'a self,
            text: &'a str,
            _context: &'a ConversationContext,
            _count: usize,
        ) -> BoxFuture<'a, EngineResult> {
            self.respond(text)
        }

        fn generate_more<'a>(
            &'a self,
            text: &'a str,
            _context: &'a ConversationContext,
            _existing: &'a [Suggestion],
            _count: usize,
        ) -> BoxFuture<'a, EngineResult> {
            self.more_calls.fetch_add(1, Ordering::SeqCst);
            self.respond(text)
        }
    }

    /// Entitlement service with a fixed decision that records every call
    pub struct ScriptedEntitlements {
        decision: Mutex<AccessDecision>,
        tracking_fails: bool,
        checked: Mutex<Vec<Feature>>,
        tracked: Mutex<Vec<Feature>>,
    }

    impl ScriptedEntitlements {
        pub fn allow_all() -> Self {
            Self {
                decision: Mutex::new(AccessDecision::allow()),
                tracking_fails: false,
                checked: Mutex::new(Vec::new()),
                tracked: Mutex::new(Vec::new()),
            }
        }

        pub fn denying(reason: DenyReason) -> Self {
            let entitlements = Self::allow_all();
            entitlements.set_decision(AccessDecision::deny(reason));
            entitlements
        }

        pub fn with_tracking_failure(mut self) -> Self {
            self.tracking_fails = true;
            self
        }

        pub fn set_decision(&self, decision: AccessDecision) {
            *self.decision.lock().unwrap() = decision;
        }

        pub fn checked(&self) -> Vec<Feature> {
            self.checked.lock().unwrap().clone()
        }

        pub fn tracked(&self) -> Vec<Feature> {
            self.tracked.lock().unwrap().clone()
        }
    }

    impl EntitlementService for ScriptedEntitlements {
        fn check_access(&self, feature: Feature) -> BoxFuture<'_, AccessDecision> {
            self.checked.lock().unwrap().push(feature);
            future::ready(self.decision.lock().unwrap().clone()).boxed()
        }

        fn track_usage(&self, feature: Feature) -> BoxFuture<'_, Result<(), EntitlementError>> {
            self.tracked.lock().unwrap().push(feature);
            let result = if self.tracking_fails {
                Err(EntitlementError::Tracking("backend offline".to_string()))
            } else {
                Ok(())
            };
            future::ready(result).boxed()
        }
    }

    /// Analytics sink that keeps every event
    #[derive(Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingSink {
        pub fn names(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|(name, _)| name.clone())
                .collect()
        }

        /// Params of the most recent event called `name`
        pub fn last(&self, name: &str) -> Option<Value> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(event, _)| event == name)
                .map(|(_, params)| params.clone())
        }

        pub fn count(&self, name: &str) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(event, _)| event == name)
                .count()
        }
    }

    impl AnalyticsSink for RecordingSink {
        fn track(&self, event: &str, params: Value) {
            self.events
                .lock()
                .unwrap()
                .push((event.to_string(), params));
        }
    }

    /// Poll `condition` until it holds or `timeout_ms` passes
    pub fn wait_until(mut condition: impl FnMut() -> bool, timeout_ms: u64) -> bool {
        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        while start.elapsed() < timeout {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        condition()
    }

    /// Poll the orchestrator until at least one outcome has been applied
    ///
    /// Returns the applied events, or an empty vec on timeout.
    pub fn wait_for_events(orchestrator: &mut Orchestrator, timeout_ms: u64) -> Vec<SuggestionEvent> {
        let mut events = Vec::new();
        wait_until(
            || {
                events.extend(orchestrator.poll_responses());
                !events.is_empty()
            },
            timeout_ms,
        );
        events
    }
}
