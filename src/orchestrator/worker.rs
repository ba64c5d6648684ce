//! Suggestion worker
//!
//! Runs coaching engine and entitlement calls off the UI thread. The worker owns a
//! current-thread tokio runtime on its own OS thread:
//! 1. Requests arrive on an unbounded tokio channel
//! 2. Each suggestion job and usage-tracking call is spawned as its own task
//! 3. Outcomes go back over a std channel that the UI thread drains without blocking
//!
//! Dropping the handle cancels the worker; tasks still running are abandoned.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use super::request::{RequestKind, SuggestionRequest};
use crate::engine::{CoachingEngine, EngineError};
use crate::entitlement::{AccessDecision, EntitlementService, Feature};
use crate::error::CoachError;
use crate::suggestion::Suggestion;

/// Messages sent to the worker
#[derive(Debug)]
pub enum WorkerRequest {
    Suggest(SuggestionRequest),
    /// Record entitlement usage, fire-and-forget
    TrackUsage(Feature),
}

/// Outcomes sent back to the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    Suggestions {
        generation: u64,
        append: bool,
        suggestions: Vec<Suggestion>,
    },
    Failed {
        generation: u64,
        append: bool,
        error: EngineError,
    },
    /// Entitlement check denied the request; no engine call was made
    AccessDenied {
        generation: u64,
        feature: Feature,
        decision: AccessDecision,
    },
}

impl WorkerResponse {
    pub fn generation(&self) -> u64 {
        match self {
            WorkerResponse::Suggestions { generation, .. }
            | WorkerResponse::Failed { generation, .. }
            | WorkerResponse::AccessDenied { generation, .. } => *generation,
        }
    }
}

/// Session-scoped handle to the worker thread
#[derive(Debug)]
pub struct SuggestionWorker {
    request_tx: UnboundedSender<WorkerRequest>,
    response_rx: Receiver<WorkerResponse>,
    cancel: CancellationToken,
}

impl SuggestionWorker {
    /// Spawn the worker thread
    pub fn spawn(
        engine: Arc<dyn CoachingEngine>,
        entitlements: Arc<dyn EntitlementService>,
    ) -> Result<Self, CoachError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CoachError::WorkerSpawn)?;

        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        std::thread::Builder::new()
            .name("keycoach-worker".to_string())
            .spawn(move || {
                runtime.block_on(worker_loop(
                    engine,
                    entitlements,
                    request_rx,
                    response_tx,
                    worker_cancel,
                ));
                log::debug!("Suggestion worker thread shutting down");
            })
            .map_err(CoachError::WorkerSpawn)?;

        Ok(Self {
            request_tx,
            response_rx,
            cancel,
        })
    }

    /// Queue a request; returns false if the worker has stopped
    pub fn send(&self, request: WorkerRequest) -> bool {
        self.request_tx.send(request).is_ok()
    }

    /// Next finished outcome, if any. Never blocks.
    pub fn try_recv(&self) -> Option<WorkerResponse> {
        match self.response_rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::debug!("Suggestion worker disconnected");
                None
            }
        }
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for SuggestionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main worker loop - dispatches requests until cancelled or the channel closes
async fn worker_loop(
    engine: Arc<dyn CoachingEngine>,
    entitlements: Arc<dyn EntitlementService>,
    mut request_rx: UnboundedReceiver<WorkerRequest>,
    response_tx: Sender<WorkerResponse>,
    cancel: CancellationToken,
) {
    loop {
        let request = tokio::select! {
            _ = cancel.cancelled() => break,
            request = request_rx.recv() => request,
        };

        match request {
            Some(WorkerRequest::Suggest(request)) => {
                tokio::spawn(handle_suggest(
                    Arc::clone(&engine),
                    Arc::clone(&entitlements),
                    request,
                    response_tx.clone(),
                ));
            }
            Some(WorkerRequest::TrackUsage(feature)) => {
                tokio::spawn(track_usage(Arc::clone(&entitlements), feature));
            }
            None => break,
        }
    }
}

/// Gate, record usage, call the engine and report the outcome
async fn handle_suggest(
    engine: Arc<dyn CoachingEngine>,
    entitlements: Arc<dyn EntitlementService>,
    request: SuggestionRequest,
    response_tx: Sender<WorkerResponse>,
) {
    let generation = request.generation;
    let feature = request.kind.feature();

    let decision = entitlements.check_access(feature).await;
    if !decision.allowed {
        log::debug!("Access denied for {} (generation {})", feature.as_str(), generation);
        let _ = response_tx.send(WorkerResponse::AccessDenied {
            generation,
            feature,
            decision,
        });
        return;
    }

    tokio::spawn(track_usage(entitlements, feature));

    let append = request.kind.is_append();
    let result = match &request.kind {
        RequestKind::Fresh => {
            engine
                .generate(&request.source_text, &request.context, request.requested_count)
                .await
        }
        RequestKind::More { existing } => {
            engine
                .generate_more(
                    &request.source_text,
                    &request.context,
                    existing,
                    request.requested_count,
                )
                .await
        }
    };

    let response = match result {
        Ok(suggestions) if suggestions.is_empty() => WorkerResponse::Failed {
            generation,
            append,
            error: EngineError::MalformedResponse("engine returned no suggestions".to_string()),
        },
        Ok(suggestions) => WorkerResponse::Suggestions {
            generation,
            append,
            suggestions,
        },
        Err(error) => WorkerResponse::Failed {
            generation,
            append,
            error,
        },
    };

    if response_tx.send(response).is_err() {
        log::debug!("Session closed before generation {} resolved", generation);
    }
}

async fn track_usage(entitlements: Arc<dyn EntitlementService>, feature: Feature) {
    if let Err(e) = entitlements.track_usage(feature).await {
        log::warn!("Failed to record {} usage: {}", feature.as_str(), e);
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
