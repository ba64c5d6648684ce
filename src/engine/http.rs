//! HTTP coaching engine client

use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;

use super::{CoachingEngine, EngineError};
use crate::context::{ConversationContext, ConversationType, Platform};
use crate::error::CoachError;
use crate::suggestion::{Suggestion, parse_suggestions};

/// Request body shared by both endpoints
#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    text: &'a str,
    platform: Platform,
    host_app_id: &'a str,
    conversation_type: ConversationType,
    prior_messages: &'a [String],
    count: usize,
    existing: &'a [Suggestion],
}

impl<'a> GenerateBody<'a> {
    fn new(
        text: &'a str,
        context: &'a ConversationContext,
        existing: &'a [Suggestion],
        count: usize,
    ) -> Self {
        Self {
            text,
            platform: context.platform,
            host_app_id: &context.host_app_id,
            conversation_type: context.conversation_type,
            prior_messages: &context.prior_messages,
            count,
            existing,
        }
    }
}

/// Coaching service reached over HTTPS
#[derive(Debug, Clone)]
pub struct HttpCoachingEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpCoachingEngine {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, CoachError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoachError::EngineClient(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    async fn post(&self, path: &str, body: &GenerateBody<'_>) -> Result<Vec<Suggestion>, EngineError> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Transport(format!("HTTP {}", status)));
        }

        let text = response.text().await.map_err(map_request_error)?;
        parse_suggestions(&text)
    }
}

fn map_request_error(e: reqwest::Error) -> EngineError {
    if e.is_timeout() {
        EngineError::Timeout
    } else if e.is_decode() {
        EngineError::MalformedResponse(e.to_string())
    } else {
        EngineError::Transport(e.to_string())
    }
}

impl CoachingEngine for HttpCoachingEngine {
    fn generate<'a>(
        &'a self,
        text: &'a str,
        context: &'a ConversationContext,
        count: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, EngineError>> {
        Box::pin(async move {
            let body = GenerateBody::new(text, context, &[], count);
            log::debug!("Requesting {} suggestions from {}", count, self.endpoint);
            self.post("suggestions", &body).await
        })
    }

    fn generate_more<'a>(
        &'a self,
        text: &'a str,
        context: &'a ConversationContext,
        existing: &'a [Suggestion],
        count: usize,
    ) -> BoxFuture<'a, Result<Vec<Suggestion>, EngineError>> {
        Box::pin(async move {
            let body = GenerateBody::new(text, context, existing, count);
            self.post("suggestions/more", &body).await
        })
    }
}
