/// Scoring Client — the single point of entry for all remote completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All completion requests MUST go through this module.
///
/// The client never retries internally: batching, pacing, and retry policy
/// belong to the orchestrator, which owns the rate-limit budget.
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use prompts::{ANALYSIS_SYSTEM, CONNECTION_TEST_PROMPT, CONNECTION_TEST_TOKEN};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Categorized failure modes of the remote scoring capability.
/// Rate-limit and quota errors carry distinct human-readable messages so the
/// caller can surface them verbatim.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("API key rejected (401): {0}")]
    Unauthorized(String),

    #[error("Rate limited by the scoring API (429) — slow down and retry later: {0}")]
    RateLimited(String),

    #[error("API quota exhausted — check the billing plan for this key: {0}")]
    QuotaExceeded(String),

    #[error("Scoring API error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error reaching the scoring API: {0}")]
    Network(String),

    #[error("Scoring call timed out after {0}s")]
    Timeout(u64),

    #[error("Scoring API returned no content")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// The remote completion capability behind the scoring client.
/// `OpenAiBackend` is the production implementation; tests use scripted stubs.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, RemoteError>;
}

/// Production backend wrapping the OpenAI chat completions API.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl OpenAiBackend {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
            timeout_secs,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, RemoteError> {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user,
        });

        let request_body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteError::Timeout(self.timeout_secs)
                } else {
                    RemoteError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<OpenAiError>(&body).ok();
            let message = parsed
                .as_ref()
                .map(|e| e.error.message.clone())
                .unwrap_or(body);

            // Quota exhaustion arrives as 429 with a distinguishing error code.
            let quota = parsed
                .as_ref()
                .and_then(|e| e.error.code.as_deref())
                .is_some_and(|c| c == "insufficient_quota");

            return Err(match status.as_u16() {
                401 => RemoteError::Unauthorized(message),
                429 if quota => RemoteError::QuotaExceeded(message),
                429 => RemoteError::RateLimited(message),
                s => RemoteError::Server { status: s, message },
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(RemoteError::EmptyResponse)?;

        debug!("Scoring call succeeded ({} chars)", content.len());
        Ok(content)
    }
}

/// The single scoring client used by all services.
/// Carries the shared generation parameters so callers pass only prompt text.
#[derive(Clone)]
pub struct ScoringClient {
    backend: Arc<dyn CompletionBackend>,
    max_tokens: u32,
    temperature: f32,
}

impl ScoringClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            backend,
            max_tokens,
            temperature,
        }
    }

    /// Sends an analysis prompt and returns the raw text completion.
    pub async fn score(&self, prompt: &str) -> Result<String, RemoteError> {
        self.backend
            .complete(ANALYSIS_SYSTEM, prompt, self.max_tokens, self.temperature)
            .await
    }

    /// Sends a prompt under an arbitrary system instruction.
    /// Used by the priority extractor, which carries its own system prompt.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, RemoteError> {
        self.backend
            .complete(system, user, self.max_tokens, self.temperature)
            .await
    }

    /// Sends a minimal fixed prompt and checks the reply contains the
    /// sentinel token. Any error counts as a failed connection.
    pub async fn test_connection(&self) -> bool {
        match self
            .backend
            .complete("", CONNECTION_TEST_PROMPT, 10, 0.0)
            .await
        {
            Ok(reply) => reply.contains(CONNECTION_TEST_TOKEN),
            Err(e) => {
                tracing::warn!("API connection test failed: {e}");
                false
            }
        }
    }
}
