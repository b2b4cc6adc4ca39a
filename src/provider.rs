#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Chat-completion providers.
//!
//! Every provider speaks the same OpenAI-compatible wire format, so the
//! orchestrators only ever see the [`Provider`] trait and an ordered list of
//! trait objects. A provider that cannot answer reports a [`ProviderError`];
//! callers treat every variant as "unavailable" and move on.

use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PROVIDER_TIMEOUT_SECS, env_override};

/// Reasons a provider could not produce text.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// No credential is configured, so no request was sent.
    #[error("no credential configured (set {0})")]
    MissingCredential(String),
    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The provider did not answer within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// The provider answered with a non-success status.
    #[error("provider answered with status {0}")]
    Status(StatusCode),
    /// The body did not contain `choices[0].message.content`.
    #[error("response body had no message content")]
    MalformedBody,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Transport(err)
        }
    }
}

/// A system instruction plus user content, with sampling limits.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct ChatPrompt {
    /// Instructional preamble sent as the system message.
    system:      String,
    /// The question and context sent as the user message.
    user:        String,
    /// Upper bound on generated tokens.
    #[builder(default = 500)]
    max_tokens:  u32,
    /// Sampling temperature.
    #[builder(default = 0.3)]
    temperature: f32,
}

impl ChatPrompt {
    /// Returns the system instruction.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Returns the user content.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the generated-token limit.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Returns the sampling temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Capability shared by every LLM provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Sends the prompt and returns the raw completion text.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError>;
}

/// A single chat message on the wire.
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    /// `system`, `user` or `assistant`.
    role:    String,
    /// Message text.
    content: String,
}

/// Request body for a chat-completion call.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    /// Model identifier.
    model:       &'a str,
    /// Conversation, system message first.
    messages:    Vec<ChatMessage>,
    /// Upper bound on generated tokens.
    max_tokens:  u32,
    /// Sampling temperature.
    temperature: f32,
}

/// The subset of a chat-completion response we read.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Candidate completions.
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// One candidate completion.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The generated message.
    message: ChoiceMessage,
}

/// Message payload of a candidate completion.
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    /// Generated text; absent for tool calls and refusals.
    content: Option<String>,
}

/// An OpenAI-compatible chat-completion provider (Groq, DeepSeek, Mistral...).
#[derive(Clone, Builder)]
#[builder(on(String, into))]
pub struct ChatProvider {
    /// Short provider name used in logs.
    name:        String,
    /// Chat-completion endpoint URL.
    endpoint:    String,
    /// Model identifier.
    model:       String,
    /// Environment variable consulted for the bearer credential.
    #[builder(default)]
    api_key_env: String,
    /// Explicit credential; takes precedence over `api_key_env`.
    api_key:     Option<String>,
    /// Per-request timeout.
    #[builder(default = Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS))]
    timeout:     Duration,
    /// HTTP client used for requests.
    #[builder(default)]
    client:      Client,
}

impl ChatProvider {
    /// Resolves the credential for this call. Blank values count as absent.
    fn credential(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
            .or_else(|| env_override(&self.api_key_env))
    }

    /// Sends one request and extracts `choices[0].message.content`.
    async fn send(&self, api_key: &str, prompt: &ChatPrompt) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model:       &self.model,
            messages:    vec![
                ChatMessage {
                    role:    "system".into(),
                    content: prompt.system().to_owned(),
                },
                ChatMessage {
                    role:    "user".into(),
                    content: prompt.user().to_owned(),
                },
            ],
            max_tokens:  prompt.max_tokens(),
            temperature: prompt.temperature(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ProviderError::Status(response.status()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::MalformedBody)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::MalformedBody)
    }
}

#[async_trait]
impl Provider for ChatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError> {
        let Some(api_key) = self.credential() else {
            tracing::debug!("{} skipped: {} is not set", self.name, self.api_key_env);
            return Err(ProviderError::MissingCredential(self.api_key_env.clone()));
        };

        match self.send(&api_key, prompt).await {
            Ok(text) => {
                tracing::info!("{} responded", self.name);
                Ok(text)
            }
            Err(err) => {
                tracing::warn!("{} unavailable: {err}", self.name);
                Err(err)
            }
        }
    }
}
