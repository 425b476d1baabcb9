//! Core `ModelClient` trait and `ApiClient` implementation.
//!
//! `ApiClient` calls the three OpenAI-compatible endpoints the tutor needs:
//!
//! * `/v1/chat/completions`      — replies, analysis, JSON repair, quizzes
//! * `/v1/audio/transcriptions`  — learner speech → text (multipart upload)
//! * `/v1/audio/speech`          — assistant reply → audio bytes
//!
//! All connection details come from [`LlmConfig`] / [`SpeechConfig`]; nothing
//! is hardcoded.  There is no retry here: transport and auth failures are
//! returned to the caller as [`LlmError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ApiKey, LlmConfig, SpeechConfig};

// ---------------------------------------------------------------------------
// LlmError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the hosted model.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("model request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status (bad key, quota …).
    #[error("model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse model response: {0}")]
    Parse(String),

    /// The model returned a response with no usable text content.
    #[error("model returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Chat wire types
// ---------------------------------------------------------------------------

/// Speaker of a [`ChatMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of a chat-completion message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a `/v1/chat/completions` request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

// ---------------------------------------------------------------------------
// ModelClient trait
// ---------------------------------------------------------------------------

/// Async interface to the hosted model.
///
/// Implementors must be `Send + Sync` so they can be shared behind
/// `Arc<dyn ModelClient>`.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run a chat completion and return the first choice's text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;

    /// Transcribe an encoded audio file.  `file_name` carries the extension
    /// the provider uses to detect the container format.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, LlmError>;

    /// Synthesize `text` and return the encoded audio.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, LlmError>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible REST API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    speech: SpeechConfig,
}

impl ApiClient {
    /// Build an `ApiClient` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `llm.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails.
    pub fn from_config(llm: &LlmConfig, speech: &SpeechConfig, api_key: ApiKey) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(llm.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: llm.base_url.trim_end_matches('/').to_string(),
            api_key,
            speech: speech.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    /// Turn a non-success status into [`LlmError::Status`].
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(LlmError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ModelClient for ApiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        log::debug!(
            "chat completion: model={} messages={}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }

    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, LlmError> {
        log::debug!("transcription: {} bytes ({file_name})", audio.len());

        let part = reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("model", self.speech.transcription_model.clone())
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("audio/transcriptions"))
            .bearer_auth(self.api_key.expose())
            .multipart(form)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        Ok(body.text.trim().to_string())
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, LlmError> {
        let body = serde_json::json!({
            "model": self.speech.tts_model,
            "voice": self.speech.voice,
            "input": text,
        });

        let response = self
            .client
            .post(self.endpoint("audio/speech"))
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(audio.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
