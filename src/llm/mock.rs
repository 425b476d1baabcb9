//! Scripted [`ModelClient`] used by unit tests across the crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{ChatRequest, LlmError, ModelClient};

/// Returns pre-recorded completions in order and records every request.
///
/// When the script runs dry, `complete` fails with [`LlmError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedClient {
    completions: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    transcription: String,
    audio: Vec<u8>,
}

impl ScriptedClient {
    pub fn new<I, S>(completions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completions: Mutex::new(completions.into_iter().map(|s| Ok(s.into())).collect()),
            ..Self::default()
        }
    }

    /// Queue a failing completion after the scripted ones.
    pub fn then_fail(self, err: LlmError) -> Self {
        self.completions.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_transcription(mut self, text: &str) -> Self {
        self.transcription = text.to_string();
        self
    }

    pub fn with_audio(mut self, audio: &[u8]) -> Self {
        self.audio = audio.to_vec();
        self
    }

    /// Every chat request seen so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.completions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }

    async fn transcribe(&self, _audio: Vec<u8>, _file_name: &str) -> Result<String, LlmError> {
        Ok(self.transcription.clone())
    }

    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, LlmError> {
        Ok(self.audio.clone())
    }
}
