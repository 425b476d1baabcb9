//! Transcript analysis with bounded JSON self-correction.
//!
//! ```text
//! analysis prompt ──▶ model ──▶ parse ──ok──▶ FeedbackRecord
//!                                 │
//!                                err (attempt < max)
//!                                 ▼
//!                     repair prompt(invalid, error) ──▶ model ──▶ parse …
//!
//! attempt == max and still err ──▶ FeedbackError::RepairExhausted
//! ```
//!
//! Every failed parse that still has budget left issues exactly one repair
//! prompt.  Model transport errors end the loop immediately.

use std::sync::Arc;

use thiserror::Error;

use crate::config::LlmConfig;
use crate::feedback::FeedbackRecord;
use crate::llm::{ChatMessage, ChatRequest, LlmError, ModelClient, PromptBuilder};

/// Errors from [`FeedbackAnalyzer::analyze`].
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Model(#[from] LlmError),

    /// The model never produced parseable JSON within the attempt budget.
    #[error("model output was still invalid JSON after {attempts} attempts: {last_error}")]
    RepairExhausted { attempts: u32, last_error: String },
}

/// Requests a [`FeedbackRecord`] for a transcript.
pub struct FeedbackAnalyzer {
    client: Arc<dyn ModelClient>,
    model: String,
    temperature: f32,
    max_attempts: u32,
}

impl FeedbackAnalyzer {
    pub fn new(client: Arc<dyn ModelClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.analysis_model.clone(),
            temperature: config.analysis_temperature,
            max_attempts: config.repair_attempts.max(1),
        }
    }

    /// Analyze `transcript` and return the parsed record.
    pub async fn analyze(&self, transcript: &str) -> Result<FeedbackRecord, FeedbackError> {
        let mut output = self.ask(PromptBuilder::analysis(transcript)).await?;
        let mut attempt = 1;

        loop {
            let error = match FeedbackRecord::parse(&output) {
                Ok(record) => {
                    log::info!("feedback parsed after {attempt} attempt(s)");
                    return Ok(record);
                }
                Err(e) => e.to_string(),
            };

            log::warn!(
                "model returned invalid feedback JSON (attempt {attempt}/{}): {error}",
                self.max_attempts
            );
            if attempt >= self.max_attempts {
                return Err(FeedbackError::RepairExhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }

            output = self.ask(PromptBuilder::repair(&output, &error)).await?;
            attempt += 1;
        }
    }

    async fn ask(&self, prompt: String) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(self.temperature),
        };
        self.client.complete(&request).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
