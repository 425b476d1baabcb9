//! Hosted-model access for the English tutor.
//!
//! This module provides:
//! * [`ModelClient`] — async trait over chat, transcription and speech.
//! * [`ApiClient`] — OpenAI-compatible REST implementation.
//! * [`PromptBuilder`] — reply, analysis, repair and quiz prompts.
//! * [`LlmError`] — error variants for model calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use english_tutor::config::{ApiKey, AppConfig};
//! use english_tutor::llm::{ApiClient, ChatMessage, ChatRequest, ModelClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let key = ApiKey::load(&config.paths().credential_file).unwrap();
//!     let client = ApiClient::from_config(&config.llm, &config.speech, key);
//!
//!     let request = ChatRequest {
//!         model: config.llm.chat_model.clone(),
//!         messages: vec![ChatMessage::user("Hello!")],
//!         temperature: None,
//!     };
//!     println!("{}", client.complete(&request).await.unwrap());
//! }
//! ```

pub mod client;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiClient, ChatMessage, ChatRequest, LlmError, ModelClient, Role};
pub use prompt::PromptBuilder;

// test-only re-export so other modules can script model output without a
// network round trip.
#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::ScriptedClient;
