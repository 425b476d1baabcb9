//! Session orchestrator — ties the model client, conversation and stores
//! together.
//!
//! # Flows
//!
//! ```text
//! send_message(text)
//!   └─▶ history + "You: text" ──▶ chat model ──▶ reply
//!         └─▶ commit exchange (memory + conversation log)
//!
//! voice_turn(audio file)
//!   └─▶ transcribe ──▶ send_message(transcript)
//!
//! generate_feedback()
//!   └─▶ read log ──▶ FeedbackAnalyzer (bounded repair) ──▶ feedback file
//!
//! generate_quiz()
//!   └─▶ load feedback ──▶ quiz prompt ──▶ QuizParser ──▶ quiz file
//! ```
//!
//! Every step awaits the one before it; nothing runs concurrently inside a
//! session.  Model errors propagate to the caller unchanged.

pub mod conversation;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppConfig, AppPaths};
use crate::feedback::{FeedbackAnalyzer, FeedbackError, FeedbackRecord};
use crate::llm::{ChatMessage, ChatRequest, LlmError, ModelClient, PromptBuilder};
use crate::quiz::{QuizItem, QuizParser};
use crate::store::{FeedbackStore, QuizStore, StoreError, TranscriptLog};

pub use conversation::Conversation;

// ---------------------------------------------------------------------------
// TutorError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TutorError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to read audio file {path}: {source}")]
    Audio {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blank input is never sent to the model.
    #[error("nothing to send: the message is empty")]
    EmptyMessage,
}

// ---------------------------------------------------------------------------
// Tutor
// ---------------------------------------------------------------------------

/// One learner session.
pub struct Tutor {
    client: Arc<dyn ModelClient>,
    config: AppConfig,
    paths: AppPaths,
    conversation: Conversation,
    analyzer: FeedbackAnalyzer,
    feedback_store: FeedbackStore,
    quiz_store: QuizStore,
}

impl Tutor {
    pub fn new(client: Arc<dyn ModelClient>, config: AppConfig, paths: AppPaths) -> Self {
        let conversation = Conversation::new(
            &config.tutor.system_instruction,
            TranscriptLog::new(&paths.conversation_file),
        );
        let analyzer = FeedbackAnalyzer::new(Arc::clone(&client), &config.llm);

        Self {
            feedback_store: FeedbackStore::new(&paths.feedback_file),
            quiz_store: QuizStore::new(&paths.quiz_file),
            client,
            config,
            paths,
            conversation,
            analyzer,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Whether replies should be voiced.
    pub fn speech_enabled(&self) -> bool {
        self.config.speech.enabled
    }

    // -----------------------------------------------------------------------
    // Conversation
    // -----------------------------------------------------------------------

    /// Send one learner message and return the assistant's reply.
    ///
    /// The exchange is committed only after the model answers and the log
    /// write succeeds, so a failed request leaves history and log untouched.
    pub async fn send_message(&mut self, text: &str) -> Result<String, TutorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TutorError::EmptyMessage);
        }

        let request = ChatRequest {
            model: self.config.llm.chat_model.clone(),
            messages: PromptBuilder::reply_messages(&self.conversation.with_pending(text)),
            temperature: self.config.llm.reply_temperature,
        };
        let reply = self.client.complete(&request).await?;

        self.conversation.record_exchange(text, &reply)?;
        log::info!(
            "exchange recorded ({} messages in history)",
            self.conversation.messages().len()
        );
        Ok(reply)
    }

    /// Transcribe a recorded utterance, then send it as a message.
    ///
    /// Returns `(transcript, reply)`.
    pub async fn voice_turn(&mut self, audio_file: &Path) -> Result<(String, String), TutorError> {
        let audio = tokio::fs::read(audio_file)
            .await
            .map_err(|source| TutorError::Audio {
                path: audio_file.to_path_buf(),
                source,
            })?;
        let file_name = audio_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let transcript = self.client.transcribe(audio, &file_name).await?;
        log::info!("transcribed {} chars from {}", transcript.len(), audio_file.display());

        let reply = self.send_message(&transcript).await?;
        Ok((transcript, reply))
    }

    /// Synthesize `text` into the system audio file and return its path.
    pub async fn speak(&self, text: &str) -> Result<PathBuf, TutorError> {
        let audio = self.client.synthesize(text).await?;
        let path = self.paths.system_audio_file.clone();
        crate::store::write_replace(&path, &audio)?;
        log::info!("wrote {} bytes of speech to {}", audio.len(), path.display());
        Ok(path)
    }

    /// Forget the conversation: one system message, empty log.
    pub fn reset(&mut self) -> Result<(), TutorError> {
        self.conversation.reset()?;
        log::info!("conversation history deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Feedback
    // -----------------------------------------------------------------------

    /// Analyze the conversation log and replace the stored feedback.
    ///
    /// An empty log yields (and stores) an empty record without a model call.
    /// If the model never produces valid JSON the previous record is kept.
    pub async fn generate_feedback(&self) -> Result<FeedbackRecord, TutorError> {
        let transcript = self.conversation.log().read()?;
        let record = if transcript.trim().is_empty() {
            log::info!("conversation log is empty; storing empty feedback");
            FeedbackRecord::default()
        } else {
            self.analyzer.analyze(&transcript).await?
        };

        self.feedback_store.save(&record)?;
        Ok(record)
    }

    /// The stored feedback (empty when none has been generated).
    pub fn feedback(&self) -> Result<FeedbackRecord, TutorError> {
        Ok(self.feedback_store.load()?)
    }

    // -----------------------------------------------------------------------
    // Quiz
    // -----------------------------------------------------------------------

    /// Build a quiz from the stored feedback and replace the stored quiz.
    ///
    /// Empty feedback produces an empty quiz without a model call.  On a model
    /// error the previous quiz file is left as it was.
    pub async fn generate_quiz(&self) -> Result<Vec<QuizItem>, TutorError> {
        let feedback = self.feedback_store.load()?;
        let items = if feedback.is_empty() {
            log::info!("no feedback to quiz on; storing empty quiz");
            Vec::new()
        } else {
            let (system_msg, user_msg) = PromptBuilder::quiz(&feedback);
            let request = ChatRequest {
                model: self.config.llm.quiz_model.clone(),
                messages: vec![ChatMessage::system(system_msg), ChatMessage::user(user_msg)],
                temperature: Some(self.config.llm.quiz_temperature),
            };
            let text = self.client.complete(&request).await?;
            QuizParser::parse(&text)
        };

        self.quiz_store.save(&items)?;
        log::info!("quiz generated with {} item(s)", items.len());
        Ok(items)
    }

    /// The stored quiz (empty when none has been generated).
    pub fn quiz(&self) -> Result<Vec<QuizItem>, TutorError> {
        Ok(self.quiz_store.load()?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
