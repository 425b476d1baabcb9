//! English conversation tutor.
//!
//! Chat with a hosted model, get grammar / vocabulary / phrase feedback on
//! the learner's side of the conversation, and turn that feedback into
//! flashcard quizzes.
//!
//! * [`config`] — `settings.toml`, platform paths, API key.
//! * [`llm`] — model client trait, OpenAI-compatible implementation, prompts.
//! * [`feedback`] — feedback record and the bounded JSON repair loop.
//! * [`quiz`] — quiz items, `Q:`/`A:` parser, flashcard navigation.
//! * [`store`] — conversation log, feedback and quiz files.
//! * [`tutor`] — the session orchestrator used by the binary.

pub mod config;
pub mod feedback;
pub mod llm;
pub mod quiz;
pub mod store;
pub mod tutor;
