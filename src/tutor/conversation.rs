//! In-memory conversation plus its on-disk log.
//!
//! [`Conversation`] owns the message list sent with every reply request.  It
//! always starts with exactly one system message; [`reset`](Conversation::reset)
//! truncates back to it and empties the log file.

use crate::llm::{ChatMessage, Role};
use crate::store::{StoreError, TranscriptLog};

/// Speaker label prepended to the learner's messages, so the model (and the
/// analysis prompt) can tell who said what.
pub const USER_LABEL: &str = "You: ";

#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    log: TranscriptLog,
}

impl Conversation {
    pub fn new(system_instruction: &str, log: TranscriptLog) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_instruction)],
            log,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn log(&self) -> &TranscriptLog {
        &self.log
    }

    /// History followed by the pending learner message, without committing it.
    pub fn with_pending(&self, user_input: &str) -> Vec<ChatMessage> {
        let mut messages = self.messages.clone();
        messages.push(ChatMessage::user(format!("{USER_LABEL}{user_input}")));
        messages
    }

    /// Commit a completed exchange to the log, then to memory.  A failed log
    /// write leaves the history unchanged.
    pub fn record_exchange(&mut self, user_input: &str, reply: &str) -> Result<(), StoreError> {
        self.log.append_exchange(user_input, reply)?;
        self.messages
            .push(ChatMessage::user(format!("{USER_LABEL}{user_input}")));
        self.messages.push(ChatMessage::assistant(reply));
        Ok(())
    }

    /// Drop everything but the system message and truncate the log.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.messages.truncate(1);
        debug_assert_eq!(self.messages[0].role, Role::System);
        self.log.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn conversation(dir: &std::path::Path) -> Conversation {
        Conversation::new("persona", TranscriptLog::new(dir.join("conversation.txt")))
    }

    #[test]
    fn starts_with_single_system_message() {
        let dir = tempdir().expect("temp dir");
        let conv = conversation(dir.path());
        assert_eq!(conv.messages(), &[ChatMessage::system("persona")]);
    }

    #[test]
    fn pending_message_is_not_committed() {
        let dir = tempdir().expect("temp dir");
        let conv = conversation(dir.path());

        let request = conv.with_pending("hello");
        assert_eq!(request.len(), 2);
        assert_eq!(request[1], ChatMessage::user("You: hello"));
        assert_eq!(conv.messages().len(), 1);
    }

    #[test]
    fn record_exchange_updates_memory_and_log() {
        let dir = tempdir().expect("temp dir");
        let mut conv = conversation(dir.path());

        conv.record_exchange("I goes", "Where?").unwrap();

        assert_eq!(
            conv.messages()[1..],
            [ChatMessage::user("You: I goes"), ChatMessage::assistant("Where?")]
        );
        assert_eq!(conv.log().read().unwrap(), "You: I goes\nSystem: Where?\n");
    }

    #[test]
    fn unwritable_log_leaves_history_unchanged() {
        let dir = tempdir().expect("temp dir");
        // a directory where the log file should be makes every append fail
        std::fs::create_dir(dir.path().join("conversation.txt")).unwrap();
        let mut conv = conversation(dir.path());

        let err = conv.record_exchange("Hello", "Hi!").unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(conv.messages(), &[ChatMessage::system("persona")]);
    }

    #[test]
    fn reset_leaves_only_system_message_and_empty_log() {
        let dir = tempdir().expect("temp dir");
        let mut conv = conversation(dir.path());
        for i in 0..10 {
            conv.record_exchange(&format!("msg {i}"), "ok").unwrap();
        }

        conv.reset().unwrap();

        assert_eq!(conv.messages(), &[ChatMessage::system("persona")]);
        assert_eq!(conv.log().read().unwrap(), "");
    }
}
