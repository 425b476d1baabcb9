//! Line-oriented `Q:` / `A:` quiz extraction.
//!
//! The parser is a two-state machine:
//!
//! ```text
//!                 "Q: …"                       "Q: …" (replaces pending)
//! AwaitingQuestion ─────▶ AwaitingAnswer(q) ◀──────┐
//!        ▲                   │    └─────────────────┘
//!        └──── "A: …" ───────┘  emits QuizItem { q, a } when a is non-empty
//! ```
//!
//! Other lines never change state.  An `A:` line with nothing pending is
//! ignored.  At end of input a pending question is dropped.

use super::QuizItem;

const QUESTION_PREFIX: &str = "Q:";
const ANSWER_PREFIX: &str = "A:";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseState {
    AwaitingQuestion,
    AwaitingAnswer(String),
}

/// Incremental quiz parser; feed it lines, then call [`finish`](Self::finish).
#[derive(Debug)]
pub struct QuizParser {
    state: ParseState,
    items: Vec<QuizItem>,
}

impl QuizParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::AwaitingQuestion,
            items: Vec::new(),
        }
    }

    /// Parse a whole model response in one go.
    pub fn parse(text: &str) -> Vec<QuizItem> {
        let mut parser = Self::new();
        for line in text.lines() {
            parser.feed_line(line);
        }
        parser.finish()
    }

    pub fn feed_line(&mut self, line: &str) {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(QUESTION_PREFIX) {
            let question = rest.trim();
            self.state = if question.is_empty() {
                ParseState::AwaitingQuestion
            } else {
                ParseState::AwaitingAnswer(question.to_string())
            };
        } else if let Some(rest) = line.strip_prefix(ANSWER_PREFIX) {
            let pending = std::mem::replace(&mut self.state, ParseState::AwaitingQuestion);
            let answer = rest.trim();
            if let ParseState::AwaitingAnswer(question) = pending {
                if !answer.is_empty() {
                    self.items.push(QuizItem {
                        question,
                        answer: answer.to_string(),
                    });
                }
            }
        }
    }

    /// Whether a question is waiting for its answer line.
    pub fn has_pending_question(&self) -> bool {
        matches!(self.state, ParseState::AwaitingAnswer(_))
    }

    /// Consume the parser.  A dangling question is discarded.
    pub fn finish(self) -> Vec<QuizItem> {
        if let ParseState::AwaitingAnswer(question) = &self.state {
            log::debug!("dropping quiz question without an answer: {question}");
        }
        self.items
    }
}

impl Default for QuizParser {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pair() {
        let items = QuizParser::parse("Q: Fix \"I taked\"\nA: I took");
        assert_eq!(
            items,
            vec![QuizItem {
                question: "Fix \"I taked\"".into(),
                answer: "I took".into(),
            }]
        );
    }

    #[test]
    fn trailing_question_is_dropped() {
        let items = QuizParser::parse("Q: one?\nA: 1\nQ: two?");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "one?");
    }

    #[test]
    fn pending_state_is_observable() {
        let mut parser = QuizParser::new();
        assert!(!parser.has_pending_question());
        parser.feed_line("Q: dangling?");
        assert!(parser.has_pending_question());
        parser.feed_line("something unrelated");
        assert!(parser.has_pending_question());
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn blank_and_noise_lines_are_ignored() {
        let text = "Here is your quiz:\n\n  Q: Which is correct? \"I goes\" or \"I go\"?  \n\n  A: I go.\n\nGood luck!";
        let items = QuizParser::parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Which is correct? \"I goes\" or \"I go\"?");
        assert_eq!(items[0].answer, "I go.");
    }

    #[test]
    fn later_question_replaces_pending_one() {
        let items = QuizParser::parse("Q: first\nQ: second\nA: answer");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "second");
    }

    #[test]
    fn answer_without_question_is_ignored() {
        let items = QuizParser::parse("A: orphan\nQ: real?\nA: yes");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, "yes");
    }

    #[test]
    fn second_answer_does_not_reuse_question() {
        let items = QuizParser::parse("Q: once?\nA: one\nA: two");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, "one");
    }

    #[test]
    fn empty_answer_consumes_question() {
        let items = QuizParser::parse("Q: skipped?\nA:\nA: late");
        assert!(items.is_empty());
    }

    #[test]
    fn multiple_pairs_keep_order() {
        let text = "Q: 1?\nA: one\n\nQ: 2?\nA: two\n\nQ: 3?\nA: three\n";
        let answers: Vec<_> = QuizParser::parse(text)
            .into_iter()
            .map(|item| item.answer)
            .collect();
        assert_eq!(answers, ["one", "two", "three"]);
    }
}
