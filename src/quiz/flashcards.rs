//! Flashcard navigation over a quiz.
//!
//! Each card is shown question-first.  `next` reveals the answer, a second
//! `next` moves to the following question; stepping past the last card ends
//! the quiz.  `prev` on a question goes back one card, on an answer it hides
//! the answer again.  The cursor is transient UI state and never persisted.

use super::QuizItem;

/// Position within a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashcardCursor {
    pub current_index: usize,
    pub showing_question: bool,
}

impl Default for FlashcardCursor {
    fn default() -> Self {
        Self {
            current_index: 0,
            showing_question: true,
        }
    }
}

/// What the learner should currently see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardView<'a> {
    Question {
        number: usize,
        total: usize,
        question: &'a str,
    },
    Answer {
        number: usize,
        total: usize,
        question: &'a str,
        answer: &'a str,
    },
    Finished,
}

/// A quiz plus a cursor into it.
#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    items: Vec<QuizItem>,
    cursor: FlashcardCursor,
}

impl FlashcardDeck {
    /// Start a session at the first question.  `None` for an empty quiz.
    pub fn start(items: Vec<QuizItem>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items,
            cursor: FlashcardCursor::default(),
        })
    }

    pub fn cursor(&self) -> FlashcardCursor {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor.current_index >= self.items.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor.current_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        !self.is_finished()
    }

    pub fn view(&self) -> CardView<'_> {
        let Some(item) = self.items.get(self.cursor.current_index) else {
            return CardView::Finished;
        };
        let number = self.cursor.current_index + 1;
        let total = self.items.len();
        if self.cursor.showing_question {
            CardView::Question {
                number,
                total,
                question: &item.question,
            }
        } else {
            CardView::Answer {
                number,
                total,
                question: &item.question,
                answer: &item.answer,
            }
        }
    }

    /// Reveal the answer, or advance to the next question.  No-op once finished.
    pub fn next(&mut self) {
        if self.is_finished() {
            return;
        }
        if self.cursor.showing_question {
            self.cursor.showing_question = false;
        } else {
            self.cursor.showing_question = true;
            self.cursor.current_index += 1;
        }
    }

    /// Hide the answer, or step back one question (saturating at the first).
    pub fn prev(&mut self) {
        if self.cursor.showing_question {
            self.cursor.current_index = self.cursor.current_index.saturating_sub(1);
        }
        self.cursor.showing_question = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
