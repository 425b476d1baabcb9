//! Quiz items derived from feedback.
//!
//! * [`QuizItem`] — one question/answer pair, stored as a JSON array.
//! * [`QuizParser`] — extracts items from the model's `Q:` / `A:` text.
//! * [`FlashcardDeck`] / [`FlashcardCursor`] — question-then-answer navigation.

pub mod flashcards;
pub mod parser;

use serde::{Deserialize, Serialize};

pub use flashcards::{CardView, FlashcardCursor, FlashcardDeck};
pub use parser::QuizParser;

/// A single flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub answer: String,
}
