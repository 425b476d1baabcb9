//! Structured grammar / vocabulary / phrase feedback.
//!
//! * [`FeedbackRecord`] — the three fixed categories, each a mapping from the
//!   learner's original wording to the suggested replacement.
//! * [`FeedbackAnalyzer`] — asks the model for a record and repairs malformed
//!   JSON with a bounded number of follow-up prompts.

pub mod analyzer;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use analyzer::{FeedbackAnalyzer, FeedbackError};

// ---------------------------------------------------------------------------
// FeedbackCategory
// ---------------------------------------------------------------------------

/// The three fixed sections of a [`FeedbackRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCategory {
    Grammar,
    Vocabulary,
    Phrases,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 3] = [
        FeedbackCategory::Grammar,
        FeedbackCategory::Vocabulary,
        FeedbackCategory::Phrases,
    ];

    /// Section heading shown to the learner.
    pub fn title(&self) -> &'static str {
        match self {
            FeedbackCategory::Grammar => "Grammar",
            FeedbackCategory::Vocabulary => "Vocabulary",
            FeedbackCategory::Phrases => "Phrases",
        }
    }

    /// JSON key of this category in the feedback file.
    pub fn key(&self) -> &'static str {
        match self {
            FeedbackCategory::Grammar => "grammar_mistakes",
            FeedbackCategory::Vocabulary => "better_vocabulary",
            FeedbackCategory::Phrases => "better_phrases",
        }
    }
}

// ---------------------------------------------------------------------------
// FeedbackRecord
// ---------------------------------------------------------------------------

/// Feedback on the learner's side of the conversation.
///
/// Missing categories deserialize to empty mappings; unknown keys are
/// ignored.  Values must be strings, anything else is a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackRecord {
    /// Sentence with a grammar issue → corrected sentence.
    pub grammar_mistakes: BTreeMap<String, String>,
    /// Plain or repetitive word → more natural alternative.
    pub better_vocabulary: BTreeMap<String, String>,
    /// Awkward phrase → more fluent or formal version.
    pub better_phrases: BTreeMap<String, String>,
}

impl FeedbackRecord {
    /// Strictly parse model output as a single JSON object.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Canonical on-disk form: pretty-printed, two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn entries(&self, category: FeedbackCategory) -> &BTreeMap<String, String> {
        match category {
            FeedbackCategory::Grammar => &self.grammar_mistakes,
            FeedbackCategory::Vocabulary => &self.better_vocabulary,
            FeedbackCategory::Phrases => &self.better_phrases,
        }
    }

    /// Every category paired with its (possibly empty) entries.
    pub fn sections(&self) -> impl Iterator<Item = (FeedbackCategory, &BTreeMap<String, String>)> {
        FeedbackCategory::ALL
            .into_iter()
            .map(move |category| (category, self.entries(category)))
    }

    pub fn is_empty(&self) -> bool {
        self.sections().all(|(_, entries)| entries.is_empty())
    }

    /// Plain-text report: a heading per category, then `original` on one line
    /// and `→ suggestion` on the next.  Empty categories keep their heading.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (category, entries) in self.sections() {
            out.push_str(&format!("== {} ==\n", category.title()));
            for (original, suggestion) in entries {
                out.push_str(&format!("{original}\n  → {suggestion}\n"));
            }
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
