//! JSON stores for the feedback record and the quiz.

use std::path::{Path, PathBuf};

use super::{read_optional, write_replace, StoreError};
use crate::feedback::FeedbackRecord;
use crate::quiz::QuizItem;

// ---------------------------------------------------------------------------
// FeedbackStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored record, or an empty one when nothing has been generated yet.
    pub fn load(&self) -> Result<FeedbackRecord, StoreError> {
        match read_optional(&self.path)? {
            Some(text) if !text.trim().is_empty() => {
                FeedbackRecord::parse(&text).map_err(|e| StoreError::json(&self.path, e))
            }
            _ => Ok(FeedbackRecord::default()),
        }
    }

    /// Replace the stored record.
    pub fn save(&self, record: &FeedbackRecord) -> Result<(), StoreError> {
        let json = record
            .to_pretty_json()
            .map_err(|e| StoreError::json(&self.path, e))?;
        write_replace(&self.path, json.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// QuizStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct QuizStore {
    path: PathBuf,
}

impl QuizStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored quiz, or an empty one when nothing has been generated yet.
    pub fn load(&self) -> Result<Vec<QuizItem>, StoreError> {
        match read_optional(&self.path)? {
            Some(text) if !text.trim().is_empty() => {
                serde_json::from_str(&text).map_err(|e| StoreError::json(&self.path, e))
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Replace the stored quiz.  Serialization happens before the file is
    /// touched, and the file itself is swapped in with a rename.
    pub fn save(&self, items: &[QuizItem]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items).map_err(|e| StoreError::json(&self.path, e))?;
        write_replace(&self.path, json.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
