//! Append-only conversation log.
//!
//! Each exchange is written as two lines:
//!
//! ```text
//! You: <learner text>
//! System: <assistant reply>
//! ```
//!
//! The log is independent of the in-memory message list; it is what the
//! analysis prompt reads.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::{ensure_parent, read_optional, StoreError};

#[derive(Debug, Clone)]
pub struct TranscriptLog {
    path: PathBuf,
}

impl TranscriptLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one learner/assistant exchange.
    pub fn append_exchange(&self, user: &str, reply: &str) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        write!(file, "You: {user}\nSystem: {reply}\n").map_err(|e| StoreError::io(&self.path, e))
    }

    /// Full log text; empty when the file does not exist yet.
    pub fn read(&self) -> Result<String, StoreError> {
        Ok(read_optional(&self.path)?.unwrap_or_default())
    }

    /// Truncate the log to zero bytes (creating it if needed).
    pub fn clear(&self) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        std::fs::File::create(&self.path)
            .map(|_| ())
            .map_err(|e| StoreError::io(&self.path, e))
    }
}
