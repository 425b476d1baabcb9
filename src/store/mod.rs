//! File-backed persistence.
//!
//! Three independent resources, one owner each:
//!
//! | Resource        | Type              | Write mode                  |
//! |-----------------|-------------------|-----------------------------|
//! | conversation    | [`TranscriptLog`] | append; truncate on reset   |
//! | feedback        | [`FeedbackStore`] | full overwrite              |
//! | quiz            | [`QuizStore`]     | full overwrite (temp+rename)|
//!
//! Missing or blank files read back as empty results.  There is no locking;
//! a single session is the only writer.

pub mod records;
pub mod transcript;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use records::{FeedbackStore, QuizStore};
pub use transcript::TranscriptLog;

/// Errors from reading or writing session files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Create `path`'s parent directory if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}

/// Replace `path` with `contents` so readers see either the old or the new
/// file, never a prefix of the new one.
pub(crate) fn write_replace(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

/// Read a file, treating a missing file as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}
