//! API key loading.
//!
//! The key lives in a single-line text file that is read exactly once at
//! startup.  A missing, unreadable or blank file is fatal: nothing else in the
//! application works without it.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading the credential file.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to read credential file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential file {0} is empty")]
    Empty(PathBuf),

    /// Only the first line may carry the key.
    #[error("credential file {0} must contain a single line")]
    MultiLine(PathBuf),
}

/// A loaded API key.  `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read and validate the key stored at `path`.
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        if !path.exists() {
            return Err(CredentialError::Missing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let key = raw.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty(path.to_path_buf()));
        }
        if key.lines().count() > 1 {
            return Err(CredentialError::MultiLine(path.to_path_buf()));
        }
        Ok(Self(key.to_string()))
    }

    /// Wrap a key obtained elsewhere (environment, tests).
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_and_trims_key() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "  sk-test-1234\n").unwrap();

        let key = ApiKey::load(&path).expect("key should load");
        assert_eq!(key.expose(), "sk-test-1234");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let err = ApiKey::load(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, CredentialError::Missing(_)));
    }

    #[test]
    fn blank_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "   \n\n").unwrap();

        let err = ApiKey::load(&path).unwrap_err();
        assert!(matches!(err, CredentialError::Empty(p) if p == path));
    }

    #[test]
    fn multi_line_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "sk-one\nsk-two\n").unwrap();

        let err = ApiKey::load(&path).unwrap_err();
        assert!(matches!(err, CredentialError::MultiLine(_)));
    }

    #[test]
    fn debug_hides_secret() {
        let key = ApiKey("sk-secret".into());
        assert!(!format!("{key:?}").contains("sk-secret"));
    }
}
