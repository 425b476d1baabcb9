//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings + credential):
//!   Windows: %APPDATA%\english-tutor\
//!   macOS:   ~/Library/Application Support/english-tutor/
//!   Linux:   ~/.config/english-tutor/
//!
//! Data dir (conversation log, feedback, quiz, audio):
//!   Windows: %LOCALAPPDATA%\english-tutor\
//!   macOS:   ~/Library/Application Support/english-tutor/
//!   Linux:   ~/.local/share/english-tutor/

use std::path::{Path, PathBuf};

use super::StorageConfig;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and the API key file.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Single-line API key file.
    pub credential_file: PathBuf,
    /// Directory holding every session artefact below.
    pub output_dir: PathBuf,
    /// Append-only `You:` / `System:` log.
    pub conversation_file: PathBuf,
    pub feedback_file: PathBuf,
    pub quiz_file: PathBuf,
    /// Last synthesized assistant reply.
    pub system_audio_file: PathBuf,
    /// Default location of the learner's recorded utterance.
    pub user_audio_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "english-tutor";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        Self::from_dirs(config_dir, data_dir)
    }

    /// Resolve paths, honouring the overrides in `storage`.
    pub fn with_storage(storage: &StorageConfig) -> Self {
        let mut paths = Self::new();
        if let Some(dir) = &storage.output_dir {
            let overridden = Self::from_dirs(paths.config_dir.clone(), dir.clone());
            paths = Self {
                credential_file: paths.credential_file,
                ..overridden
            };
        }
        if let Some(file) = &storage.credential_file {
            paths.credential_file = file.clone();
        }
        paths
    }

    /// Build the layout below explicit directories (useful for tests).
    pub fn from_dirs(config_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            settings_file: config_dir.join("settings.toml"),
            credential_file: config_dir.join("openai_auth_key.txt"),
            conversation_file: output_dir.join("conversation.txt"),
            feedback_file: output_dir.join("feedback.json"),
            quiz_file: output_dir.join("quiz.json"),
            system_audio_file: output_dir.join("system_audio.mp3"),
            user_audio_file: output_dir.join("user_audio.mp3"),
            config_dir,
            output_dir,
        }
    }

    /// Convenience for tests and tools that keep everything in one folder.
    pub fn in_dir(dir: &Path) -> Self {
        Self::from_dirs(dir.to_path_buf(), dir.to_path_buf())
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_non_empty() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths.output_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths
            .feedback_file
            .file_name()
            .is_some_and(|n| n == "feedback.json"));
        assert!(paths
            .conversation_file
            .file_name()
            .is_some_and(|n| n == "conversation.txt"));
    }

    #[test]
    fn storage_overrides_are_applied() {
        let storage = StorageConfig {
            output_dir: Some(PathBuf::from("/tmp/tutor-out")),
            credential_file: Some(PathBuf::from("/tmp/key.txt")),
        };
        let paths = AppPaths::with_storage(&storage);

        assert_eq!(paths.output_dir, PathBuf::from("/tmp/tutor-out"));
        assert_eq!(paths.quiz_file, PathBuf::from("/tmp/tutor-out/quiz.json"));
        assert_eq!(paths.credential_file, PathBuf::from("/tmp/key.txt"));
        // settings.toml never moves with the output dir
        assert_eq!(paths.settings_file, AppPaths::new().settings_file);
    }

    #[test]
    fn output_override_keeps_default_credential_location() {
        let storage = StorageConfig {
            output_dir: Some(PathBuf::from("/tmp/tutor-out")),
            credential_file: None,
        };
        let paths = AppPaths::with_storage(&storage);
        assert_eq!(paths.credential_file, AppPaths::new().credential_file);
    }
}
