//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Every section carries
//! `#[serde(default)]` so a hand-edited `settings.toml` may omit any field.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of any OpenAI-compatible API (no trailing `/v1`).
    pub base_url: String,
    /// Model used for the conversational reply.
    pub chat_model: String,
    /// Model used for grammar/vocabulary/phrase analysis and JSON repair.
    pub analysis_model: String,
    /// Model used to write quiz questions.
    pub quiz_model: String,
    /// Sampling temperature for replies.  `None` leaves it to the provider.
    pub reply_temperature: Option<f32>,
    pub analysis_temperature: f32,
    pub quiz_temperature: f32,
    /// Maximum seconds to wait for any single HTTP request.
    pub timeout_secs: u64,
    /// Total parse attempts for the feedback JSON, including the first one.
    pub repair_attempts: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            chat_model: "gpt-4".into(),
            analysis_model: "gpt-4o".into(),
            quiz_model: "gpt-4".into(),
            reply_temperature: None,
            analysis_temperature: 0.4,
            quiz_temperature: 0.7,
            timeout_secs: 60,
            repair_attempts: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Hosted speech-to-text and text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Synthesize every assistant reply to the system audio file.
    pub enabled: bool,
    pub transcription_model: String,
    pub tts_model: String,
    /// Voice id passed to the speech endpoint (e.g. `"alloy"`).
    pub voice: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            transcription_model: "gpt-4o-transcribe".into(),
            tts_model: "tts-1".into(),
            voice: "alloy".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TutorConfig
// ---------------------------------------------------------------------------

/// Conversation persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// First (and only) system message of every conversation.
    pub system_instruction: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            system_instruction: "You are a scenario adapter who takes on the given role and \
                assists with practice conversations and vocabulary building. Your responses \
                should be limited to three lines."
                .into(),
        }
    }
}

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

/// Optional overrides for where files live.  `None` uses [`AppPaths`] defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub output_dir: Option<PathBuf>,
    pub credential_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use english_tutor::config::AppConfig;
///
/// // Load, writing the defaults when the file is missing
/// let config = AppConfig::load_or_init().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub speech: SpeechConfig,
    pub tutor: TutorConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load from an explicit path.  Returns `Ok(AppConfig::default())` when
    /// the file does not exist.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the platform `settings.toml`, writing the defaults there first
    /// when the file does not exist yet.
    pub fn load_or_init() -> Result<Self> {
        Self::load_or_init_at(&AppPaths::new().settings_file)
    }

    /// Like [`load_or_init`](Self::load_or_init) with an explicit path.
    pub fn load_or_init_at(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::default();
        config.save_to(path)?;
        log::info!("Wrote default settings to {}", path.display());
        Ok(config)
    }

    /// Paths resolved with this config's storage overrides applied.
    pub fn paths(&self) -> AppPaths {
        AppPaths::with_storage(&self.storage)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.llm.base_url, loaded.llm.base_url);
        assert_eq!(original.llm.chat_model, loaded.llm.chat_model);
        assert_eq!(original.llm.analysis_model, loaded.llm.analysis_model);
        assert_eq!(original.llm.reply_temperature, loaded.llm.reply_temperature);
        assert_eq!(original.llm.repair_attempts, loaded.llm.repair_attempts);
        assert_eq!(original.speech.enabled, loaded.speech.enabled);
        assert_eq!(original.speech.voice, loaded.speech.voice);
        assert_eq!(
            original.tutor.system_instruction,
            loaded.tutor.system_instruction
        );
        assert_eq!(original.storage.output_dir, loaded.storage.output_dir);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.llm.chat_model, default.llm.chat_model);
        assert_eq!(config.speech.tts_model, default.speech.tts_model);
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config").join("settings.toml");

        let cfg = AppConfig::load_or_init_at(&path).expect("init");
        assert!(path.exists());
        assert_eq!(cfg.llm.chat_model, "gpt-4");

        let written = AppConfig::load_from(&path).expect("load");
        assert_eq!(written.llm.repair_attempts, cfg.llm.repair_attempts);
        assert_eq!(written.speech.voice, cfg.speech.voice);
    }

    #[test]
    fn existing_settings_are_not_overwritten() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[speech]\nvoice = \"nova\"\n").unwrap();

        let cfg = AppConfig::load_or_init_at(&path).expect("load");
        assert_eq!(cfg.speech.voice, "nova");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[speech]\nvoice = \"nova\"\n"
        );
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.llm.base_url, "https://api.openai.com");
        assert_eq!(cfg.llm.chat_model, "gpt-4");
        assert_eq!(cfg.llm.analysis_model, "gpt-4o");
        assert_eq!(cfg.llm.analysis_temperature, 0.4);
        assert_eq!(cfg.llm.quiz_temperature, 0.7);
        assert!(cfg.llm.reply_temperature.is_none());
        assert_eq!(cfg.llm.repair_attempts, 3);
        assert_eq!(cfg.speech.transcription_model, "gpt-4o-transcribe");
        assert_eq!(cfg.speech.voice, "alloy");
        assert!(cfg.speech.enabled);
        assert!(cfg.tutor.system_instruction.contains("three lines"));
        assert!(cfg.storage.output_dir.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[llm]\nchat_model = \"gpt-4o-mini\"\n\n[speech]\nenabled = false\n")
            .unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.llm.chat_model, "gpt-4o-mini");
        assert_eq!(cfg.llm.analysis_model, "gpt-4o");
        assert!(!cfg.speech.enabled);
        assert_eq!(cfg.speech.voice, "alloy");
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.llm.base_url = "http://localhost:11434".into();
        cfg.llm.reply_temperature = Some(0.9);
        cfg.llm.repair_attempts = 5;
        cfg.speech.voice = "nova".into();
        cfg.storage.output_dir = Some(PathBuf::from("/tmp/tutor"));

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.llm.base_url, "http://localhost:11434");
        assert_eq!(loaded.llm.reply_temperature, Some(0.9));
        assert_eq!(loaded.llm.repair_attempts, 5);
        assert_eq!(loaded.speech.voice, "nova");
        assert_eq!(loaded.storage.output_dir, Some(PathBuf::from("/tmp/tutor")));
    }
}
