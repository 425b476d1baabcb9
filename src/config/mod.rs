//! Configuration module for the English tutor.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! `AppPaths` for cross-platform data directories, TOML persistence via
//! `AppConfig::load` / `AppConfig::save`, and the startup credential loader.

pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::{ApiKey, CredentialError};
pub use paths::AppPaths;
pub use settings::{AppConfig, LlmConfig, SpeechConfig, StorageConfig, TutorConfig};
