//! Configuration loading, validation, and management for CodeLoom.
//!
//! Loads configuration from `~/.codeloom/config.toml` with environment
//! variable overrides (`CODELOOM_*`). Missing file means defaults; a
//! present but invalid file is an error at startup, not at first use.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root configuration structure.
///
/// Maps directly to `~/.codeloom/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which model backend to use ("rule-based" is the only built-in)
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Ceiling on one model call, in seconds
    #[serde(default = "default_model_timeout_secs")]
    pub model_timeout_secs: u64,

    /// How many characters of each workspace file enter the turn context
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Which intent classifier to use ("rules" is the only built-in)
    #[serde(default = "default_classifier")]
    pub classifier: String,
}

fn default_backend() -> String {
    "rule-based".into()
}
fn default_model_timeout_secs() -> u64 {
    30
}
fn default_preview_chars() -> usize {
    100
}
fn default_classifier() -> String {
    "rules".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            model_timeout_secs: default_model_timeout_secs(),
            preview_chars: default_preview_chars(),
            classifier: default_classifier(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load from the default location, then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if let Ok(backend) = std::env::var("CODELOOM_BACKEND") {
            config.backend = backend;
        }
        if let Ok(secs) = std::env::var("CODELOOM_MODEL_TIMEOUT_SECS") {
            config.model_timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("bad CODELOOM_MODEL_TIMEOUT_SECS: {secs}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// `~/.codeloom`
    pub fn config_dir() -> PathBuf {
        home_dir().join(".codeloom")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.model_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "model_timeout_secs must be at least 1".into(),
            ));
        }
        if self.preview_chars == 0 {
            return Err(ConfigError::Invalid(
                "preview_chars must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(windows)]
fn home_dir() -> PathBuf {
    std::env::var("USERPROFILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(not(windows))]
fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.backend, "rule-based");
        assert_eq!(config.model_timeout_secs, 30);
        assert_eq!(config.preview_chars, 100);
        assert_eq!(config.classifier, "rules");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.backend, "rule-based");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "model_timeout_secs = 5").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.model_timeout_secs, 5);
        assert_eq!(config.backend, "rule-based");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "model_timeout_secs = 0").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not toml {{{{").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
