//! Configuration management for Notemirror
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (NOTEMIRROR_*)
//! 3. Config file (~/.config/notemirror/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::repository::NotesRef;
use crate::review::NOTES_REF;
use crate::{Error, Result};

/// Notes storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Notes ref holding review requests
    pub reviews_ref: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            reviews_ref: NOTES_REF.to_string(),
        }
    }
}

/// Defaults applied when creating review requests
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Requester recorded on new requests when none is given
    pub requester: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Notes configuration
    pub notes: NotesConfig,

    /// Review request defaults
    pub review: ReviewConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/notemirror/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("notemirror").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - NOTEMIRROR_REVIEWS_REF: Notes ref holding review requests
    /// - NOTEMIRROR_REQUESTER: Default requester
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(reviews_ref) = std::env::var("NOTEMIRROR_REVIEWS_REF") {
            self.notes.reviews_ref = reviews_ref;
        }

        if let Ok(requester) = std::env::var("NOTEMIRROR_REQUESTER") {
            self.review.requester = Some(requester);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, reviews_ref: Option<String>) -> Self {
        if let Some(r) = reviews_ref {
            self.notes.reviews_ref = r;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(reviews_ref: Option<String>) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()
            .with_cli_overrides(reviews_ref);
        config.validate()?;
        Ok(config)
    }

    /// The configured notes ref for review requests
    pub fn reviews_ref(&self) -> NotesRef {
        NotesRef::new(self.notes.reviews_ref.clone())
    }

    fn validate(&self) -> Result<()> {
        if !self.notes.reviews_ref.starts_with("refs/notes/") {
            return Err(Error::Config(format!(
                "reviews_ref must be under refs/notes/, got '{}'",
                self.notes.reviews_ref
            )));
        }
        Ok(())
    }
}
