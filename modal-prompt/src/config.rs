//! Configuration for modal-prompt.
//!
//! Configuration is loaded from `<config dir>/modal-prompt/prompt.toml` and
//! provides option overrides for each dialog kind plus logging settings.
//! Option keys use the same camelCase names as the option records:
//!
//! ```toml
//! [confirm]
//! confirmText = "Yes"
//! cancelText = "No"
//!
//! [alert]
//! fade = false
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use etcetera::base_strategy::{choose_base_strategy, BaseStrategy};
use serde::Deserialize;

use crate::options::{DialogDefaults, PartialAlertOptions, PartialConfirmOptions};

/// Configuration loaded from `prompt.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub confirm: PartialConfirmOptions,
    pub alert: PartialAlertOptions,
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub level: String,
    pub suppressed_patterns: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            level: "info".to_string(),
            suppressed_patterns: vec!["shown.bs.modal".to_string()],
        }
    }
}

impl PromptConfig {
    /// Location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let strategy = choose_base_strategy()?;
        Ok(strategy.config_dir().join("modal-prompt").join("prompt.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Falls back to defaults if the file doesn't exist.
    /// Returns an error only if the file exists but is malformed.
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str::<PromptConfig>(&content)?;
        Ok(config)
    }

    /// Option defaults with the configured overrides applied.
    #[must_use]
    pub fn defaults(&self) -> DialogDefaults {
        DialogDefaults::from_overrides(self.confirm.clone(), self.alert.clone())
    }

    /// Set the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}
