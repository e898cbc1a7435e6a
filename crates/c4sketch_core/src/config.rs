//! Model and logging configuration.
//!
//! # Responsibility
//! - Describe construction-time settings for `DiagramModel`.
//! - Carry the log level/directory handed to `logging::init_logging`.
//!
//! # Invariants
//! - Missing fields fall back to defaults when deserialized.
//! - The root view heading is never blank.

use crate::logging::{default_log_level, init_logging};
use crate::model::kind::ElementKind;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Root heading is blank after trim.
    BlankRootName,
    /// Logging backend refused the configured level or directory.
    Logging(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankRootName => write!(f, "root display name must not be blank"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one diagram model instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Heading of the outermost view.
    pub root_display_name: String,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            root_display_name: ElementKind::SystemContext.label().to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ModelConfig {
    /// Validates model-level settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_display_name.trim().is_empty() {
            return Err(ConfigError::BlankRootName);
        }
        Ok(())
    }

    /// Starts file logging when `log_dir` is configured.
    ///
    /// Returns `Ok(false)` when no directory is set.
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        let Some(log_dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| ConfigError::Logging("log_dir is not valid UTF-8".to_string()))?;
        init_logging(self.log_level.as_str(), log_dir).map_err(ConfigError::Logging)?;
        Ok(true)
    }
}
