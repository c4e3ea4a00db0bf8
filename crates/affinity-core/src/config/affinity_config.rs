//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CheckConfig, ExportConfig, LibraryTagConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AffinityConfig {
    pub check: CheckConfig,
    pub export: ExportConfig,
    pub library: Vec<LibraryTagConfig>,
    /// Fallback log filter when `AFFINITY_LOG` is unset. Default: "info".
    pub log_level: Option<String>,
}

impl AffinityConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Reject patterns and rules that would silently never match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.check.exempt_parent_types {
            glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            })?;
        }
        if self.library.iter().any(|rule| rule.path.trim().is_empty()) {
            return Err(ConfigError::EmptyLibraryPath);
        }
        Ok(())
    }
}
