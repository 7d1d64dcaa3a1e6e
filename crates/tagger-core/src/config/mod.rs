//! Configuration management for the tagger.
//!
//! Configuration is loaded from a TOML file in the platform config directory.
//! Every section falls back to its defaults when omitted.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prediction fusion thresholds
    pub fusion: FusionConfig,

    /// Dominant color extraction
    pub palette: PaletteConfig,

    /// Tag synthesis
    pub tagging: TaggingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Taxonomy file location
    pub taxonomy: TaxonomyConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.tagger.tagger/config.toml
    /// - Linux: ~/.config/tagger/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\tagger\config\config.toml
    ///
    /// Falls back to ~/.tagger/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "tagger", "tagger")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".tagger").join("config.toml")
            })
    }

    /// Get the resolved taxonomy directory (with ~ expansion).
    pub fn taxonomy_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.taxonomy.dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Path of the taxonomy file for a named dataset.
    pub fn taxonomy_path(&self, dataset: &str) -> PathBuf {
        self.taxonomy_dir().join(format!("{dataset}.toml"))
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
