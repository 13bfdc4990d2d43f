//! Configuration management for overlaykit
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DIALOG_CLOSE_ACTION, DIALOG_ROOT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub dialog: DialogConfig,
    pub logging: LoggingConfig,
}

/// Dialog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Tag of the element created for each dialog
    pub host_tag: String,
    /// Action reported when Escape closes a dialog ("" = Escape does nothing)
    pub escape_key_action: String,
    /// Action reported when a scrim click closes a dialog ("" = ignore clicks)
    pub scrim_click_action: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file
    pub enabled: bool,
    /// Maximum level: "off", "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Log file override; defaults to the data directory
    pub file: Option<PathBuf>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            host_tag: DIALOG_ROOT.to_string(),
            escape_key_action: DIALOG_CLOSE_ACTION.to_string(),
            scrim_click_action: DIALOG_CLOSE_ACTION.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`; call [`Config::validate`] first.
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level).with_context(|| format!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Ok(xdg_config) = Self::get_default_config_path() {
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let host_tag = &self.dialog.host_tag;
        // Custom element names: lowercase, start with a letter, contain a hyphen
        let valid_tag = host_tag.contains('-')
            && host_tag.starts_with(|c: char| c.is_ascii_lowercase())
            && host_tag
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.' || c == '_');
        if !valid_tag {
            anyhow::bail!(
                "host_tag '{}' is not a valid custom element name (lowercase, must contain '-')",
                host_tag
            );
        }

        if self.dialog.escape_key_action.trim() != self.dialog.escape_key_action {
            anyhow::bail!("escape_key_action cannot have surrounding whitespace");
        }
        if self.dialog.scrim_click_action.trim() != self.dialog.scrim_click_action {
            anyhow::bail!("scrim_click_action cannot have surrounding whitespace");
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# overlaykit configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
