//! Configuration file location and persistent settings

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::args::OutputFormat;
use crate::phonetic::KeyLevel;

/// Get the configuration directory for mlphone
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine configuration directory")?;
    Ok(base.join("mlphone"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Get the config file path with optional override
pub fn config_file_path_with_override(custom_path: Option<PathBuf>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => {
            validate_config_path(&path)?;
            Ok(path)
        }
        None => default_config_path(),
    }
}

/// Validate that a config file path has .json extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(()),
        Some(ext) => Err(anyhow::anyhow!(
            "Config file must have .json extension, got .{}. Please use a .json file.",
            ext
        )),
        None => Err(anyhow::anyhow!(
            "Config file must have .json extension. Please add .json to the filename."
        )),
    }
}

/// User configuration stored in config file
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Default key level (all three keys are printed when unset)
    #[serde(default)]
    pub level: Option<KeyLevel>,
    /// Default output format
    #[serde(default)]
    pub format: Option<OutputFormat>,
    /// Colored output
    #[serde(default)]
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration from the default or a custom path.
    ///
    /// A missing file yields the defaults.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let path = config_file_path_with_override(custom_path)?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to the default or a custom path
    pub fn save(&self, custom_path: Option<PathBuf>) -> Result<PathBuf> {
        let path = config_file_path_with_override(custom_path)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(&self, level: Option<KeyLevel>, format: Option<OutputFormat>) -> Self {
        Self {
            level: level.or(self.level),
            format: format.or(self.format),
            color: self.color,
        }
    }

    /// Effective output format
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Whether colored output is enabled
    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }
}
