//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::APP_NAME;
use crate::models::RosterLimits;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Directory holding the JSON data files
    pub data_dir: Option<PathBuf>,
}

/// Layout image rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// TrueType/OpenType font used for labels (system font if unset)
    pub font_path: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Courtboard/config.toml`
/// - macOS: `~/Library/Application Support/Courtboard/config.toml`
/// - Windows: `%APPDATA%\Courtboard\config.toml`
///
/// # Validation
///
/// - roster capacities must be positive
/// - `font_path` must point to an existing file (if set)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Rendering settings
    pub render: RenderConfig,
    /// Per-day sign-up limits
    pub roster: RosterLimits,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/Courtboard/`
    /// - macOS: `~/Library/Application Support/Courtboard/`
    /// - Windows: `%APPDATA%\Courtboard\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Data directory used when neither a flag nor the config names one.
    pub fn default_data_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("data"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.roster.max_players == 0 {
            anyhow::bail!("roster.max_players must be greater than 0");
        }
        if self.roster.max_waitlist == 0 {
            anyhow::bail!("roster.max_waitlist must be greater than 0");
        }

        if let Some(font) = &self.render.font_path {
            if !font.is_file() {
                anyhow::bail!("Font file does not exist: {}", font.display());
            }
        }

        Ok(())
    }

    /// Resolves the data directory: `flag`, then `paths.data_dir`, then
    /// [`Self::default_data_dir`].
    pub fn resolve_data_dir(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = flag {
            return Ok(dir.to_path_buf());
        }
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.data_dir, None);
        assert_eq!(config.render.font_path, None);
        assert_eq!(config.roster.max_players, 27);
        assert_eq!(config.roster.max_waitlist, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_capacities() {
        let mut config = Config::new();
        config.roster.max_players = 0;
        assert!(config.validate().is_err());

        config.roster.max_players = 10;
        config.roster.max_waitlist = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_font_path() {
        let temp_dir = TempDir::new().unwrap();
        let font = temp_dir.path().join("label.ttf");

        let mut config = Config::new();
        config.render.font_path = Some(font.clone());
        assert!(config.validate().is_err());

        fs::write(&font, b"not really a font").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.paths.data_dir = Some(PathBuf::from("/srv/courtboard"));
        config.roster.max_waitlist = 5;
        config.save_to(&config_file).unwrap();

        assert!(!config_file.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::new());
    }

    #[test]
    fn test_config_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[roster]\nmax_players = 12\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.roster.max_players, 12);
        assert_eq!(loaded.roster.max_waitlist, 20);
        assert_eq!(loaded.paths.data_dir, None);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[roster\n").unwrap();

        let err = Config::load_from(&config_file).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_resolve_data_dir_precedence() {
        let mut config = Config::new();
        let flag = PathBuf::from("/from/flag");

        config.paths.data_dir = Some(PathBuf::from("/from/config"));
        assert_eq!(config.resolve_data_dir(Some(&flag)).unwrap(), flag);
        assert_eq!(
            config.resolve_data_dir(None).unwrap(),
            PathBuf::from("/from/config")
        );

        config.paths.data_dir = None;
        let fallback = config.resolve_data_dir(None).unwrap();
        assert!(fallback.ends_with("Courtboard/data"));
    }
}
