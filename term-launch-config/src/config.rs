//! Launcher configuration: struct, persistence, and validation.
//!
//! The config file is YAML and lives at `~/.config/term-launch/config.yaml`
//! (XDG convention on every non-Windows platform). Every field has a serde
//! default, so an empty or partial file is valid.

use crate::error::ConfigError;
use crate::types::{LogLevel, NewTerminalMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Launcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Smallest zoom factor a terminal may request; smaller values are clamped
    #[serde(default = "crate::defaults::zoom_minimum")]
    pub zoom_minimum: f64,

    /// Largest zoom factor a terminal may request; larger values are clamped
    #[serde(default = "crate::defaults::zoom_maximum")]
    pub zoom_maximum: f64,

    /// Whether a new terminal opens as a tab or as a window
    #[serde(default = "crate::defaults::new_terminal_mode")]
    pub new_terminal_mode: NewTerminalMode,

    /// Log level for the launcher's own diagnostics
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Optional override for the profiles file location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoom_minimum: crate::defaults::zoom_minimum(),
            zoom_maximum: crate::defaults::zoom_maximum(),
            new_terminal_mode: crate::defaults::new_terminal_mode(),
            log_level: crate::defaults::log_level(),
            profiles_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the zoom clamp range
    pub fn with_zoom_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.zoom_minimum = minimum;
        self.zoom_maximum = maximum;
        self
    }

    /// Builder: set the new-terminal mode
    pub fn with_new_terminal_mode(mut self, mode: NewTerminalMode) -> Self {
        self.new_terminal_mode = mode;
        self
    }

    /// Directory holding the launcher's config and profiles
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("term-launch")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("term-launch")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Path of the default config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Path of the profiles file, honouring the `profiles_file` override
    pub fn profiles_path(&self) -> PathBuf {
        self.profiles_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("profiles.yaml"))
    }

    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if !config_path.exists() {
            log::info!("No config file found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))
    }

    /// Load and validate configuration from a specific file
    ///
    /// An empty file yields the defaults.
    pub fn load_from(path: &Path) -> std::result::Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;

        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Check field values that serde cannot express.
    ///
    /// The zoom range must be positive, ordered, and contain the neutral
    /// factor 1.0.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.zoom_minimum.is_finite() || !self.zoom_maximum.is_finite() {
            return Err(ConfigError::Validation(
                "zoom_minimum and zoom_maximum must be finite".to_string(),
            ));
        }
        if self.zoom_minimum <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "zoom_minimum must be positive, got {}",
                self.zoom_minimum
            )));
        }
        if self.zoom_minimum > 1.0 || self.zoom_maximum < 1.0 {
            return Err(ConfigError::Validation(format!(
                "zoom range [{}, {}] must contain 1.0",
                self.zoom_minimum, self.zoom_maximum
            )));
        }
        Ok(())
    }
}
