//! Device wiring and backend selection.
//!
//! Loaded from `<config_dir>/joycursor/config.toml` (or the path in
//! `JOYCURSOR_CONFIG`). A missing file is written with defaults so the device always
//! boots; a file that fails to parse is an error. Motion parameters are fixed and
//! deliberately absent here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

const CONFIG_ENV: &str = "JOYCURSOR_CONFIG";
const CONFIG_DIR: &str = "joycursor";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// BCM pin numbers of the joystick and buttons
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct GpioPins {
    pub up: u8,
    pub down: u8,
    pub left: u8,
    pub right: u8,
    pub primary: u8,
    pub secondary: u8,
}

impl Default for GpioPins {
    fn default() -> Self {
        Self {
            up: 17,
            down: 27,
            left: 22,
            right: 23,
            primary: 5,
            secondary: 6,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum InputConfig {
    Gpio(GpioPins),
    Gamepad {
        /// Left stick deflection (0.0-1.0) that counts as a direction
        stick_threshold: f32,
    },
    /// Arrow keys in the simulator window
    #[default]
    Keyboard,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisplayBackend {
    #[default]
    Window,
    Headless,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub backend: DisplayBackend,
    pub fullscreen: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// One of trace, debug, info, warn, error
    pub log_level: String,
    pub input: InputConfig,
    pub display: DisplayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            input: InputConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log_level()?;

        if self.input == InputConfig::Keyboard && self.display.backend == DisplayBackend::Headless
        {
            return Err(ConfigError::ValidationError(
                "keyboard input needs the window display backend".to_string(),
            ));
        }

        if let InputConfig::Gamepad { stick_threshold } = self.input {
            if !(0.0..1.0).contains(&stick_threshold) {
                return Err(ConfigError::ValidationError(format!(
                    "stick_threshold must be in [0.0, 1.0), got {}",
                    stick_threshold
                )));
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log_level.parse::<Level>().map_err(|_| {
            ConfigError::ValidationError(format!("unknown log level '{}'", self.log_level))
        })
    }

    /// Where the config file lives
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Reads the config at `path`, writing the defaults there first if it is missing
    pub async fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|source| ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            })?;

        if !exists {
            let config = AppConfig::default();
            config.save(path).await?;
            return Ok(config);
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })?;
        Self::from_toml_str(&content)
    }

    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        tokio::fs::write(path, content).await.map_err(write_error)
    }
}
