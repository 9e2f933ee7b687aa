//! TOML Settings File
//!
//! Optional user defaults loaded from `~/.config/bonesay/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are applied with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (`BONEPATH`, `BONESAY_CONFIG`)
//! 3. TOML settings file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [balloon]
//! width = 60
//! word_wrap = true
//!
//! [figure]
//! name = "dog"
//! eyes = "^^"
//!
//! [output]
//! bold = true
//! style = "aurora"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::bone::{BoneConfig, FigureSelection};

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV: &str = "BONESAY_CONFIG";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read settings file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// TOML Structures
// =============================================================================

/// Balloon section
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BalloonToml {
    /// Wrap column
    pub width: Option<usize>,
    /// Whether to reflow the phrase
    pub word_wrap: Option<bool>,
}

/// Figure section
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FigureToml {
    /// Figure name
    pub name: Option<String>,
    pub eyes: Option<String>,
    pub tongue: Option<String>,
    /// Pick a random figure instead of `name`
    pub random: Option<bool>,
}

/// How rendered output is colored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Plain,
    Rainbow,
    Aurora,
}

/// Output section
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputToml {
    pub bold: Option<bool>,
    pub style: Option<OutputStyle>,
}

/// Root of the settings file
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub balloon: BalloonToml,
    pub figure: FigureToml,
    pub output: OutputToml,
}

impl Settings {
    /// `$XDG_CONFIG_HOME/bonesay/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bonesay").join("config.toml"))
    }

    /// Parse and validate settings text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file that must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text)?;
        debug!(path = ?path, "Loaded settings");
        Ok(settings)
    }

    /// Load from `BONESAY_CONFIG`, else the default path if present
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.balloon.width == Some(0) {
            return Err(ConfigError::ValidationError(
                "balloon.width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlay these settings onto a bone configuration
    pub fn apply(&self, config: &mut BoneConfig) {
        if let Some(width) = self.balloon.width {
            config.balloon_width = width;
        }
        if let Some(word_wrap) = self.balloon.word_wrap {
            config.word_wrap = word_wrap;
        }
        if let Some(name) = &self.figure.name {
            config.figure = FigureSelection::Named(name.clone());
        }
        if self.figure.random == Some(true) {
            config.figure = FigureSelection::Random;
        }
        if let Some(eyes) = &self.figure.eyes {
            config.set_eyes(eyes);
        }
        if let Some(tongue) = &self.figure.tongue {
            config.set_tongue(tongue);
        }
    }
}
