//! Flip configuration system
//!
//! This crate provides centralized configuration for the flip engine and demo,
//! loading settings from `flip.toml` with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up by [`FlipConfig::load_or_default`].
pub const DEFAULT_CONFIG_FILE: &str = "flip.toml";

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`FlipConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FlipConfig {
    /// Cycle-level animation defaults
    pub animation: AnimationConfig,
    /// Viewport used by hosts that have no window of their own
    pub viewport: ViewportConfig,
}

/// Animation defaults applied when an element declares no override
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of each transition in milliseconds
    pub duration_ms: f32,
    /// Easing curve name (`easeOut`, `ease-in-out`, `backOut`, ...)
    pub ease: String,
}

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            ease: "easeOut".to_string(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl FlipConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default location (flip.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("FLIP_DURATION_MS") {
            if let Ok(duration) = val.parse::<f32>() {
                self.animation.duration_ms = duration;
            }
        }
        if let Ok(ease) = std::env::var("FLIP_EASE") {
            if !ease.is_empty() {
                self.animation.ease = ease;
            }
        }

        if let Ok(val) = std::env::var("FLIP_VIEWPORT_WIDTH") {
            if let Ok(width) = val.parse::<f64>() {
                self.viewport.width = width;
            }
        }
        if let Ok(val) = std::env::var("FLIP_VIEWPORT_HEIGHT") {
            if let Ok(height) = val.parse::<f64>() {
                self.viewport.height = height;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from flip.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
