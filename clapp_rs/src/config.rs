//! Configuration file support.
//!
//! An application may ship or look up a TOML file to override output color
//! and progress bar defaults:
//!
//! ```toml
//! color = "never"
//!
//! [progress]
//! width = 30
//! duration_ms = 250
//! easing = "ease-out"
//! fill_shape = "="
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::output::{ColorMode, Painter};
use crate::progress::{DEFAULT_DURATION, DEFAULT_WIDTH, Easing, ProgressBar};

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClappConfig {
    pub color: ColorMode,
    pub progress: ProgressConfig,
}

/// Progress bar defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub width: usize,
    pub duration_ms: u64,
    pub easing: Easing,
    pub empty_shape: String,
    pub fill_shape: String,
    pub fill_color: String,
    pub background_color: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        let bar = ProgressBar::default();
        Self {
            width: DEFAULT_WIDTH,
            duration_ms: DEFAULT_DURATION.as_millis() as u64,
            easing: bar.easing,
            empty_shape: bar.empty_shape,
            fill_shape: bar.fill_shape,
            fill_color: bar.fill_color,
            background_color: bar.background_color,
        }
    }
}

impl ClappConfig {
    /// Parse a TOML document, rejecting unusable values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClappConfig = toml::from_str(content)?;
        if config.progress.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load config from a specific path.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Progress bar configured from the `[progress]` section and color mode.
    pub fn progress_bar(&self) -> ProgressBar {
        let p = &self.progress;
        ProgressBar {
            width: p.width,
            duration: Duration::from_millis(p.duration_ms),
            easing: p.easing,
            empty_shape: p.empty_shape.clone(),
            fill_shape: p.fill_shape.clone(),
            fill_color: p.fill_color.clone(),
            background_color: p.background_color.clone(),
            painter: Painter::new(self.color),
        }
    }
}
