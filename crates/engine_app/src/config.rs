//! Engine configuration.
//!
//! Configuration is a JSON document whose fields all have defaults, so an
//! empty object (or no file at all) yields a runnable 800×600, 60 FPS engine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_math::{Color, Rect};
use serde::Deserialize;
use tracing::info;

/// The environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "ENGINE_CONFIG";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the engine cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Startup configuration for the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title.
    pub title: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Maximum number of frames to run (0 = unlimited).
    pub max_frames: u64,
    /// Colour the frame is cleared to before render systems run.
    pub clear_color: Color,
    /// Start with debug overlays enabled.
    pub debug: bool,
    /// Start with system updates paused.
    pub paused: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "bonecollector".to_string(),
            width: 800,
            height: 600,
            target_fps: 60,
            max_frames: 0,
            clear_color: Color::CHARCOAL,
            debug: false,
            paused: false,
        }
    }
}

impl EngineConfig {
    /// Load the config file named by [`CONFIG_PATH_ENV`], or the defaults if
    /// the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => {
                info!("no {CONFIG_PATH_ENV} set, using default config");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has a zero dimension",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Wall-clock budget of one frame.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }

    /// Camera covering the whole window, anchored at the world origin.
    #[must_use]
    pub fn camera(&self) -> Rect {
        Rect::from_size(
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }
}
