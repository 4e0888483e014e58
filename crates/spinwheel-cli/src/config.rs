//! Runtime configuration for `spin`.
//!
//! [`Config`] is the single source of truth for every tunable, independent of
//! whether it came from a TOML file or the command line. Flags given on the
//! command line override the file.
//!
//! # File format
//!
//! ```toml
//! seed = 42
//!
//! [spin]
//! duration_ms = 6000
//! min_turns = 5.0
//! max_turns = 10.0
//! max_participants = 18
//!
//! [wheel]
//! direction = "counterclockwise"
//! darken = 30
//! palette = ["#CC4629", "#29CC46", "#293FCC"]
//!
//! [display]
//! fps = 60
//! color = "auto"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spinwheel::{
    DEFAULT_DARKEN, Direction, GeometryError, Palette, SpinConfig, SpinError, time_seed,
};

use crate::cli::Cli;

/// Frame rate used when none is configured.
pub const DEFAULT_FPS: u32 = 60;

/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 1000;

/// Everything `spin` can be told.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Seed for spins and shuffles. A time-based seed is used when absent.
    pub seed: Option<u64>,

    /// Spin timeline and participant cap.
    pub spin: SpinConfig,

    /// Wheel appearance and direction.
    pub wheel: WheelConfig,

    /// Terminal output.
    pub display: DisplayConfig,
}

/// Wheel appearance and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WheelConfig {
    /// Direction of every spin.
    pub direction: Direction,

    /// Amount subtracted from each color channel before drawing.
    pub darken: u8,

    /// Sector colors as hex strings; the built-in palette when absent.
    pub palette: Option<Vec<String>>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            darken: DEFAULT_DARKEN,
            palette: None,
        }
    }
}

/// Terminal output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Frames per second for the spin timeline.
    pub fps: u32,

    /// Color output mode.
    pub color: ColorMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            color: ColorMode::Auto,
        }
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Let the terminal and environment decide.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Builds the effective configuration: the `--config` file (or defaults)
    /// overlaid with command-line flags, then validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the result is invalid.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields with the flags that were given.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(direction) = cli.direction {
            self.wheel.direction = direction;
        }
        if let Some(ms) = cli.duration_ms {
            self.spin.duration = Duration::from_millis(ms);
        }
        if let Some(fps) = cli.fps {
            self.display.fps = fps;
        }
        if cli.force_color {
            self.display.color = ColorMode::Always;
        } else if cli.no_color {
            self.display.color = ColorMode::Never;
        }
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spin.validate()?;
        if self.display.fps == 0 || self.display.fps > MAX_FPS {
            return Err(ConfigError::InvalidFps(self.display.fps));
        }
        self.palette()?;
        Ok(())
    }

    /// The sector palette.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Palette`] for an empty list or a bad hex color.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        match &self.wheel.palette {
            Some(list) => Ok(Palette::from_hex_list(list)?),
            None => Ok(Palette::default()),
        }
    }

    /// Time between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.display.fps.max(1)
    }

    /// The configured seed, or one derived from the current time.
    #[must_use]
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(time_seed)
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {path}: {message}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        message: String,
    },

    /// The config file is not valid TOML for this schema.
    #[error("invalid config file: {0}")]
    Parse(String),

    /// Spin settings are inconsistent.
    #[error(transparent)]
    Spin(#[from] SpinError),

    /// The palette could not be built.
    #[error("invalid palette: {0}")]
    Palette(#[from] GeometryError),

    /// Frame rate out of range.
    #[error("fps must be between 1 and 1000, got {0}")]
    InvalidFps(u32),
}
