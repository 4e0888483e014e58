//! Command-line interface for `spin`.
//!
//! # Examples
//!
//! ```bash
//! # Spin once over four names
//! spin Ann Bo Cat Dee
//!
//! # Reproducible result, counter-clockwise, watched in real time
//! spin --seed 42 --direction ccw --animate Ann Bo Cat Dee
//!
//! # Names from a file, three spins in a row, JSON output
//! spin --names-file team.txt --spins 3 --format json
//!
//! # Show how the wheel is divided
//! spin --sectors Ann Bo Cat
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use spinwheel::Direction;

/// Spin a prize wheel and pick a winner.
///
/// Each name gets an equal slice of the wheel, in the order given. The wheel
/// spins between five and ten full turns, slows to a stop, and the name under
/// the pointer wins.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(
    name = "spin",
    author,
    version,
    about = "Spin a prize wheel and pick a winner",
    long_about = "Spin a prize wheel and pick a winner. Each participant gets an equal \
                  sector; the wheel decelerates to a random stop under a fixed pointer."
)]
pub struct Cli {
    /// Participant names, in wheel order
    pub names: Vec<String>,

    /// Read additional names from a file (one per line, `#` starts a comment)
    #[arg(long, short = 'f', env = "SPIN_NAMES_FILE")]
    pub names_file: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, short = 'c', env = "SPIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for reproducible spins and shuffles
    #[arg(long, short = 's', env = "SPIN_SEED")]
    pub seed: Option<u64>,

    /// Spin direction: clockwise (cw) or counterclockwise (ccw)
    #[arg(long, short = 'd', env = "SPIN_DIRECTION")]
    pub direction: Option<Direction>,

    /// Spin duration in milliseconds
    #[arg(long, env = "SPIN_DURATION_MS")]
    pub duration_ms: Option<u64>,

    /// Frames per second for the spin timeline
    #[arg(long)]
    pub fps: Option<u32>,

    /// Number of consecutive spins; each continues from where the last stopped
    #[arg(long, short = 'n', default_value_t = 1)]
    pub spins: u32,

    /// Shuffle the names before spinning
    #[arg(long, conflicts_with = "sort")]
    pub shuffle: bool,

    /// Sort the names alphabetically before spinning
    #[arg(long)]
    pub sort: bool,

    /// Play the spin in real time with a live status line
    #[arg(long, short = 'a')]
    pub animate: bool,

    /// Print the sector layout and exit
    #[arg(long)]
    pub sectors: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Force color output off
    ///
    /// Without this flag `NO_COLOR` and `CLICOLOR_FORCE` are honoured.
    #[arg(long)]
    pub no_color: bool,

    /// Force color output on, even when `NO_COLOR` is set
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// How results are written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable announcement
    #[default]
    Text,
    /// One JSON array with every spin's result
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Get log level based on verbosity.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        LogLevel::from_verbosity(self.verbose)
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show info messages
    Info,
    /// Show debug messages
    Debug,
    /// Show all messages including trace
    Trace,
}

impl LogLevel {
    /// Maps a `-v` count to a level.
    #[must_use]
    pub const fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
