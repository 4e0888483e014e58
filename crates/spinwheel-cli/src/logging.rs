//! Tracing setup for the binary.
//!
//! Logs go to stderr so stdout stays clean for results. `RUST_LOG` takes
//! precedence over the `-v` count.

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
