#![forbid(unsafe_code)]

//! # spinwheel-cli
//!
//! Terminal host for the [`spinwheel`] engine. It collects participants,
//! drives the spin frame by frame, and announces the winner.
//!
//! The binary is a thin wrapper around [`run`].

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod render;

use std::io::{self, Write};

use anyhow::Context;
use tracing::info;

pub use app::{App, AppError, Pacing, SpinReport, read_names_file, reports_json};
pub use cli::{Cli, LogLevel, OutputFormat};
pub use config::{ColorMode, Config, ConfigError};
pub use render::TextRenderer;

/// Collects names: the names file first, then positional arguments.
///
/// # Errors
///
/// Returns an error if the names file cannot be read.
pub fn collect_names(cli: &Cli) -> Result<Vec<String>, AppError> {
    let mut names = match &cli.names_file {
        Some(path) => read_names_file(path)?,
        None => Vec::new(),
    };
    names.extend(cli.names.iter().cloned());
    Ok(names)
}

fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => {
            colored::control::set_override(true);
            true
        }
        ColorMode::Never => {
            colored::control::set_override(false);
            false
        }
        ColorMode::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
    }
}

/// Runs `spin` with parsed arguments.
///
/// Results go to stdout; the live status line of `--animate` goes to stderr.
///
/// # Errors
///
/// Returns an error for bad configuration, rejected names, a wheel with no
/// participants, or failed output.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::resolve(cli).context("failed to load configuration")?;
    let color = use_color(config.display.color);
    let names = collect_names(cli)?;

    let mut app = App::new(config, &names, color)?;
    if cli.shuffle {
        app.shuffle();
    } else if cli.sort {
        app.sort();
    }

    let mut stdout = io::stdout().lock();
    if cli.sectors {
        writeln!(stdout, "{}", app.sector_table())?;
        return Ok(());
    }

    let pacing = if cli.animate {
        Pacing::RealTime
    } else {
        Pacing::Headless
    };
    let mut stderr = io::stderr();
    let mut reports = Vec::new();
    for round in 1..=cli.spins.max(1) {
        let report = app.spin(round, pacing, &mut stderr)?;
        if cli.format == OutputFormat::Text {
            if cli.spins > 1 {
                write!(stdout, "[{round}] ")?;
            }
            writeln!(stdout, "{}", app.announce(&report))?;
        }
        reports.push(report);
    }

    if cli.format == OutputFormat::Json {
        writeln!(stdout, "{}", reports_json(&reports)?)?;
    }
    info!(spins = reports.len(), "done");
    Ok(())
}
