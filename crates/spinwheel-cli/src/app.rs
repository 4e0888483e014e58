//! The host loop: roster in, frames through the engine, winners out.
//!
//! [`App`] plays the part a graphical front end would: it owns the roster and
//! the engine, paces frames, shows progress, and reacts to the completion
//! event. The engine itself never sleeps or prints.

use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Instant;

use rand_pcg::Pcg64;
use roster::{Roster, RosterError};
use serde::Serialize;
use spinwheel::{FrameClock, SpinEngine, SpinError, SpinEvent, Winner, normalize_degrees};
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::render::TextRenderer;

/// PCG stream for roster shuffles, distinct from the engine's stream.
const SHUFFLE_STREAM: u128 = 0x5851_f42d_4c95_7f2d;

/// Upper bound on frames for a single spin before giving up.
const MAX_FRAMES: u64 = 10_000_000;

/// Errors the host can hit.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A participant name was rejected.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// The engine refused an operation.
    #[error(transparent)]
    Spin(#[from] SpinError),

    /// The names file could not be read.
    #[error("cannot read names file {path}: {source}")]
    NamesFile {
        /// File that was requested.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding JSON output failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The timeline never reached its end.
    #[error("spin did not complete after {0} frames")]
    Stalled(u64),
}

/// How frames are paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Frames are computed back to back on a synthetic clock.
    Headless,
    /// Frames are spaced in wall-clock time and a status line is drawn.
    RealTime,
}

/// Result of one spin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinReport {
    /// 1-based spin number.
    pub round: u32,
    /// The winning participant.
    pub winner: Winner,
    /// Resting rotation in degrees (cumulative).
    pub rotation: f64,
    /// Resting rotation folded into `[0, 360)`.
    pub normalized: f64,
    /// Frames rendered during the spin.
    pub frames: u64,
}

/// Reads names from a file: one per line, blank lines and `#` comments skipped.
///
/// # Errors
///
/// Returns [`AppError::NamesFile`] if the file cannot be read.
pub fn read_names_file(path: &Path) -> Result<Vec<String>, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::NamesFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect())
}

/// Encodes spin reports as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`AppError::Json`] if encoding fails.
pub fn reports_json(reports: &[SpinReport]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// A configured wheel with its participants.
#[derive(Debug)]
pub struct App {
    config: Config,
    roster: Roster,
    engine: SpinEngine,
    renderer: TextRenderer,
    seed: u64,
}

impl App {
    /// Builds the roster from `names` and an engine from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid config or a rejected name.
    pub fn new<S: AsRef<str>>(config: Config, names: &[S], color: bool) -> Result<Self, AppError> {
        config.validate()?;
        let seed = config.effective_seed();
        let roster = Roster::from_names(config.spin.max_participants, names)?;

        let mut engine = SpinEngine::with_seed(config.spin.clone(), seed)?;
        engine.set_direction(config.wheel.direction)?;

        let renderer = TextRenderer::new(config.palette()?, config.wheel.darken, color);
        info!(
            participants = roster.len(),
            seed,
            direction = %config.wheel.direction,
            "wheel ready"
        );

        Ok(Self {
            config,
            roster,
            engine,
            renderer,
            seed,
        })
    }

    /// The participants in wheel order.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The engine.
    #[must_use]
    pub const fn engine(&self) -> &SpinEngine {
        &self.engine
    }

    /// Shuffles the roster with the app's seed.
    pub fn shuffle(&mut self) {
        let mut rng = Pcg64::new(self.seed.into(), SHUFFLE_STREAM);
        self.roster.shuffle(&mut rng);
    }

    /// Sorts the roster alphabetically.
    pub fn sort(&mut self) {
        self.roster.sort();
    }

    /// Runs one spin to completion and returns its result.
    ///
    /// A previous result is dismissed first, so consecutive spins continue
    /// from where the wheel last stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine refuses to spin (for example with no
    /// participants) or output cannot be written.
    pub fn spin<W: Write>(
        &mut self,
        round: u32,
        pacing: Pacing,
        out: &mut W,
    ) -> Result<SpinReport, AppError> {
        self.engine.dismiss();
        self.engine.start_spin(self.roster.names())?;

        let interval = self.config.frame_interval();
        let interval_ms = interval.as_secs_f64() * 1000.0;
        let started = Instant::now();
        let mut clock = FrameClock::new();
        let mut synthetic_ms = 0.0;
        let mut frames = 0u64;

        let winner = loop {
            if frames >= MAX_FRAMES {
                return Err(AppError::Stalled(frames));
            }
            let now_ms = match pacing {
                Pacing::Headless => {
                    synthetic_ms += interval_ms;
                    synthetic_ms
                }
                Pacing::RealTime => {
                    thread::sleep(interval);
                    started.elapsed().as_secs_f64() * 1000.0
                }
            };
            frames += 1;

            let event = self.engine.tick(clock.delta(now_ms));
            if pacing == Pacing::RealTime {
                write!(
                    out,
                    "\r{}",
                    self.renderer.status_line(&self.engine, self.roster.names())
                )?;
                out.flush()?;
            }
            if let Some(SpinEvent::Completed(winner)) = event {
                break winner;
            }
        };
        if pacing == Pacing::RealTime {
            writeln!(out)?;
        }

        let rotation = self.engine.rotation();
        debug!(round, frames, winner = %winner.name, "spin finished");
        Ok(SpinReport {
            round,
            winner,
            rotation,
            normalized: normalize_degrees(rotation),
            frames,
        })
    }

    /// Text announcing a report's winner.
    #[must_use]
    pub fn announce(&self, report: &SpinReport) -> String {
        self.renderer.announcement(&report.winner)
    }

    /// The sector table for the current roster.
    #[must_use]
    pub fn sector_table(&self) -> String {
        self.renderer.sector_table(self.roster.names())
    }
}
