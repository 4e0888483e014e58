//! The spin engine state machine.
//!
//! A [`SpinEngine`] owns the wheel's rotation, the spin direction, and the
//! current phase. It moves through `Idle → Spinning → Completed → Idle`:
//!
//! - [`start_spin`](SpinEngine::start_spin) draws a random number of turns and
//!   starts the timeline from the current resting angle.
//! - [`tick`](SpinEngine::tick) advances the timeline by an elapsed-time delta.
//!   The host decides how frames are scheduled.
//! - When the timeline ends the winner is resolved from the exact analytic end
//!   angle and a [`SpinEvent::Completed`] is returned.
//! - [`dismiss`](SpinEngine::dismiss) clears the winner; the wheel stays where
//!   it stopped.
//!
//! # Example
//!
//! ```rust
//! use spinwheel::{SpinConfig, SpinEngine, SpinEvent, SpinPhase};
//! use std::time::Duration;
//!
//! let names = ["Ann", "Bo", "Cat", "Dee"];
//! let mut engine = SpinEngine::with_seed(SpinConfig::default(), 7).unwrap();
//!
//! engine.start_spin(&names).unwrap();
//! assert_eq!(engine.phase(), SpinPhase::Spinning);
//!
//! let mut event = None;
//! while event.is_none() {
//!     event = engine.tick(Duration::from_millis(16));
//! }
//!
//! let Some(SpinEvent::Completed(winner)) = event else { unreachable!() };
//! assert_eq!(engine.winner(), Some(&winner));
//! assert!(names.contains(&winner.name.as_str()));
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand_pcg::Pcg64;
use tracing::{debug, trace, warn};

use crate::easing::{ease_out_cubic, progress};
use crate::error::SpinError;
use crate::geometry::{FULL_TURN, SectorLayout, normalize_degrees};

/// Length of one spin.
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(6000);

/// Fewest full turns a spin can make.
pub const DEFAULT_MIN_TURNS: f64 = 5.0;

/// Upper (exclusive) bound on full turns.
pub const DEFAULT_MAX_TURNS: f64 = 10.0;

/// Largest participant list a wheel accepts.
pub const DEFAULT_MAX_PARTICIPANTS: usize = 18;

/// PCG stream selector for seeded engines.
const PCG_STREAM: u128 = 0x0a02_bdbf_7bb3_c0a7;

/// Tunables for a [`SpinEngine`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SpinConfig {
    /// How long a spin takes from start to stop.
    #[cfg_attr(feature = "serde", serde(rename = "duration_ms", with = "millis"))]
    pub duration: Duration,
    /// Inclusive lower bound on sampled full turns.
    pub min_turns: f64,
    /// Exclusive upper bound on sampled full turns.
    pub max_turns: f64,
    /// Largest participant list accepted by `start_spin`.
    pub max_participants: usize,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_SPIN_DURATION,
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
            max_participants: DEFAULT_MAX_PARTICIPANTS,
        }
    }
}

impl SpinConfig {
    /// Checks that the turn range is usable and the participant cap is set.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<(), SpinError> {
        if !self.min_turns.is_finite() || !self.max_turns.is_finite() {
            return Err(SpinError::InvalidConfig(
                "turn bounds must be finite".to_string(),
            ));
        }
        if self.min_turns <= 0.0 {
            return Err(SpinError::InvalidConfig(format!(
                "min_turns must be positive, got {}",
                self.min_turns
            )));
        }
        if self.min_turns >= self.max_turns {
            return Err(SpinError::InvalidConfig(format!(
                "min_turns ({}) must be less than max_turns ({})",
                self.min_turns, self.max_turns
            )));
        }
        if self.max_participants == 0 {
            return Err(SpinError::InvalidConfig(
                "max_participants must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Which way the wheel turns.
///
/// `Clockwise` decreases the rotation angle over time, `CounterClockwise`
/// increases it. The same sign is used for the animation and the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Direction {
    /// Rotation angle decreases.
    #[default]
    Clockwise,
    /// Rotation angle increases.
    CounterClockwise,
}

impl Direction {
    /// The opposite direction.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// `-1.0` for clockwise, `+1.0` for counter-clockwise.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clockwise => "clockwise",
            Self::CounterClockwise => "counterclockwise",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clockwise" | "cw" => Ok(Self::Clockwise),
            "counterclockwise" | "counter-clockwise" | "anticlockwise" | "ccw" => {
                Ok(Self::CounterClockwise)
            }
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// Observable phase of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinPhase {
    /// Waiting for a spin request.
    Idle,
    /// The timeline is running.
    Spinning,
    /// The wheel stopped and a winner is held.
    Completed,
}

/// The participant selected by a finished spin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Winner {
    /// Sector index, also the position in the participant list.
    pub index: usize,
    /// Participant name as supplied at spin start.
    pub name: String,
}

/// Notifications emitted by [`SpinEngine::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinEvent {
    /// The spin finished and this participant won.
    Completed(Winner),
}

/// Resolves the winner for a wheel resting at `final_rotation`.
///
/// Uses the same [`SectorLayout`] partition the renderer draws with. Returns
/// `None` when there are no participants or the angle is not finite.
///
/// # Example
///
/// ```rust
/// use spinwheel::resolve_winner;
///
/// let names = ["Ann", "Bo", "Cat", "Dee"];
/// assert_eq!(resolve_winner(-1980.0, &names).unwrap().name, "Cat");
/// assert!(resolve_winner::<&str>(0.0, &[]).is_none());
/// ```
pub fn resolve_winner<S: AsRef<str>>(final_rotation: f64, participants: &[S]) -> Option<Winner> {
    let index = SectorLayout::new(participants.len()).index_at(final_rotation)?;
    Some(Winner {
        index,
        name: participants[index].as_ref().to_owned(),
    })
}

/// Data for the spin in flight.
#[derive(Debug, Clone)]
struct Spin {
    /// Names captured at spin start; later roster edits do not affect this spin.
    participants: Vec<String>,
    /// Rotation when the spin started.
    origin: f64,
    /// Signed total rotation for the spin.
    delta: f64,
    /// Time since the spin started.
    elapsed: Duration,
}

impl Spin {
    /// The exact resting angle, independent of how frames were sampled.
    fn target(&self) -> f64 {
        self.origin + self.delta
    }
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    Spinning(Spin),
    Completed(Winner),
}

/// Owns rotation, direction, and the spin timeline.
///
/// Generic over the random source so tests and replays can supply their own;
/// the default is a seeded [`Pcg64`].
#[derive(Debug, Clone)]
pub struct SpinEngine<R = Pcg64> {
    config: SpinConfig,
    state: State,
    rotation: f64,
    direction: Direction,
    rng: R,
}

impl SpinEngine<Pcg64> {
    /// Creates an engine seeded from the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: SpinConfig) -> Result<Self, SpinError> {
        Self::with_seed(config, time_seed())
    }

    /// Creates an engine whose spins are reproducible for a given seed.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::InvalidConfig`] if the configuration is invalid.
    pub fn with_seed(config: SpinConfig, seed: u64) -> Result<Self, SpinError> {
        Self::with_rng(config, Pcg64::new(seed.into(), PCG_STREAM))
    }
}

impl<R: Rng> SpinEngine<R> {
    /// Creates an engine drawing spin magnitudes from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::InvalidConfig`] if the configuration is invalid.
    pub fn with_rng(config: SpinConfig, rng: R) -> Result<Self, SpinError> {
        config.validate()?;
        Ok(Self {
            config,
            state: State::Idle,
            rotation: 0.0,
            direction: Direction::default(),
            rng,
        })
    }

    /// Starts a spin with a uniformly sampled number of turns in
    /// `[min_turns, max_turns)`.
    ///
    /// Valid from `Idle` or `Completed`; any held winner is cleared.
    ///
    /// # Errors
    ///
    /// - [`SpinError::AlreadySpinning`] while a spin is in flight.
    /// - [`SpinError::NoParticipants`] for an empty list.
    /// - [`SpinError::TooManyParticipants`] above the configured maximum.
    pub fn start_spin<S: AsRef<str>>(&mut self, participants: &[S]) -> Result<(), SpinError> {
        self.check_can_start(participants.len())?;
        let turns = self
            .rng
            .random_range(self.config.min_turns..self.config.max_turns);
        self.begin(participants, turns);
        Ok(())
    }

    /// Starts a spin of exactly `turns` full turns.
    ///
    /// # Errors
    ///
    /// Same as [`start_spin`](Self::start_spin), plus
    /// [`SpinError::InvalidTurns`] if `turns` is not finite and positive.
    pub fn start_spin_with_turns<S: AsRef<str>>(
        &mut self,
        participants: &[S],
        turns: f64,
    ) -> Result<(), SpinError> {
        self.check_can_start(participants.len())?;
        if !turns.is_finite() || turns <= 0.0 {
            return Err(rejected(SpinError::InvalidTurns(turns)));
        }
        self.begin(participants, turns);
        Ok(())
    }

    fn check_can_start(&self, count: usize) -> Result<(), SpinError> {
        if self.is_spinning() {
            return Err(rejected(SpinError::AlreadySpinning));
        }
        if count == 0 {
            return Err(rejected(SpinError::NoParticipants));
        }
        if count > self.config.max_participants {
            return Err(rejected(SpinError::TooManyParticipants {
                count,
                max: self.config.max_participants,
            }));
        }
        Ok(())
    }

    fn begin<S: AsRef<str>>(&mut self, participants: &[S], turns: f64) {
        let origin = self.rotation;
        let delta = self.direction.sign() * turns * FULL_TURN;
        debug!(
            participants = participants.len(),
            turns,
            origin,
            delta,
            direction = %self.direction,
            "spin started"
        );
        self.state = State::Spinning(Spin {
            participants: participants.iter().map(|p| p.as_ref().to_owned()).collect(),
            origin,
            delta,
            elapsed: Duration::ZERO,
        });
    }

    /// Sets the direction for the next spin. Only allowed while idle.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::DirectionLocked`] outside `Idle`.
    pub fn set_direction(&mut self, direction: Direction) -> Result<(), SpinError> {
        if self.phase() != SpinPhase::Idle {
            return Err(rejected(SpinError::DirectionLocked));
        }
        self.direction = direction;
        Ok(())
    }

    /// Flips the direction and returns the new one. Only allowed while idle.
    ///
    /// # Errors
    ///
    /// Returns [`SpinError::DirectionLocked`] outside `Idle`.
    pub fn toggle_direction(&mut self) -> Result<Direction, SpinError> {
        self.set_direction(self.direction.toggled())?;
        Ok(self.direction)
    }

    /// Advances the spin by `dt`.
    ///
    /// Returns [`SpinEvent::Completed`] exactly once, on the tick that reaches
    /// the end of the timeline. Ticks outside `Spinning` do nothing.
    pub fn tick(&mut self, dt: Duration) -> Option<SpinEvent> {
        let State::Spinning(spin) = &mut self.state else {
            return None;
        };
        spin.elapsed = spin.elapsed.saturating_add(dt);
        self.step()
    }

    /// Moves the spin to `elapsed` time since it started.
    ///
    /// Time never runs backwards: an earlier `elapsed` than already reached
    /// leaves the timeline where it is.
    pub fn advance_to(&mut self, elapsed: Duration) -> Option<SpinEvent> {
        let State::Spinning(spin) = &mut self.state else {
            return None;
        };
        spin.elapsed = spin.elapsed.max(elapsed);
        self.step()
    }

    fn step(&mut self) -> Option<SpinEvent> {
        let State::Spinning(spin) = &self.state else {
            return None;
        };
        let t = progress(spin.elapsed, self.config.duration);
        if t < 1.0 {
            let rotation = spin.origin + spin.delta * ease_out_cubic(t);
            trace!(t, rotation, "spin tick");
            self.rotation = rotation;
            return None;
        }
        self.complete()
    }

    fn complete(&mut self) -> Option<SpinEvent> {
        let State::Spinning(spin) = std::mem::replace(&mut self.state, State::Idle) else {
            return None;
        };
        let final_rotation = spin.target();
        self.rotation = final_rotation;

        // Participants are checked non-empty at start, so this always resolves.
        let winner = resolve_winner(final_rotation, &spin.participants)?;
        debug!(
            winner = %winner.name,
            index = winner.index,
            rotation = final_rotation,
            normalized = normalize_degrees(final_rotation),
            "spin completed"
        );
        self.state = State::Completed(winner.clone());
        Some(SpinEvent::Completed(winner))
    }

    /// Clears the winner and returns to `Idle`.
    ///
    /// Returns false (and does nothing) unless the engine is `Completed`, so
    /// repeated calls are harmless.
    pub fn dismiss(&mut self) -> bool {
        if !matches!(self.state, State::Completed(_)) {
            return false;
        }
        self.state = State::Idle;
        debug!(rotation = self.rotation, "winner dismissed");
        true
    }
}

impl<R> SpinEngine<R> {
    /// Current phase.
    pub const fn phase(&self) -> SpinPhase {
        match self.state {
            State::Idle => SpinPhase::Idle,
            State::Spinning(_) => SpinPhase::Spinning,
            State::Completed(_) => SpinPhase::Completed,
        }
    }

    /// Whether a spin is in flight.
    pub const fn is_spinning(&self) -> bool {
        matches!(self.state, State::Spinning(_))
    }

    /// Cumulative rotation in degrees. Unbounded and signed.
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation folded into `[0, 360)`.
    pub fn normalized_rotation(&self) -> f64 {
        normalize_degrees(self.rotation)
    }

    /// Direction used by the next (or current) spin.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The winner, present only while `Completed`.
    pub const fn winner(&self) -> Option<&Winner> {
        match &self.state {
            State::Completed(winner) => Some(winner),
            _ => None,
        }
    }

    /// Timeline progress: `0.0` when idle, `1.0` when completed.
    pub fn progress(&self) -> f64 {
        match &self.state {
            State::Idle => 0.0,
            State::Spinning(spin) => progress(spin.elapsed, self.config.duration),
            State::Completed(_) => 1.0,
        }
    }

    /// Sector currently under the pointer for a wheel of `count` sectors.
    pub fn sector_under_pointer(&self, count: usize) -> Option<usize> {
        SectorLayout::new(count).index_at(self.rotation)
    }

    /// Whether `start_spin` would accept a list of `count` participants.
    ///
    /// Hosts use this to enable or disable their spin control.
    pub const fn can_spin(&self, count: usize) -> bool {
        !self.is_spinning() && count >= 1 && count <= self.config.max_participants
    }

    /// The engine's configuration.
    pub const fn config(&self) -> &SpinConfig {
        &self.config
    }
}

fn rejected(err: SpinError) -> SpinError {
    warn!(error = %err, "spin operation rejected");
    err
}

/// A seed derived from the system clock, for spins that need not be
/// reproducible.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(42, |d| d.as_nanos() as u64)
}
