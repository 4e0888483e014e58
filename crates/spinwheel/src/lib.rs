#![forbid(unsafe_code)]
// Allow these clippy lints for angle/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::float_cmp)]

//! # Spinwheel
//!
//! The engine behind a prize wheel: a disk split into one equal sector per
//! participant, spun to a random stop under a fixed pointer.
//!
//! Spinwheel provides:
//! - **SpinEngine**: the `Idle → Spinning → Completed` state machine that owns
//!   the rotation, runs the eased spin timeline, and resolves the winner
//! - **SectorLayout**: the shared `360/N` partition used both for drawing and
//!   for resolving the winner
//! - **Palette**: cyclic sector colors with the reference darkening
//! - **FrameClock**: adapts render-loop timestamps to elapsed-time deltas
//!
//! The engine performs no I/O and owns no thread. The host drives it by
//! calling [`SpinEngine::tick`] once per frame.
//!
//! ## Example
//!
//! ```rust
//! use spinwheel::{Direction, SpinConfig, SpinEngine, SpinEvent};
//! use std::time::Duration;
//!
//! let names = ["Ann", "Bo", "Cat", "Dee"];
//! let mut engine = SpinEngine::with_seed(SpinConfig::default(), 42).unwrap();
//! engine.set_direction(Direction::Clockwise).unwrap();
//!
//! // Exactly 5.5 turns clockwise stops at 180°, inside sector 2.
//! engine.start_spin_with_turns(&names, 5.5).unwrap();
//! let event = engine.tick(Duration::from_secs(6));
//!
//! assert_eq!(engine.rotation(), -1980.0);
//! match event {
//!     Some(SpinEvent::Completed(winner)) => assert_eq!(winner.name, "Cat"),
//!     None => unreachable!(),
//! }
//!
//! // Clear the result; the wheel stays where it stopped.
//! assert!(engine.dismiss());
//! assert_eq!(engine.normalized_rotation(), 180.0);
//! ```
//!
//! ## Frame loop
//!
//! ```rust
//! use spinwheel::{FrameClock, SpinConfig, SpinEngine};
//!
//! let mut engine = SpinEngine::with_seed(SpinConfig::default(), 1).unwrap();
//! let mut clock = FrameClock::new();
//! engine.start_spin(&["Ann", "Bo"]).unwrap();
//!
//! // Timestamps as a render loop would hand them out, ~60 fps.
//! let mut now = 0.0;
//! while engine.is_spinning() {
//!     engine.tick(clock.delta(now));
//!     now += 16.7;
//! }
//! assert!(engine.winner().is_some());
//! ```

mod clock;
mod easing;
mod engine;
mod error;
mod geometry;

pub use clock::FrameClock;
pub use easing::{ease_out_cubic, progress};
pub use engine::{
    DEFAULT_MAX_PARTICIPANTS, DEFAULT_MAX_TURNS, DEFAULT_MIN_TURNS, DEFAULT_SPIN_DURATION,
    Direction, SpinConfig, SpinEngine, SpinEvent, SpinPhase, Winner, resolve_winner, time_seed,
};
pub use error::{GeometryError, SpinError};
pub use geometry::{
    DEFAULT_DARKEN, FULL_TURN, Palette, Rgb, Sector, SectorLayout, normalize_degrees,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clock::FrameClock;
    pub use crate::engine::{Direction, SpinConfig, SpinEngine, SpinEvent, SpinPhase, Winner};
    pub use crate::error::SpinError;
    pub use crate::geometry::{Palette, Rgb, Sector, SectorLayout};
}
