//! Frame timestamp to elapsed-time conversion.
//!
//! Render loops hand out absolute, monotonically increasing timestamps
//! (milliseconds since some origin). The engine only needs the time that
//! passed since the previous frame, which is what [`FrameClock`] produces.

use std::time::Duration;

/// Turns per-frame timestamps into deltas.
///
/// The first frame after construction or [`reset`](FrameClock::reset) yields
/// zero, matching a loop that records its start time on the first callback.
///
/// # Example
///
/// ```rust
/// use spinwheel::FrameClock;
/// use std::time::Duration;
///
/// let mut clock = FrameClock::new();
/// assert_eq!(clock.delta(1000.0), Duration::ZERO);
/// assert_eq!(clock.delta(1016.0), Duration::from_millis(16));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Creates a clock that has not seen any frame yet.
    pub const fn new() -> Self {
        Self { last_ms: None }
    }

    /// Records `timestamp_ms` and returns the time since the previous frame.
    ///
    /// Timestamps that go backwards or are not finite yield zero and do not
    /// move the clock.
    pub fn delta(&mut self, timestamp_ms: f64) -> Duration {
        if !timestamp_ms.is_finite() {
            return Duration::ZERO;
        }
        let Some(prev) = self.last_ms else {
            self.last_ms = Some(timestamp_ms);
            return Duration::ZERO;
        };
        if timestamp_ms <= prev {
            return Duration::ZERO;
        }
        self.last_ms = Some(timestamp_ms);
        millis_to_duration(timestamp_ms - prev)
    }

    /// Forgets the previous frame.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Rounds a non-negative millisecond count to the nearest nanosecond.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn millis_to_duration(ms: f64) -> Duration {
    let nanos = (ms * 1_000_000.0).round();
    if nanos >= u64::MAX as f64 {
        Duration::MAX
    } else {
        Duration::from_nanos(nanos as u64)
    }
}
