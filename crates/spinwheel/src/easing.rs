//! Timeline progress and easing.
//!
//! The spin decelerates with an ease-out cubic: fast at the start, slowing to
//! a stop. The curve is monotonic with `ease(0) = 0` and `ease(1) = 1`.

use std::time::Duration;

/// Ease-out cubic, `1 - (1 - t)^3`.
///
/// `t` is clamped to `[0, 1]`; non-finite input is treated as `0`.
///
/// # Example
///
/// ```rust
/// use spinwheel::ease_out_cubic;
///
/// assert_eq!(ease_out_cubic(0.0), 0.0);
/// assert_eq!(ease_out_cubic(1.0), 1.0);
/// assert_eq!(ease_out_cubic(0.5), 0.875);
/// ```
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Fraction of the timeline that has elapsed, `min(elapsed / duration, 1)`.
///
/// A zero-length timeline is complete immediately.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn endpoints() {
        assert!(ease_out_cubic(0.0).abs() < TOLERANCE);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
        assert_eq!(ease_out_cubic(f64::NAN), 0.0);
        assert_eq!(ease_out_cubic(f64::INFINITY), 0.0);
    }

    #[test]
    fn decelerates() {
        // Equal time steps cover less angle as the spin goes on.
        let first = ease_out_cubic(0.1) - ease_out_cubic(0.0);
        let middle = ease_out_cubic(0.55) - ease_out_cubic(0.45);
        let last = ease_out_cubic(1.0) - ease_out_cubic(0.9);
        assert!(first > middle);
        assert!(middle > last);
    }

    #[test]
    fn progress_saturates() {
        let six = Duration::from_millis(6000);
        assert_eq!(progress(Duration::ZERO, six), 0.0);
        assert!((progress(Duration::from_millis(3000), six) - 0.5).abs() < TOLERANCE);
        assert_eq!(progress(Duration::from_millis(9000), six), 1.0);
    }

    #[test]
    fn zero_duration_is_complete() {
        assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
    }
}
