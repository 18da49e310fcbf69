//! Time calculation utilities for tweens
//!
//! All times are offsets on the runtime's virtual clock, so these are pure
//! functions of their inputs.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0)
///
/// # Arguments
/// * `start` - Clock time the animation starts at (after any delay)
/// * `duration` - Total animation duration
/// * `now` - Current clock time
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Duration, duration: Duration, now: Duration) -> f64 {
    if now < start {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now - start;
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Duration, duration: Duration, now: Duration) -> bool {
    now >= start + duration
}

/// Progress of a scroll position through a `[start, end]` range
///
/// Degenerate ranges (`end <= start`) behave like a step at `start`.
#[inline]
pub fn range_progress(position: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if position >= start { 1.0 } else { 0.0 };
    }
    ((position - start) / (end - start)).clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Milliseconds helper for configuration values
#[inline]
pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let start = ms(1000);
        assert_eq!(progress(start, ms(500), ms(900)), 0.0);
        assert!((progress(start, ms(500), ms(1250)) - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, ms(500), ms(2000)), 1.0);
        assert!(is_complete(start, ms(500), ms(1500)));
        assert!(!is_complete(start, ms(500), ms(1499)));
    }

    #[test]
    fn test_progress_zero_duration() {
        assert_eq!(progress(ms(10), Duration::ZERO, ms(10)), 1.0);
    }

    #[test]
    fn test_range_progress() {
        assert_eq!(range_progress(-10.0, 0.0, 100.0), 0.0);
        assert!((range_progress(25.0, 0.0, 100.0) - 0.25).abs() < 1e-9);
        assert_eq!(range_progress(150.0, 0.0, 100.0), 1.0);
        assert_eq!(range_progress(5.0, 5.0, 5.0), 1.0);
        assert_eq!(range_progress(4.0, 5.0, 5.0), 0.0);
    }
}
