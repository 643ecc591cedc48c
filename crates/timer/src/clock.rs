//! Time sources for the timer.
//!
//! The timer never reads the system clock directly. It asks a [`Clock`] for
//! the current time in milliseconds, which keeps every timing path testable
//! with a [`ManualClock`].

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

/// Source of monotonic time in milliseconds since an arbitrary fixed epoch.
///
/// Readings must never decrease for the lifetime of the process. Any
/// `Fn() -> f64` closure is a clock.
///
/// # Example
///
/// ```rust
/// use perf_timer::Clock;
///
/// let fixed = || 42.0;
/// assert_eq!(fixed.now(), 42.0);
/// ```
pub trait Clock: Send + Sync {
    /// Current time in milliseconds.
    fn now(&self) -> f64;
}

impl<F> Clock for F
where
    F: Fn() -> f64 + Send + Sync,
{
    fn now(&self) -> f64 {
        self()
    }
}

/// Clock backed by [`Instant`], with its epoch at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    /// Create a clock whose epoch is now
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock whose time only moves when told to.
///
/// Clones share the same reading, so a test can hand one clone to the timer
/// and keep another to advance time.
///
/// # Example
///
/// ```rust
/// use perf_timer::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(100.0);
/// assert_eq!(clock.now(), 100.0);
/// ```
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<f64>>,
}

impl ManualClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock reading `ms`
    pub fn starting_at(ms: f64) -> Self {
        Self {
            now: Arc::new(Mutex::new(ms)),
        }
    }

    /// Set the current reading.
    ///
    /// Moving backwards is allowed so tests can exercise out-of-order marks.
    pub fn set(&self, ms: f64) {
        *self.now.lock() = ms;
    }

    /// Move the clock forward by `ms`
    pub fn advance(&self, ms: f64) {
        *self.now.lock() += ms;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock()
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock")
            .field("now", &*self.now.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::new().now(), 0.0);
        assert_eq!(ManualClock::starting_at(12.5).now(), 12.5);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();

        clock.advance(40.0);
        other.advance(2.5);
        assert_eq!(clock.now(), 42.5);

        other.set(7.0);
        assert_eq!(clock.now(), 7.0);
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[test]
    fn closures_are_clocks() {
        let clock = || 3.25;
        assert_eq!(Clock::now(&clock), 3.25);
    }
}
