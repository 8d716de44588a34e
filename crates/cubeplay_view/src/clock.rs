use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// Source of the current time for scheduling and debouncing.
pub trait Clock: fmt::Debug {
    /// Returns the current time.
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one clone and hand another to
/// a player.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}
impl Default for ManualClock {
    fn default() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }
}
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}
impl ManualClock {
    /// Constructs a clock stopped at the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: Duration) {
        self.offset.set(self.offset.get() + delta);
    }
    /// Moves the clock forward by a number of milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Returns the total time the clock has been advanced.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let t0 = other.now();

        clock.advance_ms(250);
        assert_eq!(other.now() - t0, Duration::from_millis(250));
        assert_eq!(other.elapsed(), Duration::from_millis(250));
    }
}
