//! Cancellable step cadence.
//!
//! The viewer runs a poll-style event loop, so the cadence is not a callback:
//! it is an owned deadline the frame loop polls against the current instant.
//! Dropping or replacing the timer is the cancellation side of the bargain; a
//! stopped session can never observe a stale fire because nothing outlives
//! the handle.

use std::time::{Duration, Instant};

/// Default interval between simulated step advances.
pub const STEP_INTERVAL: Duration = Duration::from_millis(5000);

/// A repeating deadline that reports how many times it has elapsed.
#[derive(Debug, Clone)]
pub struct StepTimer {
    interval: Duration,
    deadline: Instant,
}

impl StepTimer {
    /// Arm a timer that first fires `interval` from now.
    pub fn new(interval: Duration) -> Self {
        Self::new_at(Instant::now(), interval)
    }

    /// Arm a timer against an explicit instant. Used by tests and the
    /// headless runner, which drive a simulated clock.
    pub fn new_at(now: Instant, interval: Duration) -> Self {
        Self {
            interval,
            deadline: now + interval,
        }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Count elapsed fires up to `now` and re-arm past it.
    ///
    /// A frame that arrives late still yields every missed fire, so step
    /// advancement never drifts relative to wall time.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fires = 0;
        while now >= self.deadline {
            fires += 1;
            self.deadline += self.interval;
        }
        fires
    }

    /// Restart the cadence from `now`, discarding any pending fire.
    pub fn reset(&mut self, now: Instant) {
        self.deadline = now + self.interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn does_not_fire_before_the_interval() {
        let start = Instant::now();
        let mut timer = StepTimer::new_at(start, Duration::from_secs(5));
        assert_eq!(timer.poll(start + Duration::from_secs(4)), 0);
        assert_eq!(timer.poll(start + Duration::from_secs(5)), 1);
    }

    #[test]
    fn late_polls_report_every_missed_fire() {
        let start = Instant::now();
        let mut timer = StepTimer::new_at(start, Duration::from_secs(5));
        assert_eq!(timer.poll(start + Duration::from_secs(17)), 3);
        // Re-armed relative to the original cadence, not the poll instant.
        assert_eq!(timer.poll(start + Duration::from_secs(20)), 1);
    }

    #[test]
    fn reset_discards_pending_fires() {
        let start = Instant::now();
        let mut timer = StepTimer::new_at(start, Duration::from_secs(5));
        timer.reset(start + Duration::from_secs(4));
        assert_eq!(timer.poll(start + Duration::from_secs(8)), 0);
        assert_eq!(timer.poll(start + Duration::from_secs(9)), 1);
    }
}
