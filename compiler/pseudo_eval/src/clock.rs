//! Timestamps for action frames.
//!
//! Frames only need a non-decreasing timestamp; the source is injectable so
//! tests can assert exact traces. Enum dispatch keeps the per-frame call
//! static, the same way output handlers are dispatched elsewhere.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of frame timestamps.
///
/// A configured clock is cloned at the start of every compilation, so each
/// trace starts from the clock's initial state.
#[derive(Clone, Debug)]
pub enum Clock {
    /// Wall-clock milliseconds since the UNIX epoch.
    System(SystemClock),
    /// Deterministic counter.
    Steps(StepClock),
}

impl Clock {
    pub fn system() -> Self {
        Clock::System(SystemClock::default())
    }

    /// A counter starting at `start`, advancing by `step` per frame.
    pub fn steps(start: u64, step: u64) -> Self {
        Clock::Steps(StepClock { next: start, step })
    }

    /// Timestamp for the next frame. Never smaller than the previous one.
    #[inline]
    pub fn now(&mut self) -> u64 {
        match self {
            Self::System(c) => c.now(),
            Self::Steps(c) => c.now(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SystemClock {
    last: u64,
}

impl SystemClock {
    fn now(&mut self) -> u64 {
        // A clock set before the epoch reads as 0; the clamp below keeps
        // the sequence monotonic if the wall clock steps backwards.
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        self.last = self.last.max(millis);
        self.last
    }
}

#[derive(Clone, Debug)]
pub struct StepClock {
    next: u64,
    step: u64,
}

impl StepClock {
    fn now(&mut self) -> u64 {
        let current = self.next;
        self.next = self.next.saturating_add(self.step);
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clock_counts() {
        let mut clock = Clock::steps(100, 10);
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.now(), 110);
        assert_eq!(clock.now(), 120);
    }

    #[test]
    fn cloned_clock_restarts() {
        let configured = Clock::steps(0, 1);
        let mut first = configured.clone();
        first.now();
        first.now();
        let mut second = configured.clone();
        assert_eq!(second.now(), 0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = Clock::system();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a > 0);
    }
}
