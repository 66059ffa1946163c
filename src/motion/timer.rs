//! Step timing against a free-running microsecond clock.

use crate::config::units::{Micros, StepsPerSec};

/// Source of monotonic microsecond timestamps.
///
/// The counter may wrap; consumers only ever look at wrapping differences.
pub trait Clock {
    /// Current timestamp.
    fn now(&self) -> Micros;
}

impl<F> Clock for F
where
    F: Fn() -> Micros,
{
    fn now(&self) -> Micros {
        self()
    }
}

/// Microsecond clock backed by the operating system.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Start a clock reading zero now.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self {
            created_at: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> Micros {
        // Truncation is the wrap.
        Micros(self.created_at.elapsed().as_micros() as u32)
    }
}

/// Tracks when the last step happened and how long to wait for the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimer {
    /// Interval between steps; `None` means "do not step".
    interval_us: Option<u32>,

    /// Timestamp of the most recently issued step.
    last_step: Micros,
}

impl StepTimer {
    /// Create a timer that never fires until a rate is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the interval from a step rate.
    #[inline]
    pub fn set_rate(&mut self, rate: StepsPerSec) {
        self.interval_us = rate.interval_us();
    }

    /// Current step interval in microseconds.
    #[inline]
    pub fn interval_us(&self) -> Option<u32> {
        self.interval_us
    }

    /// Timestamp of the most recent step.
    #[inline]
    pub fn last_step(&self) -> Micros {
        self.last_step
    }

    /// Whether a step is due at `now`.
    #[inline]
    pub fn is_due(&self, now: Micros) -> bool {
        match self.interval_us {
            Some(interval) => now.wrapping_since(self.last_step) >= interval,
            None => false,
        }
    }

    /// Record a step issued at `now`.
    #[inline]
    pub fn mark(&mut self, now: Micros) {
        self.last_step = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standstill_never_due() {
        let mut timer = StepTimer::new();
        timer.set_rate(StepsPerSec(0.0));
        assert!(!timer.is_due(Micros(0)));
        assert!(!timer.is_due(Micros(u32::MAX)));
    }

    #[test]
    fn test_due_after_interval() {
        let mut timer = StepTimer::new();
        timer.set_rate(StepsPerSec(1000.0));
        timer.mark(Micros(10_000));

        assert!(!timer.is_due(Micros(10_999)));
        assert!(timer.is_due(Micros(11_000)));
    }

    #[test]
    fn test_due_across_wrap() {
        let mut timer = StepTimer::new();
        timer.set_rate(StepsPerSec(1000.0));
        timer.mark(Micros(u32::MAX - 499));

        assert!(!timer.is_due(Micros(499)));
        assert!(timer.is_due(Micros(500)));
    }

    #[test]
    fn test_closure_clock() {
        let clock = || Micros(42);
        assert_eq!(clock.now(), Micros(42));
    }
}
