//! Periodic direction reversal.
//!
//! Drives the axis back and forth at a fixed period, which is handy for
//! watching coil voltages at a steady, repeating speed on a scope.

use crate::config::units::Micros;

/// Signals a direction reversal once every `period` microseconds.
///
/// Late polls do not drift the schedule: the next deadline advances by whole
/// periods from the previous one, not from the time of the poll.
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    period_us: u32,
    anchor: Micros,
}

impl Oscillator {
    /// Create an oscillator whose first period starts at `start`.
    ///
    /// A zero period is bumped to 1 µs.
    pub fn new(period_us: u32, start: Micros) -> Self {
        Self {
            period_us: period_us.max(1),
            anchor: start,
        }
    }

    /// Reversal period in microseconds.
    #[inline]
    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Returns `true` when a reversal is due, at most once per call.
    pub fn poll(&mut self, now: Micros) -> bool {
        if now.wrapping_since(self.anchor) > self.period_us {
            self.anchor = self.anchor.wrapping_add(self.period_us);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flips_once_per_period() {
        let mut osc = Oscillator::new(250_000, Micros(0));

        assert!(!osc.poll(Micros(100_000)));
        assert!(!osc.poll(Micros(250_000)));
        assert!(osc.poll(Micros(250_001)));
        assert!(!osc.poll(Micros(300_000)));
        assert!(osc.poll(Micros(500_001)));
    }

    #[test]
    fn test_late_poll_keeps_schedule() {
        let mut osc = Oscillator::new(1_000, Micros(0));

        // Two periods late: one reversal per poll until caught up.
        assert!(osc.poll(Micros(2_500)));
        assert!(osc.poll(Micros(2_500)));
        assert!(!osc.poll(Micros(2_500)));
    }
}
