//! Position model for stepper motors.
//!
//! Tracks the current and target positions in steps. Open loop: the model
//! counts issued steps, nothing more.

use crate::config::units::Steps;
use crate::motion::Direction;

/// Current and target position of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Current position in steps (from origin).
    current: Steps,
    /// Target position in steps (from origin).
    target: Steps,
}

impl Position {
    /// Create a tracker at the origin with no pending move.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker at a specific position with no pending move.
    #[inline]
    pub fn at(steps: Steps) -> Self {
        Self {
            current: steps,
            target: steps,
        }
    }

    /// Current position.
    #[inline]
    pub fn current(&self) -> Steps {
        self.current
    }

    /// Most recently set target.
    #[inline]
    pub fn target(&self) -> Steps {
        self.target
    }

    /// `target - current`; positive means the target lies forward.
    ///
    /// Saturates at the ends of the `i64` range.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.target.0.saturating_sub(self.current.0)
    }

    /// Whether the axis sits on its target.
    #[inline]
    pub fn at_target(&self) -> bool {
        self.current == self.target
    }

    /// Set the target position.
    #[inline]
    pub fn set_target(&mut self, target: Steps) {
        self.target = target;
    }

    /// Redefine the current position without moving; the target is kept.
    #[inline]
    pub fn set_current(&mut self, steps: Steps) {
        self.current = steps;
    }

    /// Account for one issued step.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.current = Steps(self.current.0.saturating_add(direction.sign()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracking() {
        let mut pos = Position::new();
        pos.set_target(Steps(3));
        assert_eq!(pos.distance_to_go(), 3);

        pos.advance(Direction::Forward);
        pos.advance(Direction::Forward);
        assert_eq!(pos.current(), Steps(2));
        assert_eq!(pos.distance_to_go(), 1);

        pos.advance(Direction::Forward);
        assert!(pos.at_target());
    }

    #[test]
    fn test_rezero_keeps_target() {
        let mut pos = Position::at(Steps(900));
        pos.set_target(Steps(1000));
        pos.set_current(Steps(0));

        assert_eq!(pos.target(), Steps(1000));
        assert_eq!(pos.distance_to_go(), 1000);
    }

    #[test]
    fn test_extreme_positions_saturate() {
        let mut pos = Position::at(Steps(i64::MIN));
        pos.set_target(Steps(i64::MAX));
        assert_eq!(pos.distance_to_go(), i64::MAX);

        pos.set_current(Steps(i64::MAX));
        pos.set_target(Steps(i64::MIN));
        assert_eq!(pos.distance_to_go(), i64::MIN);

        pos.advance(Direction::Forward);
        assert_eq!(pos.current(), Steps(i64::MAX));
    }
}
