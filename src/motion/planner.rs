//! Velocity planning.
//!
//! Two policies are supported. Under [`VelocityPolicy::ConstantVelocity`] the
//! speed is whatever the caller last set. Under [`VelocityPolicy::Trapezoidal`]
//! the speed is replanned after every step so the axis ramps up, cruises at
//! the max speed and ramps down to rest exactly on the target.

use libm::{fabsf, sqrtf};

/// Direction of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards increasing positions.
    Forward,
    /// Towards decreasing positions.
    Backward,
}

impl Direction {
    /// Get direction from a signed speed. `None` at standstill.
    #[inline]
    pub fn from_speed(speed: f32) -> Option<Self> {
        if speed > 0.0 {
            Some(Direction::Forward)
        } else if speed < 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    /// Get direction from a signed step count. `None` for zero.
    #[inline]
    pub fn from_steps(steps: i64) -> Option<Self> {
        match steps {
            0 => None,
            s if s > 0 => Some(Direction::Forward),
            _ => Some(Direction::Backward),
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// How the scheduler's speed evolves while seeking a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum VelocityPolicy {
    /// Speed set by the caller; motion stops abruptly at the target.
    #[default]
    ConstantVelocity,
    /// Speed ramped with constant acceleration towards and away from the target.
    Trapezoidal,
}

/// Snapshot of the axis state consumed by [`desired_speed`].
///
/// All quantities are in the position model's units: steps, steps/s, steps/s².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanInput {
    /// `target - current`, in steps.
    pub distance: i64,
    /// Current signed speed.
    pub speed: f32,
    /// Speed magnitude limit.
    pub max_speed: f32,
    /// Acceleration magnitude.
    pub acceleration: f32,
}

/// Compute the next speed under the trapezoidal policy.
///
/// Pure function of its input: the same input always yields the same speed.
pub fn desired_speed(input: &PlanInput) -> f32 {
    let PlanInput {
        distance,
        speed,
        max_speed,
        acceleration,
    } = *input;

    if distance == 0 {
        return 0.0;
    }

    // Fastest speed from which the axis can still stop on the target.
    let magnitude = sqrtf(2.0 * distance.unsigned_abs() as f32 * acceleration);
    let required = if distance > 0 { magnitude } else { -magnitude };

    if required > speed {
        let next = if speed == 0.0 {
            sqrtf(2.0 * acceleration)
        } else {
            speed + fabsf(acceleration / speed)
        };
        next.min(max_speed)
    } else if required < speed {
        let next = if speed == 0.0 {
            -sqrtf(2.0 * acceleration)
        } else {
            speed - fabsf(acceleration / speed)
        };
        next.max(-max_speed)
    } else {
        speed
    }
}
