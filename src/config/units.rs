//! Unit types for physical quantities.
//!
//! Provides type-safe representations of positions, step rates, shaft speeds,
//! and timestamps to prevent unit confusion at compile time.

use core::ops::{Add, Mul, Neg, Sub};

use serde::Deserialize;

use crate::error::ConfigError;

/// Motor position in steps (absolute from origin).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }
}

impl From<i64> for Steps {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Signed step rate in steps per second (sign = direction).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Interval between steps in microseconds, or `None` at standstill.
    ///
    /// Rates too slow to express in a `u32` interval saturate at `u32::MAX`.
    #[inline]
    pub fn interval_us(self) -> Option<u32> {
        let rate = libm::fabsf(self.0);
        if rate > 0.0 && rate.is_finite() {
            Some((1_000_000.0 / rate) as u32)
        } else {
            None
        }
    }
}

impl Neg for StepsPerSec {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<f32> for StepsPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Step acceleration in steps per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSecSquared(pub f32);

impl StepsPerSecSquared {
    /// Create a new StepsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for StepsPerSecSquared {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Shaft speed in revolutions per second (sign = direction).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct RevsPerSec(pub f32);

impl RevsPerSec {
    /// Create a new RevsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Create from revolutions per minute.
    #[inline]
    pub fn from_rpm(rpm: f32) -> Self {
        Self(rpm / 60.0)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to revolutions per minute.
    #[inline]
    pub fn rpm(self) -> f32 {
        self.0 * 60.0
    }

    /// Convert to a step rate given the steps making up one revolution.
    #[inline]
    pub fn to_steps_per_sec(self, steps_per_revolution: f32) -> StepsPerSec {
        StepsPerSec(self.0 * steps_per_revolution)
    }

    /// Create from a step rate given the steps making up one revolution.
    #[inline]
    pub fn from_steps_per_sec(rate: StepsPerSec, steps_per_revolution: f32) -> Self {
        if steps_per_revolution > 0.0 {
            Self(rate.0 / steps_per_revolution)
        } else {
            Self(0.0)
        }
    }
}

/// Shaft acceleration in revolutions per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct RevsPerSecSquared(pub f32);

impl RevsPerSecSquared {
    /// Create a new RevsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to a step acceleration given the steps making up one revolution.
    #[inline]
    pub fn to_steps_per_sec_squared(self, steps_per_revolution: f32) -> StepsPerSecSquared {
        StepsPerSecSquared(self.0 * steps_per_revolution)
    }
}

/// Timestamp from a free-running microsecond counter.
///
/// The counter wraps at `u32::MAX`; differences are always taken with
/// wrapping arithmetic so a wrap between two readings is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Micros(pub u32);

impl Micros {
    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Microseconds elapsed from `earlier` to `self`, wrap-safe.
    #[inline]
    pub const fn wrapping_since(self, earlier: Micros) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// This timestamp shifted forward by `us`, wrap-safe.
    #[inline]
    pub const fn wrapping_add(self, us: u32) -> Micros {
        Micros(self.0.wrapping_add(us))
    }
}

/// Microstep divisor for [`StepStyle::Microstep`](crate::motion::StepStyle).
///
/// Validated at construction to be a power of 2 within `2..=64`, which keeps
/// the beat length (`2 * N`) inside the 8-bit beat counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Microsteps(u8);

impl Microsteps {
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(4);
    /// Eighth step.
    pub const EIGHTH: Self = Self(8);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(16);
    /// Thirty-second step.
    pub const THIRTY_SECOND: Self = Self(32);
    /// Sixty-fourth step (maximum resolution).
    pub const SIXTY_FOURTH: Self = Self(64);

    /// Valid microstep values.
    const VALID_VALUES: [u16; 6] = [2, 4, 8, 16, 32, 64];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not a valid power of 2.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check if a value is valid.
    #[inline]
    pub fn is_valid(value: u16) -> bool {
        Self::VALID_VALUES.contains(&value)
    }
}

impl Default for Microsteps {
    fn default() -> Self {
        Self::EIGHTH
    }
}

impl TryFrom<u16> for Microsteps {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microsteps_valid_values() {
        for &v in &Microsteps::VALID_VALUES {
            assert!(Microsteps::new(v).is_ok());
        }
    }

    #[test]
    fn test_microsteps_invalid_values() {
        assert!(Microsteps::new(0).is_err());
        assert!(Microsteps::new(1).is_err());
        assert!(Microsteps::new(3).is_err());
        assert!(Microsteps::new(128).is_err());
        assert!(Microsteps::new(256).is_err());
    }

    #[test]
    fn test_interval_from_rate() {
        assert_eq!(StepsPerSec(200.0).interval_us(), Some(5000));
        assert_eq!(StepsPerSec(-200.0).interval_us(), Some(5000));
        assert_eq!(StepsPerSec(0.0).interval_us(), None);
        assert_eq!(StepsPerSec(f32::NAN).interval_us(), None);
    }

    #[test]
    fn test_rpm_conversion() {
        // 120 rpm on a 200 step motor: 2 rev/s -> 400 steps/s
        let speed = RevsPerSec::from_rpm(120.0);
        assert!((speed.value() - 2.0).abs() < 1e-6);
        assert!((speed.to_steps_per_sec(200.0).value() - 400.0).abs() < 1e-3);
        assert!((speed.rpm() - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_acceleration_conversion() {
        let accel = RevsPerSecSquared::new(2.5);
        assert_eq!(accel.to_steps_per_sec_squared(200.0), StepsPerSecSquared(500.0));
    }

    #[test]
    fn test_micros_wraps() {
        let before = Micros(u32::MAX - 9);
        let after = before.wrapping_add(20);
        assert_eq!(after, Micros(10));
        assert_eq!(after.wrapping_since(before), 20);
    }
}
