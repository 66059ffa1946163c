//! Stepping styles and their step/beat accounting.

use crate::config::units::Microsteps;
use crate::error::{Error, MotorError, Result};

/// Coil energization pattern.
///
/// The style decides how many backend steps make up one full motor step and
/// how long the repeating coil pattern (the "beat") is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepStyle {
    /// One coil energized at a time.
    #[default]
    Single,
    /// Two coils energized at a time (more torque).
    Double,
    /// Alternating single/double (half stepping).
    Interleave,
    /// Sine-weighted coil currents with `N` microsteps per full step.
    Microstep(Microsteps),
}

/// Parameters derived from a [`StepStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleParams {
    /// Backend steps per full motor step.
    pub multiplier: u16,
    /// Backend steps in one repeating diagnostic cycle.
    pub beat_length: u8,
}

impl StepStyle {
    /// Wire code for [`StepStyle::Single`].
    pub const SINGLE: u8 = 1;
    /// Wire code for [`StepStyle::Double`].
    pub const DOUBLE: u8 = 2;
    /// Wire code for [`StepStyle::Interleave`].
    pub const INTERLEAVE: u8 = 3;
    /// Wire code for [`StepStyle::Microstep`].
    pub const MICROSTEP: u8 = 4;

    /// Look up the step multiplier and beat length for this style.
    pub const fn lookup(self) -> StyleParams {
        match self {
            StepStyle::Single | StepStyle::Double => StyleParams {
                multiplier: 1,
                beat_length: 2,
            },
            StepStyle::Interleave => StyleParams {
                multiplier: 2,
                beat_length: 4,
            },
            StepStyle::Microstep(n) => StyleParams {
                multiplier: n.value() as u16,
                beat_length: 2 * n.value(),
            },
        }
    }

    /// Backend steps per full motor step.
    #[inline]
    pub const fn multiplier(self) -> u16 {
        self.lookup().multiplier
    }

    /// Backend steps per beat.
    #[inline]
    pub const fn beat_length(self) -> u8 {
        self.lookup().beat_length
    }

    /// Decode a style from its wire code.
    ///
    /// `microsteps` is only consulted for [`StepStyle::MICROSTEP`].
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidStyle` for codes outside the known set.
    pub fn from_code(code: u8, microsteps: Microsteps) -> Result<Self> {
        match code {
            Self::SINGLE => Ok(StepStyle::Single),
            Self::DOUBLE => Ok(StepStyle::Double),
            Self::INTERLEAVE => Ok(StepStyle::Interleave),
            Self::MICROSTEP => Ok(StepStyle::Microstep(microsteps)),
            other => Err(Error::Motor(MotorError::InvalidStyle(other))),
        }
    }

    /// Wire code for this style.
    pub const fn code(self) -> u8 {
        match self {
            StepStyle::Single => Self::SINGLE,
            StepStyle::Double => Self::DOUBLE,
            StepStyle::Interleave => Self::INTERLEAVE,
            StepStyle::Microstep(_) => Self::MICROSTEP,
        }
    }

    /// Build a microstep style from a raw divisor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if `n` is not a supported divisor.
    pub fn microstep(n: u16) -> Result<Self> {
        Microsteps::new(n)
            .map(StepStyle::Microstep)
            .map_err(Error::Config)
    }
}
