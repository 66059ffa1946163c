//! Error types for scope-stepper.
//!
//! Provides unified error handling across configuration, motor backends, and
//! motion planning. Every error is recoverable: the caller decides whether to
//! retry, reconfigure, or keep polling.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all scope-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor or backend operation error
    Motor(MotorError),
    /// Motion parameter error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be a power of 2 in 2..=64)
    InvalidMicrosteps(u16),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Duplicate axis name in configuration
    DuplicateAxisName(heapless::String<32>),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u16),
    /// Speed must be finite
    InvalidSpeed(f32),
    /// Max speed must be finite and >= 0 (> 0 for trapezoidal axes)
    InvalidMaxSpeed(f32),
    /// Acceleration must be finite and >= 0 (> 0 for trapezoidal axes)
    InvalidAcceleration(f32),
    /// Oscillation period must be > 0
    InvalidOscillationPeriod(u32),
    /// A builder field was never supplied
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Failure reported by a [`MotorBackend`](crate::motor::MotorBackend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendError {
    /// GPIO pin operation failed
    Pin,
    /// PWM duty cycle update failed
    Pwm,
    /// Communication with an external driver chip failed
    Bus,
    /// The backend cannot perform the requested step style
    Unsupported,
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// The backend failed to issue a step or release the coils
    Backend(BackendError),
    /// Style code outside the known set
    InvalidStyle(u8),
    /// The axis is released and cannot make progress
    PoweredOff,
}

/// Motion parameter errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Speed must be finite
    InvalidSpeed(f32),
    /// Max speed must be finite and >= 0
    InvalidMaxSpeed(f32),
    /// Acceleration must be finite and >= 0
    InvalidAcceleration(f32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 2, 4, 8, 16, 32, 64", v)
            }
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::DuplicateAxisName(name) => write!(f, "Duplicate axis name: '{}'", name),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {}. Must be finite", v),
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}", v),
            ConfigError::InvalidAcceleration(v) => write!(f, "Invalid acceleration: {}", v),
            ConfigError::InvalidOscillationPeriod(v) => {
                write!(f, "Invalid oscillation period: {} us. Must be > 0", v)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Pin => write!(f, "GPIO pin operation failed"),
            BackendError::Pwm => write!(f, "PWM duty cycle update failed"),
            BackendError::Bus => write!(f, "driver bus transfer failed"),
            BackendError::Unsupported => write!(f, "step style not supported by backend"),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Backend(e) => write!(f, "Backend failure: {}", e),
            MotorError::InvalidStyle(code) => write!(f, "Invalid step style code: {}", code),
            MotorError::PoweredOff => write!(f, "Motor is released"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidSpeed(v) => write!(f, "Speed {} is not finite", v),
            MotionError::InvalidMaxSpeed(v) => {
                write!(f, "Max speed {} must be finite and non-negative", v)
            }
            MotionError::InvalidAcceleration(v) => {
                write!(f, "Acceleration {} must be finite and non-negative", v)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<BackendError> for MotorError {
    fn from(e: BackendError) -> Self {
        MotorError::Backend(e)
    }
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        Error::Motor(MotorError::Backend(e))
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for BackendError {}
