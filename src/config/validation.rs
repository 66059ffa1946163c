//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::VelocityPolicy;

use super::{AxisConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every axis:
/// - steps per revolution is non-zero
/// - speeds and acceleration are finite, limits non-negative
/// - trapezoidal axes have a usable speed limit and acceleration
/// - display names are unique
/// - oscillation periods are non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (i, (_, axis)) in config.axes.iter().enumerate() {
        validate_axis(axis)?;

        let duplicate = config
            .axes
            .values()
            .skip(i + 1)
            .any(|other| other.name == axis.name);
        if duplicate {
            return Err(Error::Config(ConfigError::DuplicateAxisName(axis.name.clone())));
        }
    }

    Ok(())
}

/// Validate a single axis.
pub fn validate_axis(axis: &AxisConfig) -> Result<()> {
    if axis.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            axis.steps_per_revolution,
        )));
    }

    if !axis.speed.0.is_finite() {
        return Err(Error::Config(ConfigError::InvalidSpeed(axis.speed.0)));
    }

    let trapezoidal = axis.policy == VelocityPolicy::Trapezoidal;

    let max_speed = axis.max_speed.0;
    if !max_speed.is_finite() || max_speed < 0.0 || (trapezoidal && max_speed == 0.0) {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(max_speed)));
    }

    let acceleration = axis.acceleration.0;
    if !acceleration.is_finite() || acceleration < 0.0 || (trapezoidal && acceleration == 0.0) {
        return Err(Error::Config(ConfigError::InvalidAcceleration(acceleration)));
    }

    if axis.oscillation_period_us == Some(0) {
        return Err(Error::Config(ConfigError::InvalidOscillationPeriod(0)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, RevsPerSec, RevsPerSecSquared};
    use crate::config::StyleKind;

    fn axis() -> AxisConfig {
        AxisConfig {
            name: heapless::String::try_from("Spindle").unwrap(),
            steps_per_revolution: 200,
            style: StyleKind::Single,
            microsteps: Microsteps::default(),
            policy: VelocityPolicy::Trapezoidal,
            speed: RevsPerSec(0.0),
            max_speed: RevsPerSec(4.0),
            acceleration: RevsPerSecSquared(10.0),
            start_powered: true,
            oscillation_period_us: None,
        }
    }

    #[test]
    fn test_valid_axis() {
        assert!(validate_axis(&axis()).is_ok());
    }

    #[test]
    fn test_trapezoidal_needs_acceleration() {
        let mut config = axis();
        config.acceleration = RevsPerSecSquared(0.0);
        assert_eq!(
            validate_axis(&config),
            Err(Error::Config(ConfigError::InvalidAcceleration(0.0)))
        );

        config.policy = VelocityPolicy::ConstantVelocity;
        assert!(validate_axis(&config).is_ok());
    }

    #[test]
    fn test_non_finite_speed() {
        let mut config = axis();
        config.speed = RevsPerSec(f32::NAN);
        assert!(matches!(
            validate_axis(&config),
            Err(Error::Config(ConfigError::InvalidSpeed(_)))
        ));
    }

    #[test]
    fn test_zero_oscillation_period() {
        let mut config = axis();
        config.oscillation_period_us = Some(0);
        assert_eq!(
            validate_axis(&config),
            Err(Error::Config(ConfigError::InvalidOscillationPeriod(0)))
        );
    }

    #[test]
    fn test_duplicate_names() {
        let mut config = SystemConfig::default();
        config
            .axes
            .insert(heapless::String::try_from("a").unwrap(), axis())
            .unwrap();
        config
            .axes
            .insert(heapless::String::try_from("b").unwrap(), axis())
            .unwrap();

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicateAxisName(_)))
        ));
    }
}
