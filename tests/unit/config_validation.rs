//! Unit tests for configuration validation.

use scope_stepper::config::{validate_config, SystemConfig};
use scope_stepper::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[axes.spindle]
name = "Spindle"
steps_per_revolution = 200
policy = "trapezoidal"
max_speed_rev_per_sec = 4.0
acceleration_rev_per_sec2 = 10.0

[axes.feed]
name = "Feed"
steps_per_revolution = 200
speed_rev_per_sec = -1.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for zero steps per revolution.
#[test]
fn test_zero_steps_per_revolution() {
    let toml_str = r#"
[axes.a]
name = "A"
steps_per_revolution = 0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    );
}

/// Test validation fails for a trapezoidal axis without a speed limit.
#[test]
fn test_trapezoidal_without_max_speed() {
    let toml_str = r#"
[axes.a]
name = "A"
steps_per_revolution = 200
policy = "trapezoidal"
acceleration_rev_per_sec2 = 10.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxSpeed(0.0)))
    );
}

/// Test validation fails for negative acceleration.
#[test]
fn test_negative_acceleration() {
    let toml_str = r#"
[axes.a]
name = "A"
steps_per_revolution = 200
acceleration_rev_per_sec2 = -1.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_err());
}

/// Test validation fails when two axes share a display name.
#[test]
fn test_duplicate_axis_names() {
    let toml_str = r#"
[axes.a]
name = "Same"
steps_per_revolution = 200

[axes.b]
name = "Same"
steps_per_revolution = 200
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DuplicateAxisName(_)))
    ));
}

/// Test that empty configuration is valid.
#[test]
fn test_empty_config_is_valid() {
    let config = SystemConfig::default();
    assert!(validate_config(&config).is_ok());
}
