//! Unit tests for TOML configuration parsing.

use scope_stepper::config::{load_config, parse_config, StyleKind, SystemConfig};
use scope_stepper::{Microsteps, RevsPerSecSquared, StepStyle, VelocityPolicy};

/// Test parsing a fully specified axis.
#[test]
fn test_parse_axis_config() {
    let toml_str = r#"
[axes.spindle]
name = "Spindle"
steps_per_revolution = 200
style = "microstep"
microsteps = 16
policy = "trapezoidal"
speed_rev_per_sec = 0.5
max_speed_rev_per_sec = 4.0
acceleration_rev_per_sec2 = 10.0
start_powered = false
oscillation_period_us = 250000
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let axis = config.axis("spindle").expect("Axis not found");

    assert_eq!(axis.name.as_str(), "Spindle");
    assert_eq!(axis.steps_per_revolution, 200);
    assert_eq!(axis.style, StyleKind::Microstep);
    assert_eq!(axis.microsteps.value(), 16);
    assert_eq!(axis.policy, VelocityPolicy::Trapezoidal);
    assert_eq!(axis.speed.0, 0.5);
    assert_eq!(axis.max_speed.0, 4.0);
    assert_eq!(axis.acceleration, RevsPerSecSquared(10.0));
    assert!(!axis.start_powered);
    assert_eq!(axis.oscillation_period_us, Some(250_000));
    assert_eq!(axis.step_style(), StepStyle::Microstep(Microsteps::SIXTEENTH));
}

/// Test that omitted fields take their defaults.
#[test]
fn test_defaults() {
    let toml_str = r#"
[axes.feed]
name = "Feed"
steps_per_revolution = 48
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");
    let axis = config.axis("feed").expect("Axis not found");

    assert_eq!(axis.style, StyleKind::Single);
    assert_eq!(axis.microsteps, Microsteps::EIGHTH);
    assert_eq!(axis.policy, VelocityPolicy::ConstantVelocity);
    assert_eq!(axis.speed.0, 0.0);
    assert!(axis.start_powered);
    assert!(axis.oscillation_period_us.is_none());
}

/// Test that every style name parses.
#[test]
fn test_style_names() {
    for (name, expected) in [
        ("single", StyleKind::Single),
        ("double", StyleKind::Double),
        ("interleave", StyleKind::Interleave),
        ("microstep", StyleKind::Microstep),
    ] {
        let toml_str = format!(
            r#"
[axes.a]
name = "A"
steps_per_revolution = 200
style = "{name}"
"#
        );
        let config = parse_config(&toml_str).expect("Failed to parse TOML");
        assert_eq!(config.axis("a").unwrap().style, expected);
    }
}

/// Test that an unknown style is a parse error.
#[test]
fn test_unknown_style_rejected() {
    let toml_str = r#"
[axes.a]
name = "A"
steps_per_revolution = 200
style = "wave"
"#;

    assert!(parse_config(toml_str).is_err());
}

/// Test that non power-of-two microsteps are rejected while parsing.
#[test]
fn test_invalid_microsteps_rejected() {
    let toml_str = r#"
[axes.a]
name = "A"
steps_per_revolution = 200
microsteps = 12
"#;

    assert!(toml::from_str::<SystemConfig>(toml_str).is_err());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("scope_stepper_load_config.toml");
    std::fs::write(
        &path,
        r#"
[axes.spindle]
name = "Spindle"
steps_per_revolution = 200
"#,
    )
    .unwrap();

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.axis_names().collect::<Vec<_>>(), vec!["spindle"]);

    std::fs::remove_file(&path).ok();
}
