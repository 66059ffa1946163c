//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
///
/// # Example
///
/// ```rust,ignore
/// use scope_stepper::load_config;
///
/// let config = load_config("bench.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

/// Keep as much of a message as fits.
fn truncated(message: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in message.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::VelocityPolicy;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[axes.spindle]
name = "Spindle"
steps_per_revolution = 200
"#;

        let config = parse_config(toml).unwrap();
        let axis = config.axis("spindle").unwrap();
        assert_eq!(axis.policy, VelocityPolicy::ConstantVelocity);
        assert!(axis.start_powered);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[axes.spindle\nname = ");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/bench.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_long_message_truncated() {
        let long = "x".repeat(300);
        assert_eq!(truncated(&long).len(), 128);
    }
}
