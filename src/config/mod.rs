//! Configuration module for scope-stepper.
//!
//! Axis descriptions loaded from TOML files (with `std` feature) or built
//! in code, plus the unit newtypes used throughout the crate.

mod axis;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AxisConfig, StyleKind};
pub use system::SystemConfig;
pub use validation::{validate_axis, validate_config};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{
    Micros, Microsteps, RevsPerSec, RevsPerSecSquared, Steps, StepsPerSec, StepsPerSecSquared,
};
