//! # scope-stepper
//!
//! Poll-driven stepper motor scheduling with oscilloscope trigger outputs,
//! built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Poll-driven**: call `tick` from your main loop; at most one step per call
//! - **Step styles**: single, double, interleave and microstep, switchable on the fly
//! - **Velocity policies**: constant speed or trapezoidal accel/decel to target
//! - **Scope triggers**: a `step` line toggling every step and a `beat` line
//!   toggling once per repeating coil pattern
//! - **Pluggable backends**: STEP/DIR drivers or dual H-bridges via `MotorBackend`
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scope_stepper::{StepScheduler, StepDirBackend, RevsPerSec, StdClock};
//!
//! let backend = StepDirBackend::new(step_pin, dir_pin, enable_pin, delay);
//! let mut axis = StepScheduler::builder()
//!     .backend(backend)
//!     .trigger_pins(scope_step, scope_beat)
//!     .steps_per_revolution(200)
//!     .build()?;
//!
//! axis.set_speed_rps(RevsPerSec(1.0))?;
//! axis.move_to(800);
//!
//! let clock = StdClock::new();
//! for tick in axis.run_to_completion(&clock) {
//!     tick?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and `StdClock`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{Clock, Direction, Oscillator, StepStyle, VelocityPolicy};
pub use motor::{
    state, CoilBackend, Disconnected, MotorBackend, StepDirBackend, StepScheduler,
    StepSchedulerBuilder, TriggerState,
};

#[cfg(feature = "std")]
pub use motion::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{
    Micros, Microsteps, RevsPerSec, RevsPerSecSquared, Steps, StepsPerSec, StepsPerSecSquared,
};
