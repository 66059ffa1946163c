//! Motion module for scope-stepper.
//!
//! Provides stepping styles, velocity planning, step timing and oscillation.

mod oscillation;
pub mod planner;
mod style;
mod timer;

pub use oscillation::Oscillator;
pub use planner::{desired_speed, Direction, PlanInput, VelocityPolicy};
pub use style::{StepStyle, StyleParams};
pub use timer::{Clock, StepTimer};

#[cfg(feature = "std")]
pub use timer::StdClock;
