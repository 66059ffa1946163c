//! Motor module for scope-stepper.
//!
//! The step scheduler, the backends that turn steps into coil currents, and
//! the scope trigger lines.

mod backend;
mod builder;
mod coil;
mod position;
mod scheduler;
pub mod state;
mod trigger;

pub use backend::{MotorBackend, StepDirBackend, DEFAULT_PULSE_WIDTH_US};
pub use builder::StepSchedulerBuilder;
pub use coil::CoilBackend;
pub use position::Position;
pub use scheduler::{RunToCompletion, StepScheduler};
pub use state::{MotionState, PowerState};
pub use trigger::{Disconnected, TriggerSignaler, TriggerState};
