//! Builder pattern for StepScheduler.

use embedded_hal::digital::OutputPin;

use crate::config::units::{RevsPerSec, RevsPerSecSquared, StepsPerSec, StepsPerSecSquared};
use crate::config::{AxisConfig, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::{StepStyle, VelocityPolicy};

use super::backend::MotorBackend;
use super::scheduler::StepScheduler;
use super::state::PowerState;
use super::trigger::{Disconnected, TriggerSignaler};

/// A rate given either per backend step or per shaft revolution.
#[derive(Debug, Clone, Copy)]
enum Rate {
    Steps(f32),
    Revs(f32),
}

impl Rate {
    fn to_steps(self, steps_per_revolution: f32) -> f32 {
        match self {
            Rate::Steps(v) => v,
            Rate::Revs(v) => v * steps_per_revolution,
        }
    }
}

/// Builder for creating StepScheduler instances.
///
/// Only the backend and steps per revolution are required. Trigger lines
/// default to [`Disconnected`].
pub struct StepSchedulerBuilder<B, STEP = Disconnected, BEAT = Disconnected>
where
    B: MotorBackend,
    STEP: OutputPin,
    BEAT: OutputPin,
{
    backend: Option<B>,
    step_pin: STEP,
    beat_pin: BEAT,
    name: Option<heapless::String<32>>,
    steps_per_revolution: Option<u16>,
    style: StepStyle,
    policy: VelocityPolicy,
    speed: Rate,
    max_speed: Rate,
    acceleration: Rate,
    start_powered: bool,
}

impl<B> Default for StepSchedulerBuilder<B>
where
    B: MotorBackend,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B> StepSchedulerBuilder<B>
where
    B: MotorBackend,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            backend: None,
            step_pin: Disconnected,
            beat_pin: Disconnected,
            name: None,
            steps_per_revolution: None,
            style: StepStyle::default(),
            policy: VelocityPolicy::default(),
            speed: Rate::Steps(0.0),
            max_speed: Rate::Steps(0.0),
            acceleration: Rate::Steps(0.0),
            start_powered: true,
        }
    }
}

impl<B, STEP, BEAT> StepSchedulerBuilder<B, STEP, BEAT>
where
    B: MotorBackend,
    STEP: OutputPin,
    BEAT: OutputPin,
{
    /// Set the motor backend.
    pub fn backend(mut self, backend: B) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Wire up the scope trigger lines.
    pub fn trigger_pins<S, T>(self, step_pin: S, beat_pin: T) -> StepSchedulerBuilder<B, S, T>
    where
        S: OutputPin,
        T: OutputPin,
    {
        StepSchedulerBuilder {
            backend: self.backend,
            step_pin,
            beat_pin,
            name: self.name,
            steps_per_revolution: self.steps_per_revolution,
            style: self.style,
            policy: self.policy,
            speed: self.speed,
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            start_powered: self.start_powered,
        }
    }

    /// Set the axis name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set full motor steps per revolution.
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.steps_per_revolution = Some(steps);
        self
    }

    /// Set the initial stepping style.
    pub fn style(mut self, style: StepStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the velocity policy.
    pub fn policy(mut self, policy: VelocityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the initial speed in steps/s of the initial style.
    pub fn speed(mut self, speed: StepsPerSec) -> Self {
        self.speed = Rate::Steps(speed.0);
        self
    }

    /// Set the initial shaft speed in rev/s.
    pub fn speed_rps(mut self, speed: RevsPerSec) -> Self {
        self.speed = Rate::Revs(speed.0);
        self
    }

    /// Set the speed limit in steps/s of the initial style.
    pub fn max_speed(mut self, max_speed: StepsPerSec) -> Self {
        self.max_speed = Rate::Steps(max_speed.0);
        self
    }

    /// Set the speed limit in rev/s.
    pub fn max_speed_rps(mut self, max_speed: RevsPerSec) -> Self {
        self.max_speed = Rate::Revs(max_speed.0);
        self
    }

    /// Set the acceleration in steps/s² of the initial style.
    pub fn acceleration(mut self, acceleration: StepsPerSecSquared) -> Self {
        self.acceleration = Rate::Steps(acceleration.0);
        self
    }

    /// Set the acceleration in rev/s².
    pub fn acceleration_rps2(mut self, acceleration: RevsPerSecSquared) -> Self {
        self.acceleration = Rate::Revs(acceleration.0);
        self
    }

    /// Whether the axis may step as soon as it is built.
    pub fn start_powered(mut self, powered: bool) -> Self {
        self.start_powered = powered;
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.name = Some(config.name.clone());
        self.steps_per_revolution = Some(config.steps_per_revolution);
        self.style = config.step_style();
        self.policy = config.policy;
        self.speed = Rate::Revs(config.speed.0);
        self.max_speed = Rate::Revs(config.max_speed.0);
        self.acceleration = Rate::Revs(config.acceleration.0);
        self.start_powered = config.start_powered;
        self
    }

    /// Configure from SystemConfig by axis key.
    pub fn from_config(self, config: &SystemConfig, axis_name: &str) -> Result<Self> {
        let axis_config = config.axis(axis_name).ok_or_else(|| {
            Error::Config(ConfigError::AxisNotFound(
                heapless::String::try_from(axis_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the StepScheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or a rate is invalid.
    pub fn build(self) -> Result<StepScheduler<B, STEP, BEAT>> {
        let backend = self
            .backend
            .ok_or(Error::Config(ConfigError::MissingField("backend")))?;

        let steps_per_revolution = self
            .steps_per_revolution
            .ok_or(Error::Config(ConfigError::MissingField("steps_per_revolution")))?;
        if steps_per_revolution == 0 {
            return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)));
        }

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("axis").unwrap_or_default());

        let per_rev = steps_per_revolution as f32 * self.style.multiplier() as f32;
        let trigger = TriggerSignaler::new(self.step_pin, self.beat_pin, self.style);

        let mut scheduler = StepScheduler::new(
            backend,
            trigger,
            name,
            steps_per_revolution,
            self.style,
            self.policy,
            PowerState::from(self.start_powered),
        );
        scheduler.set_max_speed(StepsPerSec(self.max_speed.to_steps(per_rev)))?;
        scheduler.set_acceleration(StepsPerSecSquared(self.acceleration.to_steps(per_rev)))?;
        scheduler.set_speed(StepsPerSec(self.speed.to_steps(per_rev)))?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}: built, {} steps/rev, {}",
            scheduler.name(),
            steps_per_revolution,
            self.style
        );

        Ok(scheduler)
    }
}
