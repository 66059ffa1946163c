//! Poll-driven step scheduler.
//!
//! Generic over the [`MotorBackend`] that performs the steps and the two
//! embedded-hal output pins carrying the scope trigger lines.

use embedded_hal::digital::OutputPin;

use crate::config::units::{Micros, RevsPerSec, Steps, StepsPerSec, StepsPerSecSquared};
use crate::error::{MotionError, MotorError, Result};
use crate::motion::{desired_speed, Clock, Direction, PlanInput, StepStyle, StepTimer, VelocityPolicy};

use super::backend::MotorBackend;
use super::builder::StepSchedulerBuilder;
use super::position::Position;
use super::state::{MotionState, PowerState};
use super::trigger::{Disconnected, TriggerSignaler, TriggerState};

/// Single-axis step scheduler.
///
/// Owns the axis' motion state exclusively. Call [`tick`](Self::tick) as often
/// as possible, at least once per step interval; each call issues at most one
/// step, so a late tick yields a late step rather than a burst.
///
/// Speeds and accelerations are in steps of the active [`StepStyle`]; changing
/// the style rescales them so the shaft speed in rev/s is preserved.
pub struct StepScheduler<B, STEP = Disconnected, BEAT = Disconnected>
where
    B: MotorBackend,
    STEP: OutputPin,
    BEAT: OutputPin,
{
    /// Actuator issuing the steps.
    backend: B,

    /// Scope trigger lines.
    trigger: TriggerSignaler<STEP, BEAT>,

    /// Current and target position.
    position: Position,

    /// Step interval and last step time.
    timer: StepTimer,

    /// Signed speed in steps/s.
    speed: f32,

    /// Speed limit in steps/s (trapezoidal policy).
    max_speed: f32,

    /// Acceleration in steps/s² (trapezoidal policy).
    acceleration: f32,

    style: StepStyle,
    policy: VelocityPolicy,
    power: PowerState,

    /// Full motor steps per revolution, before the style multiplier.
    steps_per_revolution: u16,

    /// Axis name for logging/debugging.
    name: heapless::String<32>,
}

impl<B: MotorBackend> StepScheduler<B> {
    /// Create a builder for a new scheduler.
    pub fn builder() -> StepSchedulerBuilder<B> {
        StepSchedulerBuilder::new()
    }
}

impl<B, STEP, BEAT> StepScheduler<B, STEP, BEAT>
where
    B: MotorBackend,
    STEP: OutputPin,
    BEAT: OutputPin,
{
    /// Create a scheduler at the origin, at rest.
    ///
    /// `trigger` must already be set up for `style`.
    pub(crate) fn new(
        backend: B,
        trigger: TriggerSignaler<STEP, BEAT>,
        name: heapless::String<32>,
        steps_per_revolution: u16,
        style: StepStyle,
        policy: VelocityPolicy,
        power: PowerState,
    ) -> Self {
        Self {
            backend,
            trigger,
            position: Position::new(),
            timer: StepTimer::new(),
            speed: 0.0,
            max_speed: 0.0,
            acceleration: 0.0,
            style,
            policy,
            power,
            steps_per_revolution,
            name,
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Velocity policy in force.
    #[inline]
    pub fn policy(&self) -> VelocityPolicy {
        self.policy
    }

    /// Set the absolute target position.
    pub fn move_to(&mut self, target: impl Into<Steps>) {
        self.position.set_target(target.into());
        self.replan();
    }

    /// Set the target relative to the current position.
    pub fn move_by(&mut self, delta: i64) {
        let target = self.position.current().0.saturating_add(delta);
        self.move_to(target);
    }

    /// Steps from the current position to the target; positive is forward.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.position.distance_to_go()
    }

    /// Most recently set target.
    #[inline]
    pub fn target_position(&self) -> Steps {
        self.position.target()
    }

    /// Current position, counted from issued steps.
    #[inline]
    pub fn current_position(&self) -> Steps {
        self.position.current()
    }

    /// Redefine the current position without stepping. The target is kept.
    pub fn set_current_position(&mut self, position: impl Into<Steps>) {
        self.position.set_current(position.into());
    }

    /// Idle or Seeking.
    #[inline]
    pub fn motion_state(&self) -> MotionState {
        MotionState::from_distance(self.distance_to_go())
    }

    /// Set the signed speed in steps/s. Zero stops stepping.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidSpeed` for a non-finite speed.
    pub fn set_speed(&mut self, speed: StepsPerSec) -> Result<()> {
        if !speed.0.is_finite() {
            return Err(MotionError::InvalidSpeed(speed.0).into());
        }
        self.speed = speed.0;
        self.refresh_interval();
        Ok(())
    }

    /// Set the signed shaft speed in rev/s under the active style.
    pub fn set_speed_rps(&mut self, speed: RevsPerSec) -> Result<()> {
        self.set_speed(speed.to_steps_per_sec(self.steps_per_revolution_effective()))
    }

    /// Current signed speed in steps/s.
    #[inline]
    pub fn speed(&self) -> StepsPerSec {
        StepsPerSec(self.speed)
    }

    /// Current signed shaft speed in rev/s.
    #[inline]
    pub fn speed_rps(&self) -> RevsPerSec {
        RevsPerSec::from_steps_per_sec(self.speed(), self.steps_per_revolution_effective())
    }

    /// Reverse the direction of travel, keeping the magnitude.
    pub fn reverse(&mut self) {
        self.speed = -self.speed;
        self.refresh_interval();
    }

    /// Set the speed limit in steps/s.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidMaxSpeed` unless finite and non-negative.
    pub fn set_max_speed(&mut self, max_speed: StepsPerSec) -> Result<()> {
        if !max_speed.0.is_finite() || max_speed.0 < 0.0 {
            return Err(MotionError::InvalidMaxSpeed(max_speed.0).into());
        }
        self.max_speed = max_speed.0;
        self.refresh_interval();
        self.replan();
        Ok(())
    }

    /// Speed limit in steps/s.
    #[inline]
    pub fn max_speed(&self) -> StepsPerSec {
        StepsPerSec(self.max_speed)
    }

    /// Set the acceleration in steps/s².
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidAcceleration` unless finite and non-negative.
    pub fn set_acceleration(&mut self, acceleration: StepsPerSecSquared) -> Result<()> {
        if !acceleration.0.is_finite() || acceleration.0 < 0.0 {
            return Err(MotionError::InvalidAcceleration(acceleration.0).into());
        }
        self.acceleration = acceleration.0;
        self.refresh_interval();
        self.replan();
        Ok(())
    }

    /// Acceleration in steps/s².
    #[inline]
    pub fn acceleration(&self) -> StepsPerSecSquared {
        StepsPerSecSquared(self.acceleration)
    }

    /// Interval between steps at the current speed; `None` at standstill.
    #[inline]
    pub fn step_interval_us(&self) -> Option<u32> {
        self.timer.interval_us()
    }

    /// Timestamp of the most recent step.
    #[inline]
    pub fn last_step_time(&self) -> Micros {
        self.timer.last_step()
    }

    /// Switch stepping style.
    ///
    /// Rescales speed, max speed and acceleration to keep the shaft speed,
    /// restarts the trigger beat with both lines low, and re-derives the step
    /// interval.
    pub fn set_style(&mut self, style: StepStyle) {
        let ratio = style.multiplier() as f32 / self.style.multiplier() as f32;
        self.speed *= ratio;
        self.max_speed *= ratio;
        self.acceleration *= ratio;

        self.style = style;
        self.trigger.reset(style);
        self.refresh_interval();
        self.replan();

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: style {}", self.name.as_str(), style);
    }

    /// Active stepping style.
    #[inline]
    pub fn style(&self) -> StepStyle {
        self.style
    }

    /// Backend steps per shaft revolution under the active style.
    #[inline]
    pub fn steps_per_revolution_effective(&self) -> f32 {
        self.steps_per_revolution as f32 * self.style.multiplier() as f32
    }

    /// Trigger line levels and beat position.
    #[inline]
    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    /// Allow stepping. Coils are energized again by the next step.
    pub fn turn_on(&mut self) {
        self.power = PowerState::Powered;

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: powered", self.name.as_str());
    }

    /// Stop stepping and de-energize the coils.
    ///
    /// # Errors
    ///
    /// Propagates a backend release failure. The axis is released either way.
    pub fn turn_off(&mut self) -> Result<()> {
        self.power = PowerState::Released;

        #[cfg(feature = "defmt")]
        defmt::debug!("{}: released", self.name.as_str());

        if let Err(e) = self.backend.release() {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: release failed: {}", self.name.as_str(), e);
            return Err(MotorError::Backend(e).into());
        }
        Ok(())
    }

    /// Whether the scheduler may issue steps.
    #[inline]
    pub fn running(&self) -> bool {
        self.power.is_powered()
    }

    /// Powered or Released.
    #[inline]
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// Poll towards the target: step if one is due.
    ///
    /// Returns `Ok(true)` if a step was issued. Does nothing on target, when
    /// released, or at zero speed.
    ///
    /// Steps follow the sign of the speed. Under the constant-velocity policy
    /// that sign is the caller's: a speed pointing away from the target never
    /// reaches it.
    ///
    /// # Errors
    ///
    /// A backend failure is returned as-is; no step is counted and nothing is
    /// retried.
    pub fn tick(&mut self, now: Micros) -> Result<bool> {
        let distance = self.position.distance_to_go();
        if distance == 0 || !self.power.is_powered() {
            return Ok(false);
        }

        let stepped = self.step_if_due(now)?;
        if stepped {
            self.replan();
        }
        Ok(stepped)
    }

    /// Poll at constant speed, ignoring the target.
    ///
    /// Returns `Ok(true)` if a step was issued.
    pub fn run_speed(&mut self, now: Micros) -> Result<bool> {
        if !self.power.is_powered() {
            return Ok(false);
        }
        self.step_if_due(now)
    }

    /// Drive the axis to its target, one tick per iteration.
    ///
    /// Nothing happens until the iterator is advanced, so the caller keeps
    /// control between steps and can interleave other work. Ends once the
    /// target is reached; yields `MotorError::PoweredOff` while released.
    pub fn run_to_completion<'a, C: Clock>(
        &'a mut self,
        clock: &'a C,
    ) -> RunToCompletion<'a, B, STEP, BEAT, C> {
        RunToCompletion {
            scheduler: self,
            clock,
        }
    }

    /// Set a new target and drive the axis there, one tick per iteration.
    pub fn run_to_new_position<'a, C: Clock>(
        &'a mut self,
        target: impl Into<Steps>,
        clock: &'a C,
    ) -> RunToCompletion<'a, B, STEP, BEAT, C> {
        self.move_to(target);
        self.run_to_completion(clock)
    }

    /// Issue one backend step without counting it.
    ///
    /// Used to align the coil phase before a capture; position, timing and
    /// trigger lines are left alone.
    pub fn phase_step(&mut self, direction: Direction, style: StepStyle) -> Result<()> {
        self.backend.step(direction, style)?;
        Ok(())
    }

    /// Access the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Take the scheduler apart.
    pub fn into_parts(self) -> (B, TriggerSignaler<STEP, BEAT>) {
        (self.backend, self.trigger)
    }

    fn step_if_due(&mut self, now: Micros) -> Result<bool> {
        if !self.timer.is_due(now) {
            return Ok(false);
        }
        let Some(direction) = Direction::from_speed(self.speed) else {
            return Ok(false);
        };

        if let Err(e) = self.backend.step(direction, self.style) {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: step failed: {}", self.name.as_str(), e);
            return Err(MotorError::Backend(e).into());
        }

        self.trigger.update();
        self.position.advance(direction);
        self.timer.mark(now);
        Ok(true)
    }

    fn replan(&mut self) {
        if self.policy != VelocityPolicy::Trapezoidal {
            return;
        }
        self.speed = desired_speed(&PlanInput {
            distance: self.position.distance_to_go(),
            speed: self.speed,
            max_speed: self.max_speed,
            acceleration: self.acceleration,
        });
        self.refresh_interval();
    }

    fn refresh_interval(&mut self) {
        self.timer.set_rate(StepsPerSec(self.speed));
    }
}

/// Caller-driven run to the target. See [`StepScheduler::run_to_completion`].
pub struct RunToCompletion<'a, B, STEP, BEAT, C>
where
    B: MotorBackend,
    STEP: OutputPin,
    BEAT: OutputPin,
    C: Clock,
{
    scheduler: &'a mut StepScheduler<B, STEP, BEAT>,
    clock: &'a C,
}

impl<B, STEP, BEAT, C> Iterator for RunToCompletion<'_, B, STEP, BEAT, C>
where
    B: MotorBackend,
    STEP: OutputPin,
    BEAT: OutputPin,
    C: Clock,
{
    type Item = Result<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.scheduler.distance_to_go() == 0 {
            return None;
        }
        if !self.scheduler.running() {
            return Some(Err(MotorError::PoweredOff.into()));
        }
        Some(self.scheduler.tick(self.clock.now()))
    }
}
