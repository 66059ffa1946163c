//! Motor backends: the actuators behind the scheduler.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::error::BackendError;
use crate::motion::{Direction, StepStyle};

/// Physical or logical actuator that performs single steps.
///
/// Whether the backend toggles GPIO pins directly or talks to a driver chip
/// over a bus is entirely its own business.
pub trait MotorBackend {
    /// Issue exactly one step in `direction` using `style`.
    fn step(&mut self, direction: Direction, style: StepStyle) -> Result<(), BackendError>;

    /// De-energize the motor. Calling it on a released motor is a no-op.
    fn release(&mut self) -> Result<(), BackendError>;
}

impl<T: MotorBackend + ?Sized> MotorBackend for &mut T {
    fn step(&mut self, direction: Direction, style: StepStyle) -> Result<(), BackendError> {
        (**self).step(direction, style)
    }

    fn release(&mut self) -> Result<(), BackendError> {
        (**self).release()
    }
}

/// Default STEP pulse width in microseconds.
pub const DEFAULT_PULSE_WIDTH_US: u32 = 2;

/// STEP/DIR/ENABLE driver (A4988, DRV8825, TMC step/dir mode, ...).
///
/// Microstep resolution is strapped on the driver, so the style only matters
/// to the scheduler's step accounting, not to the pulses emitted here.
/// `release()` drives ENABLE inactive; the next step re-enables the driver.
pub struct StepDirBackend<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: EN,
    delay: DELAY,

    /// Direction currently latched on DIR (cached to avoid pin writes).
    current_direction: Option<Direction>,

    /// Whether the driver outputs are currently enabled.
    enabled: Option<bool>,

    invert_direction: bool,
    enable_active_low: bool,
    pulse_width_us: u32,
}

impl<STEP, DIR, EN, DELAY> StepDirBackend<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a backend with an active-low ENABLE and a 2 µs STEP pulse.
    ///
    /// No pins are touched until the first step or release.
    pub fn new(step_pin: STEP, dir_pin: DIR, enable_pin: EN, delay: DELAY) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            current_direction: None,
            enabled: None,
            invert_direction: false,
            enable_active_low: true,
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
        }
    }

    /// Invert the DIR pin logic.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Choose the ENABLE polarity.
    pub fn enable_active_low(mut self, active_low: bool) -> Self {
        self.enable_active_low = active_low;
        self
    }

    /// Set the STEP pulse width in microseconds.
    pub fn pulse_width_us(mut self, us: u32) -> Self {
        self.pulse_width_us = us;
        self
    }

    /// Give back the pins and delay.
    pub fn release_pins(self) -> (STEP, DIR, EN, DELAY) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.delay)
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), BackendError> {
        if self.enabled == Some(enabled) {
            return Ok(());
        }

        let high = enabled != self.enable_active_low;
        self.enable_pin
            .set_state(PinState::from(high))
            .map_err(|_| BackendError::Pin)?;

        self.enabled = Some(enabled);
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), BackendError> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Backward => self.invert_direction,
        };
        self.dir_pin
            .set_state(PinState::from(high))
            .map_err(|_| BackendError::Pin)?;

        self.current_direction = Some(direction);
        Ok(())
    }
}

impl<STEP, DIR, EN, DELAY> MotorBackend for StepDirBackend<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn step(&mut self, direction: Direction, _style: StepStyle) -> Result<(), BackendError> {
        self.set_enabled(true)?;
        self.set_direction(direction)?;

        self.step_pin.set_high().map_err(|_| BackendError::Pin)?;
        self.delay.delay_us(self.pulse_width_us);
        self.step_pin.set_low().map_err(|_| BackendError::Pin)?;

        Ok(())
    }

    fn release(&mut self) -> Result<(), BackendError> {
        self.set_enabled(false)
    }
}
