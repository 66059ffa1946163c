//! Dual H-bridge backend that sequences the coils itself.
//!
//! The coil phase is tracked in microstep units over one electrical cycle
//! (`4 * N` positions for `N` microsteps per full step). Single and double
//! steps snap to the even/odd half-step positions, interleave advances by
//! half a full step, and microstepping advances one position at a time with
//! quarter-sine duty cycles.

use core::f32::consts::FRAC_PI_2;

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;
use libm::{roundf, sinf};

use crate::config::units::Microsteps;
use crate::error::BackendError;
use crate::motion::{Direction, StepStyle};

use super::backend::MotorBackend;

const FULL_DUTY: u16 = 255;

/// H-bridge stepper backend: two PWM enables and four bridge inputs.
///
/// The PWM channels and inputs may sit behind an I2C expander such as the
/// PCA9685 on common motor shields, as long as they are exposed as
/// `SetDutyCycle` channels and `OutputPin`s. Backends that talk to a driver
/// chip themselves report failed transfers as [`BackendError::Bus`].
///
/// A failed write leaves the tracked phase where it was, so a retried step
/// lands on the same coil pattern.
pub struct CoilBackend<PWM, PIN>
where
    PWM: SetDutyCycle,
    PIN: OutputPin,
{
    pwm_a: PWM,
    pwm_b: PWM,
    a_in1: PIN,
    a_in2: PIN,
    b_in1: PIN,
    b_in2: PIN,

    /// Microsteps per full step this bridge was wired for.
    resolution: Microsteps,

    /// Position within the electrical cycle, `0..4 * resolution`.
    phase: u16,
}

impl<PWM, PIN> CoilBackend<PWM, PIN>
where
    PWM: SetDutyCycle,
    PIN: OutputPin,
{
    /// Create a backend. Coils stay untouched until the first step.
    pub fn new(
        pwm_a: PWM,
        pwm_b: PWM,
        [a_in1, a_in2, b_in1, b_in2]: [PIN; 4],
        resolution: Microsteps,
    ) -> Self {
        Self {
            pwm_a,
            pwm_b,
            a_in1,
            a_in2,
            b_in1,
            b_in2,
            resolution,
            phase: 0,
        }
    }

    /// Position within the electrical cycle.
    #[inline]
    pub fn phase(&self) -> u16 {
        self.phase
    }

    /// Give back the PWM channels and bridge inputs.
    pub fn release_pins(self) -> (PWM, PWM, [PIN; 4]) {
        (
            self.pwm_a,
            self.pwm_b,
            [self.a_in1, self.a_in2, self.b_in1, self.b_in2],
        )
    }

    fn microsteps(&self) -> u16 {
        self.resolution.value() as u16
    }

    /// Quarter-sine duty (0..=255) for microstep index `i` in `0..=N`.
    fn sine_duty(&self, i: u16) -> u16 {
        let n = self.microsteps() as f32;
        roundf(FULL_DUTY as f32 * sinf(i as f32 * FRAC_PI_2 / n)) as u16
    }

    /// Phase one step away in `direction`; `self.phase` is left untouched.
    fn next_phase(&self, direction: Direction, style: StepStyle) -> Result<u16, BackendError> {
        let m = self.microsteps();
        let half = m / 2;
        let on_odd_half = (self.phase / half) % 2 == 1;

        let delta = match style {
            StepStyle::Single if on_odd_half => half,
            StepStyle::Single => m,
            StepStyle::Double if on_odd_half => m,
            StepStyle::Double => half,
            StepStyle::Interleave => half,
            StepStyle::Microstep(n) if n == self.resolution => 1,
            StepStyle::Microstep(_) => return Err(BackendError::Unsupported),
        };

        let cycle = 4 * m;
        Ok(match direction {
            Direction::Forward => (self.phase + delta) % cycle,
            Direction::Backward => (self.phase + cycle - delta) % cycle,
        })
    }

    /// Bridge input pattern for `phase`.
    ///
    /// Bit 0: A-IN2, bit 1: B-IN1, bit 2: A-IN1, bit 3: B-IN2.
    fn latch(&self, phase: u16, style: StepStyle) -> u8 {
        let m = self.microsteps();
        if let StepStyle::Microstep(_) = style {
            match phase / m {
                0 => 0x03,
                1 => 0x06,
                2 => 0x0C,
                _ => 0x09,
            }
        } else {
            match phase / (m / 2) {
                0 => 0x01,
                1 => 0x03,
                2 => 0x02,
                3 => 0x06,
                4 => 0x04,
                5 => 0x0C,
                6 => 0x08,
                _ => 0x09,
            }
        }
    }

    /// Duty cycles (A, B) for `phase`.
    fn duties(&self, phase: u16, style: StepStyle) -> (u16, u16) {
        if !matches!(style, StepStyle::Microstep(_)) {
            return (FULL_DUTY, FULL_DUTY);
        }

        let m = self.microsteps();
        let p = phase;
        match p / m {
            0 => (self.sine_duty(m - p), self.sine_duty(p)),
            1 => (self.sine_duty(p - m), self.sine_duty(2 * m - p)),
            2 => (self.sine_duty(3 * m - p), self.sine_duty(p - 2 * m)),
            _ => (self.sine_duty(p - 3 * m), self.sine_duty(4 * m - p)),
        }
    }

    fn drive(&mut self, (duty_a, duty_b): (u16, u16), latch: u8) -> Result<(), BackendError> {
        self.pwm_a
            .set_duty_cycle_fraction(duty_a, FULL_DUTY)
            .map_err(|_| BackendError::Pwm)?;
        self.pwm_b
            .set_duty_cycle_fraction(duty_b, FULL_DUTY)
            .map_err(|_| BackendError::Pwm)?;

        let pin = |bit: u8| PinState::from(latch & bit != 0);
        self.a_in2.set_state(pin(0x01)).map_err(|_| BackendError::Pin)?;
        self.b_in1.set_state(pin(0x02)).map_err(|_| BackendError::Pin)?;
        self.a_in1.set_state(pin(0x04)).map_err(|_| BackendError::Pin)?;
        self.b_in2.set_state(pin(0x08)).map_err(|_| BackendError::Pin)?;
        Ok(())
    }
}

impl<PWM, PIN> MotorBackend for CoilBackend<PWM, PIN>
where
    PWM: SetDutyCycle,
    PIN: OutputPin,
{
    fn step(&mut self, direction: Direction, style: StepStyle) -> Result<(), BackendError> {
        let phase = self.next_phase(direction, style)?;
        self.drive(self.duties(phase, style), self.latch(phase, style))?;
        self.phase = phase;
        Ok(())
    }

    fn release(&mut self) -> Result<(), BackendError> {
        self.drive((0, 0), 0)
    }
}
