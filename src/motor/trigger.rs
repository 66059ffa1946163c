//! Oscilloscope trigger outputs.
//!
//! Two digital lines pulse along with the motor:
//! - `step` toggles on every issued step;
//! - `beat` toggles once per beat, the shortest repeating coil pattern of the
//!   active style (2 steps for single/double, 4 for interleave, `2 * N` for
//!   `N` microsteps). Triggering a scope on `beat` gives a stable picture of
//!   the coil voltages at constant speed.
//!
//! The lines are a side channel. Pin errors are swallowed; they never affect
//! motion timing or position.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};

use crate::motion::StepStyle;

/// Output for an axis with no scope wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

impl ErrorType for Disconnected {
    type Error = Infallible;
}

impl OutputPin for Disconnected {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Logical levels of the trigger lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerState {
    /// Level of the `step` line.
    pub step_level: bool,
    /// Level of the `beat` line.
    pub beat_level: bool,
    /// Position within the current beat, `0..beat_length`.
    pub beat_counter: u8,
}

/// Drives the `step` and `beat` lines.
pub struct TriggerSignaler<STEP, BEAT>
where
    STEP: OutputPin,
    BEAT: OutputPin,
{
    step_pin: STEP,
    beat_pin: BEAT,
    state: TriggerState,
    beat_length: u8,
}

impl<STEP, BEAT> TriggerSignaler<STEP, BEAT>
where
    STEP: OutputPin,
    BEAT: OutputPin,
{
    /// Create a signaler for `style`, driving both lines low.
    pub fn new(step_pin: STEP, beat_pin: BEAT, style: StepStyle) -> Self {
        let mut signaler = Self {
            step_pin,
            beat_pin,
            state: TriggerState::default(),
            beat_length: style.beat_length(),
        };
        signaler.reset(style);
        signaler
    }

    /// Current line levels and beat position.
    #[inline]
    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Steps per beat for the active style.
    #[inline]
    pub fn beat_length(&self) -> u8 {
        self.beat_length
    }

    /// Restart the beat for a new style and drive both lines low.
    pub fn reset(&mut self, style: StepStyle) {
        self.beat_length = style.beat_length();
        self.state = TriggerState::default();
        let _ = self.step_pin.set_low();
        let _ = self.beat_pin.set_low();
    }

    /// Record one issued step.
    pub fn update(&mut self) {
        if self.state.beat_counter == 0 {
            self.on_beat_boundary();
        }
        self.on_step();

        self.state.beat_counter += 1;
        if self.state.beat_counter >= self.beat_length {
            self.state.beat_counter = 0;
        }
    }

    /// Toggle the `step` line.
    pub fn on_step(&mut self) {
        self.state.step_level = !self.state.step_level;
        let _ = self.step_pin.set_state(PinState::from(self.state.step_level));
    }

    /// Toggle the `beat` line.
    pub fn on_beat_boundary(&mut self) {
        self.state.beat_level = !self.state.beat_level;
        let _ = self.beat_pin.set_state(PinState::from(self.state.beat_level));
    }

    /// Give back the output pins.
    pub fn release_pins(self) -> (STEP, BEAT) {
        (self.step_pin, self.beat_pin)
    }
}
