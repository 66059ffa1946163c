//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Micros, Microsteps, RevsPerSec, RevsPerSecSquared};
use crate::motion::{Oscillator, StepStyle, VelocityPolicy};

/// Stepping style as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    /// One coil at a time.
    #[default]
    Single,
    /// Two coils at a time.
    Double,
    /// Alternating single/double half steps.
    Interleave,
    /// Sine-weighted microsteps; resolution from `microsteps`.
    Microstep,
}

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Full steps per revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Stepping style at start-up.
    #[serde(default)]
    pub style: StyleKind,

    /// Microstep resolution, used when `style = "microstep"`.
    #[serde(default)]
    pub microsteps: Microsteps,

    /// Velocity policy.
    #[serde(default)]
    pub policy: VelocityPolicy,

    /// Initial signed speed in revolutions per second.
    #[serde(default, rename = "speed_rev_per_sec")]
    pub speed: RevsPerSec,

    /// Speed limit in revolutions per second (trapezoidal policy).
    #[serde(default, rename = "max_speed_rev_per_sec")]
    pub max_speed: RevsPerSec,

    /// Acceleration in revolutions per second squared (trapezoidal policy).
    #[serde(default, rename = "acceleration_rev_per_sec2")]
    pub acceleration: RevsPerSecSquared,

    /// Whether the axis may step right after start-up.
    #[serde(default = "default_start_powered")]
    pub start_powered: bool,

    /// Optional direction reversal period in microseconds.
    #[serde(default)]
    pub oscillation_period_us: Option<u32>,
}

fn default_start_powered() -> bool {
    true
}

impl AxisConfig {
    /// Stepping style at start-up.
    pub fn step_style(&self) -> StepStyle {
        match self.style {
            StyleKind::Single => StepStyle::Single,
            StyleKind::Double => StepStyle::Double,
            StyleKind::Interleave => StepStyle::Interleave,
            StyleKind::Microstep => StepStyle::Microstep(self.microsteps),
        }
    }

    /// Backend steps per revolution under the start-up style.
    pub fn effective_steps_per_revolution(&self) -> f32 {
        self.steps_per_revolution as f32 * self.step_style().multiplier() as f32
    }

    /// Reversal timer for this axis, if it oscillates.
    pub fn oscillator(&self, start: Micros) -> Option<Oscillator> {
        self.oscillation_period_us
            .map(|period| Oscillator::new(period, start))
    }
}
