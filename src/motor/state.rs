//! Axis state.
//!
//! Two orthogonal state machines: motion (Idle ⇄ Seeking), decided purely
//! by the distance to go, and power (Powered ⇄ Released), decided by the
//! caller. Only a powered, seeking axis emits steps.

/// Motion state of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionState {
    /// On target; no stepping.
    Idle,
    /// Away from target; `tick` may step.
    Seeking,
}

impl MotionState {
    /// Motion state for a given distance to go.
    #[inline]
    pub fn from_distance(distance: i64) -> Self {
        if distance == 0 {
            MotionState::Idle
        } else {
            MotionState::Seeking
        }
    }

    /// State name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            MotionState::Idle => "Idle",
            MotionState::Seeking => "Seeking",
        }
    }
}

/// Power state of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Scheduler may issue steps.
    Powered,
    /// Coils de-energized; no steps.
    Released,
}

impl PowerState {
    /// Whether steps may be issued.
    #[inline]
    pub fn is_powered(self) -> bool {
        self == PowerState::Powered
    }

    /// State name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            PowerState::Powered => "Powered",
            PowerState::Released => "Released",
        }
    }
}

impl From<bool> for PowerState {
    fn from(powered: bool) -> Self {
        if powered {
            PowerState::Powered
        } else {
            PowerState::Released
        }
    }
}
