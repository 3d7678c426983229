//! Input actions and audio cues.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Digital actions the controller listens to.
///
/// Serialized in snake_case (`activate`, `toggle_reset`, `hold_reset`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    /// Panic button: step the gain down.
    Activate,
    /// Press to start or cancel a manual recovery ramp.
    ToggleReset,
    /// Hold to run a manual recovery ramp, release to stop.
    HoldReset,
}

impl ActionId {
    /// All actions in polling order.
    pub const ALL: [Self; 3] = [Self::Activate, Self::ToggleReset, Self::HoldReset];

    /// Action path in the binding manifest.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Activate => "/actions/main/in/activate",
            Self::ToggleReset => "/actions/main/in/reset-auto",
            Self::HoldReset => "/actions/main/in/reset",
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Activate => "Activate",
            Self::ToggleReset => "Reset (Auto)",
            Self::HoldReset => "Reset (Hold)",
        }
    }
}

/// Raw digital action data for one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionState {
    /// Whether the action is currently down.
    pub pressed: bool,
    /// Whether `pressed` changed since the previous poll.
    pub changed: bool,
}

impl ActionState {
    /// Action went down this poll.
    pub const PRESS: Self = Self {
        pressed: true,
        changed: true,
    };
    /// Action went up this poll.
    pub const RELEASE: Self = Self {
        pressed: false,
        changed: true,
    };
    /// Action held since an earlier poll.
    pub const HELD: Self = Self {
        pressed: true,
        changed: false,
    };
}

/// Audio feedback cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Panic activation lowered the gain.
    Activate,
    /// Auto-dimming started suppressing the gain.
    AutoActivate,
    /// A manual recovery ramp started.
    Reset,
}

impl Cue {
    /// Lowercase name used in logs and errors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::AutoActivate => "auto-activate",
            Self::Reset => "reset",
        }
    }

    /// Configured sound asset for this cue.
    pub fn sound<'a>(self, config: &'a Config) -> &'a str {
        match self {
            Self::Activate => &config.activate_sound,
            Self::AutoActivate => &config.auto.activate_sound,
            Self::Reset => &config.reset_sound,
        }
    }
}
