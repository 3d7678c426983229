//! Edge detection for the three controller actions.
//!
//! The runtime reports each digital action as `{pressed, changed}`. The
//! controller only cares about edges: a fresh press of Activate or
//! ToggleReset, and any transition of HoldReset together with its level.

use lumguard_core::{ActionId, ActionState, InputError};
use tracing::trace;

use crate::host::InputSource;

/// Raw action data for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawInput {
    /// Panic button.
    pub activate: ActionState,
    /// Toggle-style reset.
    pub toggle_reset: ActionState,
    /// Hold-style reset.
    pub hold_reset: ActionState,
}

/// Edge events consumed by the gain controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEvents {
    /// Activate went down this tick.
    pub activate_pressed: bool,
    /// ToggleReset went down this tick.
    pub toggle_reset_pressed: bool,
    /// HoldReset changed level this tick.
    pub hold_reset_changed: bool,
    /// HoldReset is currently down.
    pub hold_reset_held: bool,
}

impl InputEvents {
    /// No events.
    pub const NONE: Self = Self {
        activate_pressed: false,
        toggle_reset_pressed: false,
        hold_reset_changed: false,
        hold_reset_held: false,
    };

    /// Only a panic press.
    pub const fn activate() -> Self {
        Self {
            activate_pressed: true,
            ..Self::NONE
        }
    }

    /// Only a toggle-reset press.
    pub const fn toggle_reset() -> Self {
        Self {
            toggle_reset_pressed: true,
            ..Self::NONE
        }
    }

    /// Only a hold-reset transition to `held`.
    pub const fn hold_reset(held: bool) -> Self {
        Self {
            hold_reset_changed: true,
            hold_reset_held: held,
            ..Self::NONE
        }
    }

    /// True if nothing happened.
    pub fn is_empty(&self) -> bool {
        !(self.activate_pressed || self.toggle_reset_pressed || self.hold_reset_changed)
    }
}

/// Turns raw action data into [`InputEvents`]. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputDebouncer;

impl InputDebouncer {
    /// Projects raw states onto edge events.
    pub fn debounce(&self, raw: &RawInput) -> InputEvents {
        InputEvents {
            activate_pressed: raw.activate.changed && raw.activate.pressed,
            toggle_reset_pressed: raw.toggle_reset.changed && raw.toggle_reset.pressed,
            hold_reset_changed: raw.hold_reset.changed,
            hold_reset_held: raw.hold_reset.pressed,
        }
    }

    /// Reads all actions from `source` and debounces them.
    pub fn poll<I: InputSource + ?Sized>(&self, source: &mut I) -> Result<InputEvents, InputError> {
        source.update()?;
        let raw = RawInput {
            activate: source.read_action_state(ActionId::Activate)?,
            toggle_reset: source.read_action_state(ActionId::ToggleReset)?,
            hold_reset: source.read_action_state(ActionId::HoldReset)?,
        };
        let events = self.debounce(&raw);
        if !events.is_empty() {
            trace!(?events, "input events");
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edges() {
        let raw = RawInput {
            activate: ActionState::PRESS,
            toggle_reset: ActionState::HELD,
            hold_reset: ActionState::default(),
        };
        let ev = InputDebouncer.debounce(&raw);
        assert!(ev.activate_pressed);
        assert!(!ev.toggle_reset_pressed, "held without change is not a press");
        assert!(!ev.hold_reset_changed);
    }

    #[test]
    fn test_release_is_not_press() {
        let raw = RawInput {
            activate: ActionState::RELEASE,
            toggle_reset: ActionState::RELEASE,
            hold_reset: ActionState::RELEASE,
        };
        let ev = InputDebouncer.debounce(&raw);
        assert!(!ev.activate_pressed);
        assert!(!ev.toggle_reset_pressed);
        assert!(ev.hold_reset_changed);
        assert!(!ev.hold_reset_held);
    }

    #[test]
    fn test_hold_level_passthrough() {
        let raw = RawInput {
            hold_reset: ActionState::HELD,
            ..RawInput::default()
        };
        let ev = InputDebouncer.debounce(&raw);
        assert!(!ev.hold_reset_changed);
        assert!(ev.hold_reset_held);
        assert!(ev.is_empty());
    }

    struct Scripted {
        updates: u32,
        fail: Option<ActionId>,
    }

    impl InputSource for Scripted {
        fn update(&mut self) -> Result<(), InputError> {
            self.updates += 1;
            Ok(())
        }

        fn read_action_state(&mut self, action: ActionId) -> Result<ActionState, InputError> {
            if self.fail == Some(action) {
                return Err(InputError::InvalidBinding {
                    action: action.name(),
                    reason: "unbound".into(),
                });
            }
            Ok(match action {
                ActionId::ToggleReset => ActionState::PRESS,
                _ => ActionState::default(),
            })
        }
    }

    #[test]
    fn test_poll_reads_all_actions() {
        let mut src = Scripted {
            updates: 0,
            fail: None,
        };
        let ev = InputDebouncer.poll(&mut src).unwrap();
        assert_eq!(ev, InputEvents::toggle_reset());
        assert_eq!(src.updates, 1);
    }

    #[test]
    fn test_poll_propagates_binding_error() {
        let mut src = Scripted {
            updates: 0,
            fail: Some(ActionId::HoldReset),
        };
        let err = InputDebouncer.poll(&mut src).unwrap_err();
        assert!(err.to_string().contains("Reset (Hold)"));
    }
}
