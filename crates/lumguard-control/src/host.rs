//! Capabilities the controller needs from the headset runtime.
//!
//! The control loop never talks to a concrete VR runtime. It is handed
//! something implementing these traits: a real runtime binding, or the
//! simulated headset from `lumguard-sim`.

use lumguard_core::{ActionId, ActionState, Cue, CueError, DeviceError, GainBounds, InputError};
use tracing::warn;

/// Display gain settings store. Gains are perceptual (1.0 = calibrated).
pub trait GainDevice {
    /// Valid gain range, queried once at startup.
    fn gain_bounds(&mut self) -> Result<GainBounds, DeviceError>;

    /// Current gain.
    fn read_gain(&mut self) -> Result<f32, DeviceError>;

    /// Applies a new gain.
    fn write_gain(&mut self, gain: f32) -> Result<(), DeviceError>;
}

/// Digital action polling.
pub trait InputSource {
    /// Refreshes action data for this tick. Called once before reading actions.
    fn update(&mut self) -> Result<(), InputError> {
        Ok(())
    }

    /// Reads the state of one action.
    fn read_action_state(&mut self, action: ActionId) -> Result<ActionState, InputError>;
}

/// Audio feedback.
pub trait CuePlayer {
    /// Plays a cue. Failures are reported but never fatal.
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

/// External request to stop the controller.
pub trait QuitSignal {
    /// True once the runtime or user asked to quit.
    fn quit_requested(&mut self) -> bool;
}

/// Everything the scheduler drives besides the frame source.
pub trait Host: GainDevice + InputSource + CuePlayer + QuitSignal {}

impl<T: GainDevice + InputSource + CuePlayer + QuitSignal + ?Sized> Host for T {}

/// Cue player that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&mut self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Plays a cue, logging and discarding any failure.
pub fn play_best_effort<P: CuePlayer + ?Sized>(player: &mut P, cue: Cue) {
    if let Err(e) = player.play(cue) {
        warn!("{e}");
    }
}
