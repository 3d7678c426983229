//! Mutable controller state.

/// Gain state owned by the control loop and passed into every tick.
///
/// `current_gain` mirrors the device. The two baselines are the gains
/// recorded when a manual or automatic reduction started, and are the
/// targets their recovery ramps climb back to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrightnessState {
    /// Perceptual gain, 1.0 = calibrated.
    pub current_gain: f32,
    /// Gain before the first panic press since the last full recovery.
    pub manual_initial_gain: Option<f32>,
    /// Gain before auto-dimming started suppressing.
    pub auto_initial_gain: Option<f32>,
    /// Manual recovery ramp is running.
    pub resetting: bool,
}

impl BrightnessState {
    /// Fresh state seeded from the device gain.
    pub const fn new(current_gain: f32) -> Self {
        Self {
            current_gain,
            manual_initial_gain: None,
            auto_initial_gain: None,
            resetting: false,
        }
    }

    /// No reduction of either kind is in effect.
    pub fn is_idle(&self) -> bool {
        self.manual_initial_gain.is_none() && self.auto_initial_gain.is_none() && !self.resetting
    }
}
