//! The adaptive gain state machine.
//!
//! Each control tick runs two stages against a [`BrightnessState`]:
//!
//! 1. **Auto**: caps the gain from the latest image sample. A static cap
//!    keeps `brightness * gain` under `StaticMaxBrightness`; a dynamic cap
//!    limits how fast a bright scene may get brighter. When the cap lifts,
//!    the gain climbs back to the recorded baseline at `RecoverRate`.
//! 2. **Manual**: panic presses scale the gain by `ActivateFactor` and
//!    record a baseline; toggle and hold resets ramp back to it at
//!    `ResetRate`.
//!
//! Auto runs first so a panic press always wins within the same tick.
//! Recovery is rate limited in both stages so restoring brightness never
//! becomes a second flash.

use lumguard_core::{Config, Cue, DeviceError, GainBounds, ImageSample};
use tracing::{debug, info};

use crate::host::{CuePlayer, GainDevice, play_best_effort};
use crate::input::InputEvents;
use crate::state::BrightnessState;

/// Combines image samples and input events into a display gain.
#[derive(Debug, Clone)]
pub struct GainController {
    config: Config,
    bounds: GainBounds,
}

impl GainController {
    /// Creates a controller for an already validated configuration.
    pub fn new(config: Config, bounds: GainBounds) -> Self {
        Self { config, bounds }
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Device gain range.
    #[inline]
    pub fn bounds(&self) -> GainBounds {
        self.bounds
    }

    /// Runs one control tick and returns the new gain.
    ///
    /// `state.current_gain` must already hold the gain read from the device.
    /// `image` is the most recent sample, if the sampler has produced one.
    pub fn tick<P: CuePlayer + ?Sized>(
        &self,
        state: &mut BrightnessState,
        dt: f32,
        image: Option<&ImageSample>,
        events: &InputEvents,
        cues: &mut P,
    ) -> f32 {
        if let Some(sample) = image {
            self.auto_stage(state, dt, sample, cues);
        }
        self.manual_stage(state, dt, events, cues);
        state.current_gain
    }

    /// Highest gain the auto stage allows for `sample`.
    ///
    /// Starts from the manual baseline when one is active, so the cap can
    /// never exceed it.
    pub fn auto_cap(&self, state: &BrightnessState, sample: &ImageSample) -> f32 {
        let auto = &self.config.auto;
        let brightness = sample.brightness;
        let mut cap = state.manual_initial_gain.unwrap_or(state.current_gain);

        if brightness > auto.static_max_brightness {
            cap = cap.min(auto.static_max_brightness / brightness);
        }
        if brightness > auto.dynamic_min_brightness {
            match sample.rate {
                Some(rate) if rate > auto.dynamic_max_rate => cap = cap.min(auto.dynamic_max_rate / rate),
                _ => {}
            }
        }
        cap
    }

    fn auto_stage<P: CuePlayer + ?Sized>(
        &self,
        state: &mut BrightnessState,
        dt: f32,
        sample: &ImageSample,
        cues: &mut P,
    ) {
        let auto = &self.config.auto;
        if !auto.enabled {
            return;
        }

        let cap = self.auto_cap(state, sample);
        if cap < state.current_gain {
            match state.auto_initial_gain {
                None => {
                    state.auto_initial_gain = Some(state.current_gain);
                    play_best_effort(cues, Cue::AutoActivate);
                    info!(
                        "Auto-dimming reduced brightness to {:.0}% (scene {:.0}%).",
                        cap * 100.0,
                        sample.brightness * 100.0
                    );
                }
                Some(_) => debug!(gain = cap, brightness = sample.brightness, "auto suppression"),
            }
            state.current_gain = cap;
            return;
        }

        let Some(baseline) = state.auto_initial_gain else {
            return;
        };

        let mut target = baseline;
        if sample.brightness > 0.0 {
            target = target.min(auto.static_max_brightness / sample.brightness - auto.recover_margin);
        }
        let step = (target - state.current_gain).min(dt * auto.recover_rate);
        if step > 0.0 {
            state.current_gain += step;
        }
        if state.current_gain >= baseline {
            state.auto_initial_gain = None;
            info!("Auto-dimming recovered to {:.0}%.", state.current_gain * 100.0);
        }
    }

    fn manual_stage<P: CuePlayer + ?Sized>(
        &self,
        state: &mut BrightnessState,
        dt: f32,
        events: &InputEvents,
        cues: &mut P,
    ) {
        if events.activate_pressed {
            self.activate(state, cues);
        }

        if state.manual_initial_gain.is_some() {
            if events.toggle_reset_pressed {
                self.set_resetting(state, !state.resetting, "toggle", cues);
            }
            if events.hold_reset_changed {
                self.set_resetting(state, events.hold_reset_held, "hold", cues);
            }
        }

        if !state.resetting {
            return;
        }

        state.auto_initial_gain = None;
        let Some(baseline) = state.manual_initial_gain else {
            state.resetting = false;
            return;
        };

        let delta = baseline - state.current_gain;
        if delta > 0.0 {
            state.current_gain += delta.min(dt * self.config.reset_rate);
        } else {
            state.manual_initial_gain = None;
            state.resetting = false;
            info!("Reset complete, brightness restored to {:.0}%.", state.current_gain * 100.0);
        }
    }

    fn activate<P: CuePlayer + ?Sized>(&self, state: &mut BrightnessState, cues: &mut P) {
        let before = state.current_gain;
        if state.manual_initial_gain.is_none_or(|baseline| baseline < before) {
            state.manual_initial_gain = Some(before);
        }

        state.current_gain = self.bounds.clamp(self.config.activate_factor * before);
        state.auto_initial_gain = None;
        state.resetting = false;

        if state.current_gain < before {
            play_best_effort(cues, Cue::Activate);
            info!("Panic button activated! Brightness decreased to {:.0}%.", state.current_gain * 100.0);
        } else {
            debug!(gain = before, "panic press at minimum brightness");
        }
    }

    /// Every request is announced, including one that leaves the flag
    /// unchanged.
    fn set_resetting<P: CuePlayer + ?Sized>(
        &self,
        state: &mut BrightnessState,
        on: bool,
        mode: &str,
        cues: &mut P,
    ) {
        state.resetting = on;
        if on {
            play_best_effort(cues, Cue::Reset);
            info!("Starting {mode} reset.");
        } else {
            info!("Cancelling {mode} reset.");
        }
    }

    /// Restores a pending manual baseline before exit.
    ///
    /// Writes the baseline straight to the device, skipping the ramp.
    /// Returns the restored gain, or `None` when nothing was pending.
    /// A failed write is returned to the caller and not retried.
    pub fn shutdown<D: GainDevice + ?Sized>(
        &self,
        state: &mut BrightnessState,
        device: &mut D,
    ) -> Result<Option<f32>, DeviceError> {
        let Some(baseline) = state.manual_initial_gain.take() else {
            return Ok(None);
        };
        state.resetting = false;
        state.auto_initial_gain = None;

        info!("Restoring brightness to {:.0}% before exit.", baseline * 100.0);
        device.write_gain(baseline)?;
        state.current_gain = baseline;
        Ok(Some(baseline))
    }
}
