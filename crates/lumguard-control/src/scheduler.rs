//! Two-cadence cooperative control loop.
//!
//! The scheduler keeps a next-due time for the luminance sampler and one
//! for the control tick. Each iteration runs whatever is due, writes the
//! gain if it changed, then sleeps until the earlier of the two. A late
//! tick moves its due time forward by exactly one period, so overload
//! drifts the cadence instead of queueing a burst of catch-up ticks.
//!
//! ```text
//!   quit? --> sample (if due) --> read gain --> poll input --> tick --> write (if changed)
//!     ^                                                                        |
//!     +------------------------------ sleep until next due <-------------------+
//! ```

use lumguard_core::{Config, ImageSample, Result};
use lumguard_luma::{FrameSource, LuminanceSampler};
use tracing::{info, trace};

use crate::clock::Clock;
use crate::controller::GainController;
use crate::host::Host;
use crate::input::InputDebouncer;
use crate::state::BrightnessState;

/// Counters reported when a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    /// Control ticks executed.
    pub process_ticks: u64,
    /// Luminance samples taken.
    pub image_ticks: u64,
    /// Gain writes issued to the device.
    pub gain_writes: u64,
    /// Gain after the last tick.
    pub final_gain: f32,
}

/// Drives sampling and control at their configured rates.
#[derive(Debug)]
pub struct Scheduler<C> {
    clock: C,
    process_period: f64,
    image_period: f64,
    auto_enabled: bool,
}

impl<C: Clock> Scheduler<C> {
    /// Scheduler using the periods from `config`.
    pub fn new(config: &Config, clock: C) -> Self {
        Self {
            clock,
            process_period: config.process_period(),
            image_period: config.image_period(),
            auto_enabled: config.auto.enabled,
        }
    }

    /// Clock in use.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs until the host requests quit or a fatal error occurs.
    ///
    /// `state` is left as it was after the last tick, so the caller can
    /// run [`GainController::shutdown`] whichever way the loop ended.
    /// Without a sampler, or with auto-dimming disabled, only the control
    /// cadence runs.
    pub fn run<H, S>(
        &mut self,
        controller: &GainController,
        state: &mut BrightnessState,
        mut sampler: Option<&mut LuminanceSampler<S>>,
        host: &mut H,
    ) -> Result<RunSummary>
    where
        H: Host + ?Sized,
        S: FrameSource,
    {
        let debouncer = InputDebouncer;
        let sampling = self.auto_enabled && sampler.is_some();
        let process_dt = self.process_period as f32;
        let image_dt = self.image_period as f32;

        let start = self.clock.now();
        let mut next_image = start;
        let mut next_process = start;
        let mut latest: Option<ImageSample> = None;
        let mut summary = RunSummary {
            final_gain: state.current_gain,
            ..RunSummary::default()
        };

        info!(
            process_hz = 1.0 / self.process_period,
            image_hz = if sampling { 1.0 / self.image_period } else { 0.0 },
            "running"
        );

        loop {
            if host.quit_requested() {
                info!("Quit requested.");
                break;
            }

            let now = self.clock.now();

            if sampling && now >= next_image {
                next_image += self.image_period;
                if let Some(sampler) = sampler.as_deref_mut() {
                    latest = Some(sampler.sample(image_dt)?);
                    summary.image_ticks += 1;
                }
            }

            if now >= next_process {
                next_process += self.process_period;

                let old_gain = host.read_gain()?;
                state.current_gain = old_gain;
                let events = debouncer.poll(host)?;
                let new_gain = controller.tick(state, process_dt, latest.as_ref(), &events, host);

                if new_gain != old_gain {
                    host.write_gain(new_gain)?;
                    summary.gain_writes += 1;
                    trace!(t = now - start, from = old_gain, to = new_gain, "gain write");
                }
                summary.process_ticks += 1;
                summary.final_gain = new_gain;
            }

            let next_due = if sampling {
                next_image.min(next_process)
            } else {
                next_process
            };
            if next_due > self.clock.now() {
                self.clock.sleep_until(next_due);
            }
        }

        Ok(summary)
    }
}
