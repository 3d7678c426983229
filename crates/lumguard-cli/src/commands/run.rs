//! Simulated session command.

use anyhow::{Context, Result};
use lumguard_control::{
    BrightnessState, Clock, GainController, GainDevice, MonotonicClock, Scheduler, VirtualClock,
};
use lumguard_core::Config;
use lumguard_luma::{LuminanceSampler, perceptual_to_analog};
use lumguard_sim::{Scenario, SceneFrames, SimulatedHmd};
use tracing::{error, info};

use super::percent;
use crate::RunArgs;

/// Runs the run command.
///
/// Shutdown recovery always runs, also when the controller stopped on a
/// fatal error.
pub fn run(args: RunArgs, verbose: u8) -> Result<()> {
    let config = Config::load_or_default(&args.config);
    let scenario = Scenario::from_file(&args.scenario)
        .with_context(|| format!("Failed to load scenario: {}", args.scenario.display()))?;

    if verbose > 0 {
        eprintln!(
            "{}: {:.1}s, device [{}, {}], frame {}x{}",
            args.scenario.display(),
            scenario.end_time(),
            scenario.device.min,
            scenario.device.max,
            scenario.frame.width,
            scenario.frame.height
        );
    }

    if args.realtime {
        session(&config, &scenario, MonotonicClock::new(), args.trace)
    } else {
        session(&config, &scenario, VirtualClock::new(), args.trace)
    }
}

fn session<C: Clock + Clone>(config: &Config, scenario: &Scenario, clock: C, trace: bool) -> Result<()> {
    let mut hmd = SimulatedHmd::new(scenario, config, clock.clone());
    let bounds = hmd.gain_bounds().context("Failed to query display range")?;
    let initial = hmd.read_gain().context("Failed to read display brightness")?;
    info!(
        min = bounds.min,
        max = bounds.max,
        "Display brightness is {}.",
        percent(initial)
    );

    let controller = GainController::new(config.clone(), bounds);
    let mut state = BrightnessState::new(initial);
    let mut sampler = LuminanceSampler::new(SceneFrames::new(scenario, clock.clone()));
    let mut scheduler = Scheduler::new(config, clock);

    let outcome = scheduler.run(&controller, &mut state, Some(&mut sampler), &mut hmd);
    if let Err(e) = &outcome {
        error!(kind = e.kind(), "Stopping after a fatal {} error.", e.kind());
    }

    if let Err(e) = controller.shutdown(&mut state, &mut hmd) {
        error!("Failed to restore brightness: {e}");
    }

    if trace {
        for write in hmd.writes() {
            println!("{:9.3}s  gain {:.4}", write.at, write.gain);
        }
    }

    let summary = outcome.context("Controller stopped")?;
    let final_gain = hmd.gain();
    println!(
        "{} control ticks, {} luminance samples, {} gain writes",
        summary.process_ticks, summary.image_ticks, summary.gain_writes
    );
    println!(
        "final gain {} (analog {:.4})",
        percent(final_gain),
        perceptual_to_analog(final_gain)
    );
    if !hmd.cues().is_empty() {
        let cues: Vec<_> = hmd.cues().iter().map(|(at, cue)| format!("{}@{at:.2}s", cue.name())).collect();
        println!("cues: {}", cues.join(", "));
    }
    Ok(())
}
