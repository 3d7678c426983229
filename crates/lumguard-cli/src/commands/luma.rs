//! Luminance measurement command.
//!
//! Reduces one or two captured eye images the way the live sampler does
//! and reports the resulting brightness and the gain auto-dimming would
//! allow at full brightness.

use std::path::Path;

use anyhow::{Context, Result};
use lumguard_control::{BrightnessState, GainController};
use lumguard_core::{Config, GainBounds, ImageSample};
use lumguard_luma::{LumaFrame, ReduceOp, measure_pair, raw_to_perceptual};

use super::percent;
use crate::LumaArgs;

fn load_frame(path: &Path) -> Result<LumaFrame> {
    let img = image::open(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    LumaFrame::from_image(img).with_context(|| format!("Unusable image: {}", path.display()))
}

/// Runs the luma command.
pub fn run(args: LumaArgs, verbose: u8) -> Result<()> {
    let op = if args.average { ReduceOp::Average } else { ReduceOp::Max };
    let config = match &args.config {
        Some(path) => super::read_config(path)?,
        None => Config::default(),
    };

    let left = load_frame(&args.left)?;
    let right = match &args.right {
        Some(path) => load_frame(path)?,
        None => left.clone(),
    };

    let (l, r, combined) = measure_pair(&left, &right, op);

    for (name, frame, raw) in [("left", &left, l), ("right", &right, r)] {
        println!(
            "{name:>5}: {}x{}  raw {raw:>5}  brightness {}",
            frame.width(),
            frame.height(),
            percent(raw_to_perceptual(raw))
        );
        if verbose > 0 {
            println!("       {} mip levels", frame.mip_levels());
        }
    }
    println!(" both: brightness {} ({op:?})", percent(combined));

    let controller = GainController::new(config, GainBounds::default());
    let cap = controller.auto_cap(&BrightnessState::new(1.0), &ImageSample::first(combined));
    println!("  cap: {} of full gain", percent(cap));
    Ok(())
}
