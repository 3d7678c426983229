//! Configuration check command.
//!
//! Loads the file the same way a session does, prints the normalized
//! result and, unless `--no-write`, writes it back.

use anyhow::{Context, Result};
use lumguard_core::Config;

use crate::ConfigArgs;

/// Runs the config command.
pub fn run(args: ConfigArgs, verbose: u8) -> Result<()> {
    let config = if args.no_write {
        super::read_config(&args.path)?
    } else {
        Config::load_or_default(&args.path)
    };

    if verbose > 0 {
        eprintln!("{}:", args.path.display());
        eprintln!("  control tick:  {:.2} ms", config.process_period() * 1000.0);
        if config.auto.enabled {
            eprintln!("  luma sample:   {:.2} ms", config.image_period() * 1000.0);
        } else {
            eprintln!("  luma sample:   disabled");
        }
    }

    let json = serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
    println!("{json}");
    Ok(())
}
