//! lumguard - headset brightness guard
//!
//! Runs the adaptive gain controller against a simulated headset, checks
//! configuration files and measures the luminance of captured frames.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "lumguard")]
#[command(author, version, about = "Headset brightness guard")]
#[command(long_about = "
Protects a headset wearer from sudden light spikes: a panic button scales
the display gain down, scene luminance caps it automatically, and both
recover on a rate-limited ramp.

Examples:
  lumguard run --scenario scenarios/flash.yaml        # Simulated session
  lumguard run -s scenarios/panic.yaml --trace        # Print every gain write
  lumguard run -s scenarios/panic.yaml --realtime     # Run at wall-clock speed
  lumguard config                                     # Normalize config.json
  lumguard config my.json --no-write                  # Check without writing
  lumguard luma left.png right.png                    # Measure a frame pair
  RUST_LOG=lumguard_control=trace lumguard run -s scenarios/flash.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the controller against a simulated headset
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Load, validate and normalize a configuration file
    #[command(visible_alias = "c")]
    Config(ConfigArgs),

    /// Measure the luminance of one or two eye images
    #[command(visible_alias = "l")]
    Luma(LumaArgs),
}

/// Arguments for the `run` command.
#[derive(Args)]
struct RunArgs {
    /// Configuration file (created with defaults if missing)
    #[arg(short, long, default_value = lumguard_core::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Scenario YAML file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Sleep in wall-clock time instead of simulating instantly
    #[arg(long)]
    realtime: bool,

    /// Print every gain write
    #[arg(long)]
    trace: bool,
}

/// Arguments for the `config` command.
#[derive(Args)]
struct ConfigArgs {
    /// Configuration file
    #[arg(default_value = lumguard_core::DEFAULT_CONFIG_PATH)]
    path: PathBuf,

    /// Do not write the normalized configuration back
    #[arg(long)]
    no_write: bool,
}

/// Arguments for the `luma` command.
#[derive(Args)]
struct LumaArgs {
    /// Left eye image
    left: PathBuf,

    /// Right eye image (defaults to the left one)
    right: Option<PathBuf>,

    /// Use the 2x2 average reduction instead of max
    #[arg(long)]
    average: bool,

    /// Configuration used for the auto-dimming cap
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.verbose),
        Commands::Config(args) => commands::config::run(args, cli.verbose),
        Commands::Luma(args) => commands::luma::run(args, cli.verbose),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
