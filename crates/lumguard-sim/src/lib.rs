//! # lumguard-sim
//!
//! A simulated headset host for running the lumguard controller without a
//! VR runtime: scripted scenarios, an in-memory settings store, synthetic
//! frames and a cue log.
//!
//! ## Crate Structure
//!
//! ```text
//! lumguard-sim
//!    |
//!    +-- scenario (Scenario: YAML timeline of scene, input, quit)
//!    +-- hmd      (SimulatedHmd host, SceneFrames frame source)
//!    +-- error    (SimError)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lumguard_control::{BrightnessState, GainController, GainDevice, Scheduler, VirtualClock};
//! use lumguard_core::Config;
//! use lumguard_luma::LuminanceSampler;
//! use lumguard_sim::{Scenario, SceneFrames, SimulatedHmd};
//!
//! let scenario = Scenario::from_yaml_str("duration: 1.0").unwrap();
//! let config = Config::default();
//! let clock = VirtualClock::new();
//!
//! let mut hmd = SimulatedHmd::new(&scenario, &config, clock.clone());
//! let mut sampler = LuminanceSampler::new(SceneFrames::new(&scenario, clock.clone()));
//! let controller = GainController::new(config.clone(), hmd.gain_bounds().unwrap());
//! let mut state = BrightnessState::new(hmd.read_gain().unwrap());
//!
//! let summary = Scheduler::new(&config, clock)
//!     .run(&controller, &mut state, Some(&mut sampler), &mut hmd)
//!     .unwrap();
//! assert!(summary.process_ticks >= 60);
//! assert_eq!(summary.gain_writes, 0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod hmd;
pub mod scenario;

pub use error::{SimError, SimResult};
pub use hmd::{GainWrite, SceneFrames, SimulatedHmd};
pub use scenario::{DeviceSpec, FailureSpec, FrameSpec, InputStep, Scenario, SceneSegment};
