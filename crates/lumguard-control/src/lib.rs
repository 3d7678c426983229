//! # lumguard-control
//!
//! The control side of lumguard: edge detection on the panic and reset
//! actions, the gain state machine, and the loop that runs both against
//! a headset host.
//!
//! ## Crate Structure
//!
//! ```text
//! lumguard-control
//!    |
//!    +-- host       (GainDevice, InputSource, CuePlayer, QuitSignal)
//!    +-- input      (InputDebouncer, InputEvents)
//!    +-- state      (BrightnessState)
//!    +-- controller (GainController: tick, shutdown)
//!    +-- clock      (MonotonicClock, VirtualClock)
//!    +-- scheduler  (Scheduler, RunSummary)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lumguard_control::{BrightnessState, GainController, InputEvents, SilentCues};
//! use lumguard_core::{Config, GainBounds};
//!
//! let ctl = GainController::new(Config::default(), GainBounds::new(0.2, 1.6));
//! let mut state = BrightnessState::new(1.0);
//! let gain = ctl.tick(&mut state, 1.0 / 60.0, None, &InputEvents::activate(), &mut SilentCues);
//! assert_eq!(gain, 0.5);
//! assert_eq!(state.manual_initial_gain, Some(1.0));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod clock;
pub mod controller;
pub mod host;
pub mod input;
pub mod scheduler;
pub mod state;

pub use clock::{Clock, MonotonicClock, VirtualClock};
pub use controller::GainController;
pub use host::{CuePlayer, GainDevice, Host, InputSource, QuitSignal, SilentCues, play_best_effort};
pub use input::{InputDebouncer, InputEvents, RawInput};
pub use scheduler::{RunSummary, Scheduler};
pub use state::BrightnessState;
