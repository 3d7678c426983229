//! # lumguard-core
//!
//! Core types for the lumguard headset brightness guard.
//!
//! - [`Config`], [`AutoConfig`] - validated controller settings
//! - [`ImageSample`], [`GainBounds`], [`Eye`] - values passed between stages
//! - [`ActionId`], [`ActionState`], [`Cue`] - input and feedback identifiers
//! - [`ControlError`] and the per-collaborator error types
//!
//! ## Crate Structure
//!
//! ```text
//! lumguard-core (this crate)
//!    ^
//!    |
//!    +-- lumguard-luma (frame reduction, luminance sampling)
//!    +-- lumguard-control (debouncer, gain controller, scheduler)
//!    +-- lumguard-sim (simulated headset host)
//!    +-- lumguard-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod action;
pub mod config;
pub mod error;
pub mod sample;

pub use action::{ActionId, ActionState, Cue};
pub use config::{AutoConfig, Config, DEFAULT_CONFIG_PATH};
pub use error::*;
pub use sample::{Eye, GainBounds, ImageSample};
