//! # lumguard-luma
//!
//! Scene luminance estimation for the lumguard brightness guard.
//!
//! Each eye's frame is rendered into a single-channel 16-bit buffer, reduced
//! to one value by repeated 2x2 halving (the mipmap trick), mapped through an
//! inverse 2.2 gamma to perceptual brightness, and the two eyes combined by
//! taking the brighter one.
//!
//! - [`frame`] - [`LumaFrame`] buffers and conversions
//! - [`reduce`] - 2x2 max/average reduction
//! - [`transfer`] - gamma curves for frame readback and display gain
//! - [`sampler`] - [`LuminanceSampler`] and the [`FrameSource`] trait
//!
//! # Example
//!
//! ```rust
//! use lumguard_core::{Eye, GraphicsError};
//! use lumguard_luma::{FrameSource, LumaFrame, LuminanceSampler};
//!
//! struct Flat(u16);
//!
//! impl FrameSource for Flat {
//!     fn acquire(&mut self, _eye: Eye) -> Result<LumaFrame, GraphicsError> {
//!         LumaFrame::filled(16, 9, self.0)
//!     }
//! }
//!
//! let mut sampler = LuminanceSampler::new(Flat(u16::MAX));
//! let sample = sampler.sample(0.1).unwrap();
//! assert_eq!(sample.brightness, 1.0);
//! assert!(sample.rate.is_none());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - reduce rows with rayon (enabled by default)
//! - `image` - build frames from `image::DynamicImage` (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod frame;
pub mod reduce;
pub mod sampler;
pub mod transfer;

pub use frame::{LumaFrame, REC709_LUMA, mip_level_count};
pub use reduce::{ReduceOp, downsample_2x, mip_chain, reduce};
pub use sampler::{FrameSource, LuminanceSampler, measure_pair};
pub use transfer::{analog_to_perceptual, perceptual_to_analog, raw_to_perceptual};
