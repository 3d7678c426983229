//! Per-tick scene luminance sampling.
//!
//! Each call to [`LuminanceSampler::sample`] acquires both eye frames from a
//! [`FrameSource`], reduces each to a single 16-bit value, maps the brighter
//! one to perceptual brightness and differences it against the previous
//! sample to get a rate of change.

use lumguard_core::{Eye, GraphicsError, ImageSample};
use tracing::debug;

use crate::frame::LumaFrame;
use crate::reduce::{ReduceOp, reduce};
use crate::transfer::raw_to_perceptual;

/// Supplies the current single-channel frame for an eye.
///
/// Implementations wrap whatever renders the compositor output into a
/// 16-bit buffer (a GPU pass, a mirror texture copy, a synthetic scene).
pub trait FrameSource {
    /// Renders or copies the current frame for `eye`.
    fn acquire(&mut self, eye: Eye) -> Result<LumaFrame, GraphicsError>;
}

impl<F: FrameSource + ?Sized> FrameSource for Box<F> {
    fn acquire(&mut self, eye: Eye) -> Result<LumaFrame, GraphicsError> {
        (**self).acquire(eye)
    }
}

/// Stereo luminance sampler.
#[derive(Debug)]
pub struct LuminanceSampler<S> {
    source: S,
    op: ReduceOp,
    previous: Option<f32>,
}

impl<S: FrameSource> LuminanceSampler<S> {
    /// Sampler using max reduction.
    pub fn new(source: S) -> Self {
        Self::with_op(source, ReduceOp::Max)
    }

    /// Sampler using the given reduction.
    pub fn with_op(source: S, op: ReduceOp) -> Self {
        Self {
            source,
            op,
            previous: None,
        }
    }

    /// Measures the current scene.
    ///
    /// `dt` is the time since the previous sample and must be > 0.
    pub fn sample(&mut self, dt: f32) -> Result<ImageSample, GraphicsError> {
        debug_assert!(dt > 0.0, "sample dt must be positive");

        let mut raw = 0u16;
        for eye in Eye::BOTH {
            let frame = self.source.acquire(eye)?;
            raw = raw.max(reduce(&frame, self.op));
        }

        let brightness = raw_to_perceptual(raw);
        let rate = self.previous.map(|prev| (brightness - prev) / dt);
        self.previous = Some(brightness);

        debug!(brightness, rate = ?rate, "image sample");
        Ok(ImageSample { brightness, rate })
    }

    /// Most recent brightness, if any sample was taken.
    #[inline]
    pub fn last_brightness(&self) -> Option<f32> {
        self.previous
    }

    /// Forgets the previous sample so the next one has no rate.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Reduction in use.
    #[inline]
    pub fn op(&self) -> ReduceOp {
        self.op
    }

    /// Underlying frame source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the frame source.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

/// Measures a pair of frames without any rate tracking.
///
/// Returns `(left_raw, right_raw, perceptual)`.
pub fn measure_pair(left: &LumaFrame, right: &LumaFrame, op: ReduceOp) -> (u16, u16, f32) {
    let l = reduce(left, op);
    let r = reduce(right, op);
    (l, r, raw_to_perceptual(l.max(r)))
}
