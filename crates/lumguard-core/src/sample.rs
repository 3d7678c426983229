//! Luminance samples and display gain bounds.

use std::fmt;

/// One of the two stereo views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Left eye view.
    Left,
    /// Right eye view.
    Right,
}

impl Eye {
    /// Both eyes, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Lowercase name used in logs and errors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Eye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scene luminance measured at one sampling tick.
///
/// `rate` is `None` for the first sample of a run, since there is no
/// previous brightness to difference against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSample {
    /// Perceptual brightness of the brighter eye, in [0, 1].
    pub brightness: f32,
    /// Brightness change per second since the previous sample.
    pub rate: Option<f32>,
}

impl ImageSample {
    /// Sample without rate information.
    #[inline]
    pub const fn first(brightness: f32) -> Self {
        Self {
            brightness,
            rate: None,
        }
    }

    /// Sample with a known rate.
    #[inline]
    pub const fn with_rate(brightness: f32, rate: f32) -> Self {
        Self {
            brightness,
            rate: Some(rate),
        }
    }
}

/// Valid perceptual gain range of the display, queried once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainBounds {
    /// Lowest gain the display accepts.
    pub min: f32,
    /// Highest gain the display accepts.
    pub max: f32,
}

impl GainBounds {
    /// Creates bounds, swapping the ends if given in reverse.
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamps a gain into the display range.
    #[inline]
    pub fn clamp(&self, gain: f32) -> f32 {
        gain.max(self.min).min(self.max)
    }
}

impl Default for GainBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}
