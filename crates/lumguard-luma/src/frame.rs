//! Single-channel 16-bit frame buffers.
//!
//! A [`LumaFrame`] is what the off-screen luminance pass produces for one
//! eye: one unsigned 16-bit value per pixel, row-major, no padding.

use lumguard_core::GraphicsError;

use crate::transfer::unit_to_raw;

/// Rec.709 luma weights.
pub const REC709_LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Row-major 16-bit single-channel image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaFrame {
    width: u32,
    height: u32,
    data: Vec<u16>,
}

fn check_dims(width: u32, height: u32, len: usize) -> Result<(), GraphicsError> {
    let invalid = |reason: String| GraphicsError::InvalidDimensions {
        width,
        height,
        reason,
    };
    if width == 0 || height == 0 {
        return Err(invalid("width and height must be > 0".into()));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| invalid("image dimensions overflow".into()))?;
    if len != expected {
        return Err(invalid(format!("expected {} pixels, got {}", expected, len)));
    }
    Ok(())
}

impl LumaFrame {
    /// Wraps raw 16-bit samples.
    pub fn from_raw(width: u32, height: u32, data: Vec<u16>) -> Result<Self, GraphicsError> {
        check_dims(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a frame whose dimensions are already known to match `data`.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u16>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Frame filled with one value.
    pub fn filled(width: u32, height: u32, value: u16) -> Result<Self, GraphicsError> {
        check_dims(width, height, (width as usize) * (height as usize))?;
        Ok(Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Converts interleaved 8-bit RGB pixels using Rec.709 luma.
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> Result<Self, GraphicsError> {
        Self::from_interleaved(width, height, rgb, 3)
    }

    /// Converts interleaved 8-bit RGBA pixels using Rec.709 luma; alpha is ignored.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self, GraphicsError> {
        Self::from_interleaved(width, height, rgba, 4)
    }

    fn from_interleaved(
        width: u32,
        height: u32,
        src: &[u8],
        channels: usize,
    ) -> Result<Self, GraphicsError> {
        if src.len() % channels != 0 {
            return Err(GraphicsError::InvalidDimensions {
                width,
                height,
                reason: format!("{} bytes is not a multiple of {} channels", src.len(), channels),
            });
        }
        check_dims(width, height, src.len() / channels)?;

        let data = src
            .chunks_exact(channels)
            .map(|px| {
                let luma = (0..3)
                    .map(|c| f32::from(px[c]) / 255.0 * REC709_LUMA[c])
                    .sum::<f32>();
                unit_to_raw(luma)
            })
            .collect();

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Converts any decoded image to 16-bit luma.
    #[cfg(feature = "image")]
    pub fn from_image(img: image::DynamicImage) -> Result<Self, GraphicsError> {
        let luma = img.into_luma16();
        let (width, height) = luma.dimensions();
        Self::from_raw(width, height, luma.into_raw())
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw samples, row-major.
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Mutable raw samples, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Sample at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u16 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Overwrites the sample at (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u16) {
        let w = self.width as usize;
        self.data[y as usize * w + x as usize] = value;
    }

    /// Number of mip levels down to 1x1 for this frame.
    #[inline]
    pub fn mip_levels(&self) -> u32 {
        mip_level_count(self.width, self.height)
    }
}

/// Number of mip levels for given dimensions: `floor(log2(max(w, h))) + 1`.
///
/// ```rust
/// use lumguard_luma::frame::mip_level_count;
///
/// assert_eq!(mip_level_count(1024, 1024), 11);
/// assert_eq!(mip_level_count(1, 1), 1);
/// ```
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let d = width.max(height).max(1);
    u32::BITS - d.leading_zeros()
}
