//! Mipmap-style 2x2 reduction of 16-bit frames.
//!
//! The frame is halved repeatedly, each output texel combining the 2x2
//! block below it, until a single texel remains. This is what a GPU does
//! when generating a mip chain and reading back the coarsest level.
//!
//! - [`ReduceOp::Max`] keeps the brightest texel of each block, so the
//!   final value is the frame maximum. Used for exposure safety.
//! - [`ReduceOp::Average`] is a 2x2 box filter with round-to-nearest
//!   quantization at every level, like a hardware mipmap.
//!
//! Odd sizes halve with ceiling and the block is clamped at the edge, so
//! the last row/column is never dropped.
//!
//! ```rust
//! use lumguard_luma::{LumaFrame, reduce::{reduce, ReduceOp}};
//!
//! let mut frame = LumaFrame::filled(5, 3, 100).unwrap();
//! frame.set(4, 2, 60000);
//! assert_eq!(reduce(&frame, ReduceOp::Max), 60000);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::frame::LumaFrame;

/// How a 2x2 block collapses into one texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceOp {
    /// Brightest texel of the block.
    #[default]
    Max,
    /// Rounded mean of the block.
    Average,
}

impl ReduceOp {
    #[inline]
    fn combine(self, a: u16, b: u16, c: u16, d: u16) -> u16 {
        match self {
            Self::Max => a.max(b).max(c).max(d),
            Self::Average => {
                let sum = u32::from(a) + u32::from(b) + u32::from(c) + u32::from(d);
                ((sum + 2) / 4) as u16
            }
        }
    }
}

/// Dimensions of the next mip level.
#[inline]
pub fn half_dims(width: u32, height: u32) -> (u32, u32) {
    (width.div_ceil(2).max(1), height.div_ceil(2).max(1))
}

fn reduce_row(src: &[u16], src_w: usize, src_h: usize, dy: usize, row: &mut [u16], op: ReduceOp) {
    let y0 = (dy * 2).min(src_h - 1);
    let y1 = (dy * 2 + 1).min(src_h - 1);
    let top = &src[y0 * src_w..(y0 + 1) * src_w];
    let bottom = &src[y1 * src_w..(y1 + 1) * src_w];

    for (dx, out) in row.iter_mut().enumerate() {
        let x0 = (dx * 2).min(src_w - 1);
        let x1 = (dx * 2 + 1).min(src_w - 1);
        *out = op.combine(top[x0], top[x1], bottom[x0], bottom[x1]);
    }
}

/// Produces the next mip level of `src`.
pub fn downsample_2x(src: &LumaFrame, op: ReduceOp) -> LumaFrame {
    let src_w = src.width() as usize;
    let src_h = src.height() as usize;
    let (new_w, new_h) = half_dims(src.width(), src.height());

    let mut dst = vec![0u16; new_w as usize * new_h as usize];
    let data = src.data();

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(new_w as usize)
        .enumerate()
        .for_each(|(dy, row)| reduce_row(data, src_w, src_h, dy, row, op));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(new_w as usize)
        .enumerate()
        .for_each(|(dy, row)| reduce_row(data, src_w, src_h, dy, row, op));

    LumaFrame::from_parts(new_w, new_h, dst)
}

/// Builds the full mip chain, level 0 (a copy of `src`) down to 1x1.
pub fn mip_chain(src: &LumaFrame, op: ReduceOp) -> Vec<LumaFrame> {
    let mut levels = Vec::with_capacity(src.mip_levels() as usize + 1);
    levels.push(src.clone());

    while let Some(current) = levels.last() {
        if current.width() == 1 && current.height() == 1 {
            break;
        }
        let next = downsample_2x(current, op);
        levels.push(next);
    }

    levels
}

/// Reduces a frame to its single coarsest texel.
pub fn reduce(src: &LumaFrame, op: ReduceOp) -> u16 {
    if src.width() == 1 && src.height() == 1 {
        return src.get(0, 0);
    }

    let mut current = downsample_2x(src, op);
    let mut levels = 1;
    while current.width() > 1 || current.height() > 1 {
        current = downsample_2x(&current, op);
        levels += 1;
    }

    trace!(
        width = src.width(),
        height = src.height(),
        levels,
        value = current.get(0, 0),
        "reduced frame"
    );
    current.get(0, 0)
}
