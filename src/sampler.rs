// src/sampler.rs

//! Image loading and grid block sampling.
//!
//! The image is exposed as a read-only 8-bit RGB buffer; any alpha channel
//! is discarded at load time. The glyph footprint partitions it into a grid
//! of blocks, and each block is summarized by its per-channel median.

use crate::metrics::GlyphMetrics;
use anyhow::{Context, Result};
use image::RgbImage;
use std::path::Path;

/// Load an image as 8-bit RGB, discarding any alpha channel.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to load image {}", path.display()))?;
    Ok(img.to_rgb8())
}

/// Grid of glyph-sized blocks over an image.
///
/// Remainder pixels at the right and bottom edges that do not fill a whole
/// block are dropped, so `xblocks = image_width / block_width` and
/// `yblocks = image_height / block_height` with integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub xblocks: u32,
    pub yblocks: u32,
    pub block_width: u32,
    pub block_height: u32,
}

impl Grid {
    pub fn new(image_width: u32, image_height: u32, glyph: GlyphMetrics) -> Self {
        Self {
            xblocks: image_width / glyph.width_px,
            yblocks: image_height / glyph.height_px,
            block_width: glyph.width_px,
            block_height: glyph.height_px,
        }
    }
}

/// Per-channel medians of the block at grid position (`col`, `row`).
///
/// Median rather than mean, so single outlier pixels inside a block do not
/// shift its color.
pub fn block_median(img: &RgbImage, grid: Grid, col: u32, row: u32) -> [u8; 3] {
    let x0 = col * grid.block_width;
    let y0 = row * grid.block_height;
    let mut channels: [Vec<u8>; 3] = Default::default();
    for y in y0..y0 + grid.block_height {
        for x in x0..x0 + grid.block_width {
            let px = img.get_pixel(x, y);
            for (c, samples) in channels.iter_mut().enumerate() {
                samples.push(px.0[c]);
            }
        }
    }
    [
        median(&mut channels[0]),
        median(&mut channels[1]),
        median(&mut channels[2]),
    ]
}

/// Median of a non-empty sample set; even-sized populations take the
/// truncated mean of the two middle values.
fn median(values: &mut [u8]) -> u8 {
    values.sort_unstable();
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        ((u16::from(values[n / 2 - 1]) + u16::from(values[n / 2])) / 2) as u8
    }
}
