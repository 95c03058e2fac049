// src/metrics/renderer.rs

//! Rasterization seam for the metrics probe.
//!
//! The probe only ever consumes a rendering backend through the
//! [`ReferenceRenderer`] trait, so tests can substitute a synthetic canvas
//! and the production path can swap rasterizers without touching the
//! measurement logic.

use super::{fontconfig, PROBE_DPI};
use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};
use log::debug;
use std::fs;

/// Renders a short reference string onto a blank canvas.
pub trait ReferenceRenderer {
    /// Render `text` as dark ink on a uniform background, at [`PROBE_DPI`],
    /// with a background margin on all four sides.
    fn render(&self, text: &str, font: &str, size_pt: f64) -> Result<RgbImage>;
}

/// Uniform background border around the rendered string, in pixels. The
/// central-figure scan needs a background run at every canvas edge.
const CANVAS_MARGIN_PX: u32 = 8;

/// Production renderer: resolves the font family through Fontconfig and
/// rasterizes with fontdue.
#[derive(Debug, Default)]
pub struct FontdueRenderer;

impl FontdueRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ReferenceRenderer for FontdueRenderer {
    fn render(&self, text: &str, font: &str, size_pt: f64) -> Result<RgbImage> {
        let file = fontconfig::find_font_file(font)?;
        debug!("resolved font '{}' to {}", font, file.display());
        let data = fs::read(&file)
            .with_context(|| format!("failed to read font file {}", file.display()))?;
        let face = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font file {}: {e}", file.display()))?;

        // Point size -> pixels at the probe resolution.
        let px = (size_pt * f64::from(PROBE_DPI) / 72.0) as f32;
        let line = face
            .horizontal_line_metrics(px)
            .ok_or_else(|| anyhow!("font '{font}' carries no horizontal line metrics"))?;
        let ascent = line.ascent.ceil() as i32;
        let descent = line.descent.floor() as i32; // negative below the baseline

        let total_advance: f32 = text.chars().map(|c| face.metrics(c, px).advance_width).sum();
        let width = total_advance.ceil() as u32 + 2 * CANVAS_MARGIN_PX;
        let height = (ascent - descent).max(1) as u32 + 2 * CANVAS_MARGIN_PX;
        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

        let baseline = CANVAS_MARGIN_PX as i32 + ascent;
        let mut pen_x = CANVAS_MARGIN_PX as f32;
        for ch in text.chars() {
            let (metrics, coverage) = face.rasterize(ch, px);
            let x0 = pen_x as i32 + metrics.xmin;
            let y0 = baseline - metrics.ymin - metrics.height as i32;
            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = coverage[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    let x = x0 + gx as i32;
                    let y = y0 + gy as i32;
                    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                        continue;
                    }
                    // Dark ink on white; overlapping glyphs keep the darker value.
                    let ink = 255 - alpha;
                    let cell = canvas.get_pixel_mut(x as u32, y as u32);
                    let v = cell.0[0].min(ink);
                    *cell = Rgb([v, v, v]);
                }
            }
            pen_x += metrics.advance_width;
        }

        Ok(canvas)
    }
}
