// src/metrics/mod.rs

//! Font metrics probe.
//!
//! Measures the pixel footprint of one glyph of a monospace font at a given
//! point size: a three-character reference string is rendered on a blank
//! canvas at a fixed 300 dpi, exported to a raster file, reloaded, and the
//! footprint of the "central figure" (the contiguous non-background run in
//! the summed red-channel intensity profile along each axis) is taken. The
//! total measured width is divided by the reference string length to
//! approximate a single character.
//!
//! The export file is overwritten on every call and intentionally left
//! behind afterward.

pub mod fontconfig;
pub mod renderer;
mod tests;

use anyhow::Context;
use log::debug;
use self::renderer::ReferenceRenderer;
use std::path::Path;
use thiserror::Error;

/// Resolution of the probe canvas, in dots per inch.
pub const PROBE_DPI: u32 = 300;

/// Reference string rendered by the probe. Three characters chosen to
/// bracket typical glyph extents: wide lowercase around a tall uppercase.
const REFERENCE_TEXT: &str = "mAm";

/// Pixel footprint of one glyph at a given font and size. Immutable once
/// measured; grid dimensions are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Error, Debug)]
pub enum MeasureError {
    /// The reference canvas rendered as all background, so the measured
    /// footprint collapsed to zero. Typically a missing or empty font.
    #[error(
        "glyph measurement for '{font}' at {size_pt}pt collapsed to \
         {width_px}x{height_px} px; the reference canvas is all background"
    )]
    Collapsed {
        font: String,
        size_pt: f64,
        width_px: u32,
        height_px: u32,
    },
}

/// Extent of the central figure in a 1-D intensity profile.
///
/// The profile is assumed to consist of a uniform background run at each
/// end framing a single contiguous foreground block; disjoint foreground
/// runs are not handled. Returns 0 for an entirely uniform profile.
pub fn central_figure_extent(profile: &[u64]) -> u32 {
    if profile.is_empty() {
        return 0;
    }
    let first = profile[0];
    let last = profile[profile.len() - 1];
    let start = profile.iter().take_while(|&&v| v == first).count();
    let trailing = profile.iter().rev().take_while(|&&v| v == last).count();
    let end = profile.len() - trailing;
    end.saturating_sub(start) as u32
}

/// Measure one glyph of `font` at `size_pt`.
///
/// Renders the reference string through `renderer`, exports the canvas to
/// `export_path`, reloads it, and measures both axes. The export file is
/// left on disk.
///
/// # Errors
/// Fails with [`MeasureError::Collapsed`] when either measured extent is
/// zero, and with the underlying error when rendering or file I/O fails.
pub fn measure_glyph(
    renderer: &dyn ReferenceRenderer,
    font: &str,
    size_pt: f64,
    export_path: &Path,
) -> anyhow::Result<GlyphMetrics> {
    let canvas = renderer.render(REFERENCE_TEXT, font, size_pt).with_context(|| {
        format!("failed to render reference string {REFERENCE_TEXT:?} in '{font}' at {size_pt}pt")
    })?;

    canvas
        .save(export_path)
        .with_context(|| format!("failed to export probe canvas to {}", export_path.display()))?;
    let probe = image::open(export_path)
        .with_context(|| format!("failed to reload probe canvas {}", export_path.display()))?
        .to_rgb8();

    let (width, height) = probe.dimensions();
    let mut col_profile = vec![0u64; width as usize];
    let mut row_profile = vec![0u64; height as usize];
    for (x, y, px) in probe.enumerate_pixels() {
        col_profile[x as usize] += u64::from(px.0[0]);
        row_profile[y as usize] += u64::from(px.0[0]);
    }

    let reference_len = REFERENCE_TEXT.chars().count() as u32;
    let width_px = central_figure_extent(&col_profile) / reference_len;
    let height_px = central_figure_extent(&row_profile);
    debug!("probe canvas {width}x{height} px, measured glyph {width_px}x{height_px} px");

    if width_px == 0 || height_px == 0 {
        return Err(MeasureError::Collapsed {
            font: font.to_string(),
            size_pt,
            width_px,
            height_px,
        }
        .into());
    }
    Ok(GlyphMetrics { width_px, height_px })
}
