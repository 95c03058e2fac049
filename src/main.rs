// src/main.rs

// Declare modules
mod cli;
mod emitter;
mod metrics;
mod sampler;

use crate::cli::Args;
use crate::emitter::DocumentOptions;
use crate::metrics::renderer::FontdueRenderer;
use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs;
use std::io::{self, Write};

/// Main entry point for the `textpaint` tool.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    // Diagnostics go to stderr; the generated document alone goes to stdout.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();
    info!("{:?}", args);

    let text = fs::read_to_string(&args.textfile)
        .with_context(|| format!("failed to read text file {}", args.textfile.display()))?;
    let text = text.trim();

    // --- Font Metrics Probe ---
    let renderer = FontdueRenderer::new();
    let glyph = metrics::measure_glyph(&renderer, &args.font, args.point_size, &args.probe_file)
        .with_context(|| format!("failed to measure '{}' at {}pt", args.font, args.point_size))?;
    info!("glyph footprint: {}x{} px", glyph.width_px, glyph.height_px);

    // --- Image Sampler ---
    let img = sampler::load_rgb(&args.img)?;
    info!("image loaded: {}x{} px", img.width(), img.height());

    // --- Block Classifier & Emitter ---
    let opts = DocumentOptions {
        font: args.font.clone(),
        point_size: args.point_size,
        h_correction_pt: args.h_correction_pt,
        v_correction_pt: args.v_correction_pt,
    };
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    emitter::render_document(&mut out, &img, glyph, text, &opts)?;
    out.flush().context("failed to flush document to stdout")?;

    Ok(())
}
