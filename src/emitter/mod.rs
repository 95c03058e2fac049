// src/emitter/mod.rs

//! Block classification and LaTeX document emission.
//!
//! Walks the glyph grid in row-major order. Pure-white blocks emit a white
//! placeholder without consuming text; every other block consumes the next
//! printable character from the cyclic [`TextCursor`] and emits it wrapped
//! in a `\color[RGB]` directive set to the block's channel medians. The
//! document goes to the supplied sink; diagnostics go to the log.


use crate::metrics::GlyphMetrics;
use crate::sampler::{self, Grid};
use anyhow::Result;
use image::RgbImage;
use log::{debug, warn};
use std::borrow::Cow;
use std::io::Write;
use thiserror::Error;

/// Glyph emitted for a pure-white block, colored pure white. Functionally
/// blank, but it still occupies its cell.
pub const PLACEHOLDER: char = 'x';

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmitError {
    /// Every character of the (trimmed) text is non-printable, so no grid
    /// cell could ever be filled.
    #[error("text contains no printable characters")]
    NoPrintableCharacters,
}

/// Document-level knobs carried from the command line.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub font: String,
    pub point_size: f64,
    pub h_correction_pt: f64,
    pub v_correction_pt: f64,
}

/// Cyclic cursor over the source text.
///
/// Yields printable characters in order, skipping everything else, and
/// wraps to the start (with one diagnostic per wrap) once the text is
/// exhausted, so finite text covers arbitrarily large grids.
#[derive(Debug)]
pub struct TextCursor {
    chars: Vec<char>,
    idx: usize,
}

impl TextCursor {
    /// Fails up front when the text holds no printable character at all;
    /// consuming from such a cursor could never terminate.
    pub fn new(text: &str) -> Result<Self, EmitError> {
        let chars: Vec<char> = text.chars().collect();
        if !chars.iter().copied().any(is_printable) {
            return Err(EmitError::NoPrintableCharacters);
        }
        Ok(Self { chars, idx: 0 })
    }

    /// Next printable character, advancing (and possibly wrapping) the
    /// cursor. Non-printable characters are passed over without being
    /// yielded.
    pub fn next_printable(&mut self) -> char {
        loop {
            let ch = self.chars[self.idx];
            self.advance();
            if is_printable(ch) {
                return ch;
            }
        }
    }

    fn advance(&mut self) {
        self.idx += 1;
        if self.idx >= self.chars.len() {
            warn!("ran out of characters, wrapping to the start of the text");
            self.idx = 0;
        }
    }
}

fn is_printable(ch: char) -> bool {
    !ch.is_control()
}

/// LaTeX-safe form of a character. Special characters map to their escaped
/// sequences, newlines become a single space, everything else passes
/// through unchanged.
pub fn escape(ch: char) -> Cow<'static, str> {
    let escaped = match ch {
        '%' => r"\%",
        '$' => r"\$",
        '{' => r"\{",
        '}' => r"\}",
        '_' => r"\_",
        '#' => r"\#",
        '&' => r"\&",
        '<' => r"\textless",
        '^' => r"\^",
        '\\' => r"\textbackslash",
        '\n' => " ",
        _ => return Cow::Owned(ch.to_string()),
    };
    Cow::Borrowed(escaped)
}

/// Emit the complete document for `img` to `out`.
///
/// The grid is derived from the image dimensions and the glyph footprint;
/// remainder pixels are dropped per [`Grid`]. The fixed horizontal spacing
/// correction follows every glyph and the vertical one follows every row.
pub fn render_document<W: Write>(
    out: &mut W,
    img: &RgbImage,
    glyph: GlyphMetrics,
    text: &str,
    opts: &DocumentOptions,
) -> Result<()> {
    let mut cursor = TextCursor::new(text)?;
    let (width, height) = img.dimensions();
    let grid = Grid::new(width, height, glyph);
    debug!(
        "emitting {}x{} glyph grid over {}x{} px image",
        grid.xblocks, grid.yblocks, width, height
    );

    writeln!(out, r"\documentclass[a4paper]{{report}}")?;
    writeln!(out, r"\usepackage{{xcolor}}")?;
    writeln!(out, r"\usepackage{{fontspec}}")?;
    writeln!(out, r"\setmonofont{{{}}}", opts.font)?;
    writeln!(out, r"\begin{{document}}")?;
    writeln!(out, "{{")?;
    writeln!(out, r"\bf")?;
    writeln!(out, r"\renewcommand{{\baselinestretch}}{{0}}")?;
    writeln!(
        out,
        r"\fontsize{{{}pt}}{{{}pt}}\selectfont",
        opts.point_size as i64,
        (1.14 * opts.point_size) as i64
    )?;

    for row in 0..grid.yblocks {
        for col in 0..grid.xblocks {
            let [r, g, b] = sampler::block_median(img, grid, col, row);
            if r == 255 && g == 255 && b == 255 {
                // Blank cell: white placeholder, no character consumed.
                write!(out, r"{{\color[RGB]{{255,255,255}} \texttt{{{PLACEHOLDER}}}}}")?;
            } else {
                let ch = cursor.next_printable();
                write!(
                    out,
                    r"{{\color[RGB]{{{r},{g},{b}}} \texttt{{{}}}}}",
                    escape(ch)
                )?;
            }
            writeln!(out, r"\hspace{{{:.6}pt}}", opts.h_correction_pt)?;
        }
        writeln!(out)?;
        writeln!(out, r"\vspace{{{:.6}pt}}", opts.v_correction_pt)?;
        writeln!(out)?;
    }

    writeln!(out, "}}")?;
    writeln!(out, r"\end{{document}}")?;
    Ok(())
}
