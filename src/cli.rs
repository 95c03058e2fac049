// src/cli.rs

//! Command-line surface.
//!
//! Two positionals (the text file and the image) plus the spacing, font and
//! size corrections. The generated LaTeX lands on stdout and is meant to be
//! compiled with LuaLaTeX; with manual tweaking other engines may work too.

use clap::Parser;
use std::path::PathBuf;

const LONG_ABOUT: &str = "\
Output on stdout a .tex file where TEXTFILE is laid over IMG. The .tex file \
is meant to be compiled by LuaLaTeX, but with manual tweaking it could \
possibly be compiled with other engines.

Note that TEXTFILE should be trimmed of all line structure beforehand, as \
the program does not reflow it automagically. For example, instead of

    #include <stdio.h>
    #include <stdlib.h>

    int main(int argc, char** argv){
        printf(\"%d\\n\", 42);
    }

use

    #include <stdio.h> #include <stdlib.h> int main(int argc,
    char** argv){printf(\"%d\\n\", 42);}

to get the picture correctly filled.";

/// Lay a text file over an image as colored monospace glyphs.
#[derive(Parser, Debug)]
#[command(name = "textpaint", about, long_about = LONG_ABOUT)]
pub struct Args {
    /// Text file to use. Will use it as it is, apart from trimming
    /// leading and trailing whitespace.
    #[arg(value_name = "TEXTFILE")]
    pub textfile: PathBuf,

    /// Image to use.
    #[arg(value_name = "IMG")]
    pub img: PathBuf,

    /// Horizontal kerning correction in pt.
    #[arg(short = 'x', default_value_t = -2.5, allow_hyphen_values = true)]
    pub h_correction_pt: f64,

    /// Interline spacing correction in pt.
    #[arg(short = 'y', default_value_t = -1.2, allow_hyphen_values = true)]
    pub v_correction_pt: f64,

    /// Font to use.
    #[arg(short = 'f', default_value = "Inconsolata")]
    pub font: String,

    /// Size to use in points.
    #[arg(short = 'p', default_value_t = 5.0)]
    pub point_size: f64,

    /// Where the metrics probe exports its reference canvas. Overwritten on
    /// every run and never cleaned up; pass distinct paths to run several
    /// instances concurrently.
    #[arg(long = "probe-file", default_value = "/tmp/textpaint-probe.png")]
    pub probe_file: PathBuf,
}
