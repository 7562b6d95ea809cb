//! Command-line argument definitions for the notegraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, diagram selection and logging verbosity.

use clap::Parser;

/// Command-line arguments for the notegraph diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON payload
    #[arg(help = "Path to the input JSON file")]
    pub input: String,

    /// Directory the SVG files are written to
    #[arg(short, long, default_value = "out")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Render only the diagram at this zero-based index
    #[arg(short, long)]
    pub diagram: Option<usize>,
}
