//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// pyprobe - Report the active Python interpreter and its geospatial libraries.
#[derive(Debug, Parser)]
#[command(name = "pyprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Python interpreter to probe (a name on PATH or a path to an executable)
    #[arg(long, env = "PYPROBE_PYTHON", value_name = "PYTHON")]
    pub python: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One labeled fact per line
    Text,
    /// Pretty-printed JSON object
    Json,
}
