//! The probe command.

use crate::cli::args::{Cli, OutputFormat};
use crate::cli::commands::{Command, CommandResult};
use crate::error::Result;
use crate::probe::EnvironmentProbe;
use crate::runtime::{locate_interpreter, parse_system_path, PythonInterpreter};
use anyhow::Context;
use std::io::Write;
use std::path::PathBuf;

/// Locates the interpreter, probes it, and writes the report.
#[derive(Debug, Clone)]
pub struct ProbeCommand {
    python: Option<PathBuf>,
    format: OutputFormat,
    path_entries: Vec<PathBuf>,
}

impl ProbeCommand {
    /// Build the command from parsed arguments and the process PATH.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.python.clone(), cli.format, parse_system_path())
    }

    /// Build the command with an explicit PATH to search.
    pub fn new(python: Option<PathBuf>, format: OutputFormat, path_entries: Vec<PathBuf>) -> Self {
        Self {
            python,
            format,
            path_entries,
        }
    }
}

impl Command for ProbeCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let python = PythonInterpreter::new(locate_interpreter(
            self.python.as_deref(),
            &self.path_entries,
        )?);
        tracing::debug!("Probing interpreter at {}", python.path().display());

        let report = EnvironmentProbe::new().run(&python, &python)?;

        let rendered = match self.format {
            OutputFormat::Text => report.render_text(),
            OutputFormat::Json => format!("{}\n", report.render_json()?),
        };
        out.write_all(rendered.as_bytes())
            .and_then(|()| out.flush())
            .context("Failed to write report to stdout")?;

        Ok(CommandResult::success())
    }
}
