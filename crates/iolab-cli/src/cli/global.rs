use std::path::PathBuf;

use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// The demo's human-readable output.
    Text,
    /// Pretty-printed JSON report.
    Json,
    /// Single-line JSON report.
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}
