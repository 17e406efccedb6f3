use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `iolab` binary.
#[derive(Debug, Parser)]
#[command(name = "iolab", version, about = "iolab - POSIX I/O mechanisms, one command each")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra config file, layered above the project config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}
