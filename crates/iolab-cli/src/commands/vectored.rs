use iolab_config::IoLabConfig;
use iolab_io::vectored::{DEFAULT_SEGMENTS, gather_scatter};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::VectoredArgs;
use crate::commands::file_or;
use crate::output::output;

/// Handle `iolab vectored`.
pub fn handle(args: &VectoredArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = file_or(args.file.as_deref(), &config.files.vectored);
    let report = gather_scatter(&path, &DEFAULT_SEGMENTS)?;
    output(&report, flags.format)
}
