use iolab_io::create::{DEFAULT_MODE, create_file};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::output::output;

/// Handle `iolab create`.
pub fn handle(args: &CreateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = create_file(&args.path, args.mode.unwrap_or(DEFAULT_MODE))?;
    output(&report, flags.format)
}
