use iolab_config::IoLabConfig;
use iolab_core::record::Pirate;
use iolab_io::record::round_trip;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RecordArgs;
use crate::commands::file_or;
use crate::output::output;

/// Handle `iolab record`.
pub fn handle(args: &RecordArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = file_or(args.file.as_deref(), &config.files.record);
    let report = round_trip(&path, &pirate_from(args))?;
    if !report.verbatim {
        anyhow::bail!("record in {} did not read back verbatim", report.path);
    }
    output(&report, flags.format)
}

/// Blackbeard, with any field given on the command line replaced.
fn pirate_from(args: &RecordArgs) -> Pirate {
    let blackbeard = Pirate::blackbeard();
    Pirate {
        name: args.name.clone().unwrap_or(blackbeard.name),
        booty: args.booty.unwrap_or(blackbeard.booty),
        beard_len: args.beard_len.unwrap_or(blackbeard.beard_len),
    }
}
