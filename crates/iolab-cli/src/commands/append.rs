use iolab_config::IoLabConfig;
use iolab_core::enums::Durability;
use iolab_io::append::append_message;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AppendArgs;
use crate::commands::file_or;
use crate::output::output;

/// Handle `iolab append`.
pub fn handle(args: &AppendArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let durability = Durability::from(args.sync);
    let path = file_or(args.file.as_deref(), &config.files.log);
    let message = args
        .message
        .as_deref()
        .unwrap_or_else(|| durability.default_message());

    let report = append_message(&path, message.as_bytes(), durability)?;
    output(&report, flags.format)
}
