use iolab_config::IoLabConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: Commands,
    config: &IoLabConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Create(args) => commands::create::handle(&args, flags),
        Commands::Read(args) => commands::read::handle(&args, config, flags),
        Commands::Select(args) => commands::select::handle(&args, config, flags),
        Commands::Fifo(args) => commands::fifo::handle(&args, config, flags),
        Commands::Append(args) => commands::append::handle(&args, config, flags),
        Commands::Record(args) => commands::record::handle(&args, config, flags),
        Commands::Eof(args) => commands::eof::handle(&args, config, flags),
        Commands::StreamLock(args) => commands::stream_lock::handle(&args, config, flags),
        Commands::Vectored(args) => commands::vectored::handle(&args, config, flags),
        Commands::Zerocopy(args) => commands::zerocopy::handle(&args, config, flags),
    }
}
