use std::time::Duration;

use iolab_config::IoLabConfig;
use iolab_io::zerocopy::{ZeroCopyOptions, run_zerocopy_demo};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ZeroCopyArgs;
use crate::commands::file_or;
use crate::output::output;

/// Handle `iolab zerocopy`.
pub fn handle(args: &ZeroCopyArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = &config.zerocopy;
    let options = ZeroCopyOptions {
        file_size: args.file_size.unwrap_or(settings.file_size),
        writer_stagger: Duration::from_millis(settings.writer_stagger_ms),
        preview_len: settings.preview_len,
        ..ZeroCopyOptions::new(
            file_or(args.file.as_deref(), &config.files.zerocopy),
            file_or(args.output.as_deref(), &config.files.zerocopy_output),
        )
    };

    let report = run_zerocopy_demo(&options)?;
    output(&report, flags.format)
}
