use std::io::Write;
use std::time::Duration;

use iolab_config::IoLabConfig;
use iolab_io::fifo::{Fifo, FifoOptions};

use crate::cli::root_commands::FifoArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `iolab fifo`.
pub fn handle(args: &FifoArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mode = args.mode.unwrap_or(config.fifo.mode);
    let max_wait_ms = match args.max_wait_ms {
        Some(0) => None,
        Some(ms) => Some(ms),
        None => config.fifo.max_wait_ms(),
    };
    let options = FifoOptions {
        poll_interval: Duration::from_millis(config.fifo.poll_interval_ms),
        max_wait: max_wait_ms.map(Duration::from_millis),
        ..FifoOptions::default()
    };

    let mut fifo = Fifo::open_or_create(&args.path, mode)?;
    let text = flags.format == OutputFormat::Text;
    if text {
        println!("Waiting for data on {}...", args.path.display());
    }

    let report = fifo.wait_for_message(&options, || {
        if text {
            let mut stdout = std::io::stdout().lock();
            if let Err(error) = stdout.write_all(b".").and_then(|()| stdout.flush()) {
                tracing::debug!(%error, "failed to print progress dot");
            }
        }
    })?;
    output(&report, flags.format)
}
