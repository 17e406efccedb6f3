use std::io::Write;
use std::time::Duration;

use iolab_config::IoLabConfig;
use iolab_core::responses::LockEvent;
use iolab_io::stream_lock::{StreamLockOptions, run_stream_lock_demo};

use crate::cli::root_commands::StreamLockArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::file_or;
use crate::output::output;

/// Handle `iolab stream-lock`. Text mode narrates each thread as it runs.
pub fn handle(
    args: &StreamLockArgs,
    config: &IoLabConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let settings = &config.stream_lock;
    let options = StreamLockOptions {
        messages: args.messages.unwrap_or(settings.messages),
        write_delay: Duration::from_millis(settings.write_delay_ms),
        read_delay: Duration::from_millis(settings.read_delay_ms),
        startup_delay: Duration::from_millis(settings.startup_delay_ms),
        ..StreamLockOptions::new(file_or(args.file.as_deref(), &config.files.shared))
    };

    let report = if flags.format == OutputFormat::Text {
        println!("=== flockfile/funlockfile example ===");
        println!("Threads 1 and 2 write to the shared file.");
        println!("Thread 3 wants to read it and waits while a writer holds the lock.\n");
        run_stream_lock_demo(&options, &print_event)?
    } else {
        run_stream_lock_demo(&options, &|_| {})?
    };
    output(&report, flags.format)
}

fn print_event(event: &LockEvent) {
    let mut stdout = std::io::stdout().lock();
    if let Err(error) = writeln!(stdout, "{event}") {
        tracing::warn!(%error, "failed to print thread event");
    }
}
