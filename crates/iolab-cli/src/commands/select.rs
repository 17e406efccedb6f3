use std::io::{Read, Write};
use std::os::fd::AsFd;
use std::time::Duration;

use iolab_config::IoLabConfig;
use iolab_core::responses::{Readiness, SelectReport};
use iolab_io::select::wait_readable;

use crate::cli::root_commands::SelectArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::PlainMessage;
use crate::output::write_report;

const NO_INPUT: &str = "No input available.";

/// Handle `iolab select`: wait on stdin.
pub fn handle(args: &SelectArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let timeout_secs = args.timeout.unwrap_or(config.select.timeout_secs);
    let capacity = args.capacity.unwrap_or(config.select.capacity);

    wait_and_report(
        &mut std::io::stdin(),
        &mut std::io::stdout().lock(),
        Duration::from_secs(timeout_secs),
        capacity,
        flags.format,
    )
}

fn wait_and_report<S, W>(
    source: &mut S,
    out: &mut W,
    timeout: Duration,
    capacity: usize,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    S: Read + AsFd,
    W: Write,
{
    let readiness = wait_readable(source, timeout, capacity)?;
    write_readiness(out, timeout.as_secs(), readiness, format)
}

/// `NotReady` writes nothing and fails with the bare "No input available."
fn write_readiness<W: Write>(
    out: &mut W,
    timeout_secs: u64,
    readiness: Readiness,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if readiness == Readiness::NotReady {
        return Err(PlainMessage(NO_INPUT).into());
    }
    write_report(
        out,
        &SelectReport {
            timeout_secs,
            readiness,
        },
        format,
    )
}

#[cfg(test)]
mod tests {
    use std::os::unix::net::UnixStream;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ready_input_is_echoed_with_count() {
        let (mut tx, mut rx) = UnixStream::pair().expect("socketpair");
        tx.write_all(b"ahoy").expect("write");

        let mut out = Vec::new();
        wait_and_report(&mut rx, &mut out, Duration::from_secs(1), 1024, OutputFormat::Text)
            .expect("select");

        assert_eq!(out, b"Read 4 bytes: ahoy\n");
    }

    #[test]
    fn timeout_reports_elapsed_seconds() {
        let (_tx, mut rx) = UnixStream::pair().expect("socketpair");

        let mut out = Vec::new();
        wait_and_report(&mut rx, &mut out, Duration::from_millis(10), 1024, OutputFormat::Text)
            .expect("select");

        assert_eq!(out, b"0 seconds elapsed.\n");
    }

    #[test]
    fn not_ready_fails_with_bare_message() {
        let mut out = Vec::new();
        let error = write_readiness(&mut out, 5, Readiness::NotReady, OutputFormat::Json)
            .expect_err("not ready is a failure");

        assert!(out.is_empty());
        let message = error.downcast_ref::<PlainMessage>().expect("plain message");
        assert_eq!(message.to_string(), "No input available.");
    }
}
