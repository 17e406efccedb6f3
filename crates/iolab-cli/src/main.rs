use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("{}", error_line(&error));
        std::process::exit(1);
    }
}

fn error_line(error: &anyhow::Error) -> String {
    error.downcast_ref::<commands::PlainMessage>().map_or_else(
        || format!("iolab error: {error:#}"),
        ToString::to_string,
    )
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;

    commands::dispatch::dispatch(cli.command, &config, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("IOLAB_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // stdout carries demo output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::error_line;
    use crate::commands::PlainMessage;

    #[test]
    fn plain_messages_print_verbatim() {
        let error = anyhow::Error::from(PlainMessage("No input available."));
        assert_eq!(error_line(&error), "No input available.");
    }

    #[test]
    fn other_errors_carry_prefix_and_chain() {
        let error = anyhow::anyhow!("missing").context("failed to load iolab configuration");
        assert_eq!(
            error_line(&error),
            "iolab error: failed to load iolab configuration: missing"
        );
    }
}
