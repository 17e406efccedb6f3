use std::io::Write;
use std::path::Path;

use iolab_config::IoLabConfig;
use iolab_io::eof::copy_until_eof;

use crate::cli::root_commands::EofArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::file_or;
use crate::output::write_report;

/// Handle `iolab eof`. File bytes reach stdout only in text mode.
pub fn handle(args: &EofArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let path = file_or(args.file.as_deref(), &config.files.record);
    copy_and_report(&path, &mut std::io::stdout().lock(), flags.format)
}

fn copy_and_report<W: Write>(path: &Path, out: &mut W, format: OutputFormat) -> anyhow::Result<()> {
    let report = match format {
        OutputFormat::Text => copy_until_eof(path, out)?,
        OutputFormat::Json | OutputFormat::Raw => copy_until_eof(path, &mut std::io::sink())?,
    };
    write_report(out, &report, format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn text_prints_file_then_eof_line() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("data");
        std::fs::write(&path, "ahoy").expect("seed file");

        let mut out = Vec::new();
        copy_and_report(&path, &mut out, OutputFormat::Text).expect("copy");

        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "ahoy\n[INFO] reached EOF (normal termination)\n"
        );
    }

    #[test]
    fn json_leaves_file_bytes_out() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("data");
        std::fs::write(&path, "ahoy").expect("seed file");

        let mut out = Vec::new();
        copy_and_report(&path, &mut out, OutputFormat::Raw).expect("copy");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["bytes_copied"], 4);
    }
}
