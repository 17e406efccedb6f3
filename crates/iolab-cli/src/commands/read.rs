use std::io::Write;

use iolab_config::IoLabConfig;
use iolab_core::enums::ReadMode;
use iolab_core::responses::ReadReport;
use iolab_io::read::read_to_capacity;

use crate::cli::root_commands::ReadArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::write_report;

/// Handle `iolab read`.
pub fn handle(args: &ReadArgs, config: &IoLabConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mode = if args.nonblocking {
        ReadMode::NonBlocking
    } else {
        ReadMode::Blocking
    };
    let capacity = args.capacity.unwrap_or(config.read.capacity);
    let report = read_to_capacity(&args.path, capacity, mode)?;

    write_read(&mut std::io::stdout().lock(), &report, flags.format)
}

fn write_read<W: Write>(out: &mut W, report: &ReadReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        // Exactly the bytes read, without a trailing newline.
        OutputFormat::Text => {
            out.write_all(&report.bytes)?;
            out.flush()?;
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => write_report(out, report, format),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn read_file(contents: &[u8]) -> ReadReport {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("input");
        std::fs::write(&path, contents).expect("seed file");
        read_to_capacity(&path, 1024, ReadMode::Blocking).expect("read")
    }

    #[test]
    fn text_is_the_raw_bytes_without_newline() {
        let report = read_file(&[b'a', 0xff, 0xfe, b'b']);

        let mut out = Vec::new();
        write_read(&mut out, &report, OutputFormat::Text).expect("write");

        assert_eq!(out, [b'a', 0xff, 0xfe, b'b']);
    }

    #[test]
    fn json_carries_the_lossy_content() {
        let report = read_file(b"hi\n");

        let mut out = Vec::new();
        write_read(&mut out, &report, OutputFormat::Raw).expect("write");

        let line = String::from_utf8(out).expect("utf-8 json");
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).expect("json");
        assert_eq!(value["content"], "hi\n");
        assert_eq!(value["bytes_read"], 3);
        assert!(line.ends_with('\n'));
    }
}
