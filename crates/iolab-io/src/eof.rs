//! Byte-at-a-time stream copy that tells end of file apart from a read error.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use iolab_core::responses::EofReport;

use crate::error::{Result, syscall};

/// Copy `path` into `sink` one byte at a time through a buffered reader.
///
/// Returning `Ok` means the reader hit end of file; a read error surfaces as
/// `fgetc` instead of being mistaken for EOF.
///
/// # Errors
///
/// `fopen`, `fgetc`, or `putchar` when the sink rejects a byte.
pub fn copy_until_eof<W: Write>(path: &Path, sink: &mut W) -> Result<EofReport> {
    let file = File::open(path).map_err(syscall("fopen"))?;
    let reader = BufReader::new(file);

    let mut bytes_copied = 0u64;
    for byte in reader.bytes() {
        let byte = byte.map_err(syscall("fgetc"))?;
        sink.write_all(&[byte]).map_err(syscall("putchar"))?;
        bytes_copied += 1;
    }
    sink.flush().map_err(syscall("putchar"))?;

    tracing::debug!(path = %path.display(), bytes_copied, "reached end of file");
    Ok(EofReport {
        path: path.display().to_string(),
        bytes_copied,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn copies_every_byte() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("data");
        let content = b"line one\nline two\n\0binary\xff";
        std::fs::write(&path, content).expect("seed file");

        let mut sink = Vec::new();
        let report = copy_until_eof(&path, &mut sink).expect("copy");

        assert_eq!(sink, content);
        assert_eq!(report.bytes_copied, content.len() as u64);
    }

    #[test]
    fn empty_file_reaches_eof_immediately() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("empty");
        std::fs::write(&path, b"").expect("seed file");

        let mut sink = Vec::new();
        let report = copy_until_eof(&path, &mut sink).expect("copy");

        assert!(sink.is_empty());
        assert_eq!(report.bytes_copied, 0);
    }

    #[test]
    fn directory_is_a_read_error_not_eof() {
        let temp = tempfile::tempdir().expect("tempdir should create");

        let mut sink = Vec::new();
        let error = copy_until_eof(temp.path(), &mut sink).expect_err("should fail");

        assert_eq!(error.op(), Some("fgetc"));
    }
}
