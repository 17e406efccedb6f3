//! Fill-the-buffer read loop over a blocking or `O_NONBLOCK` descriptor.

use std::fs::OpenOptions;
use std::io::{self, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use iolab_core::enums::ReadMode;
use iolab_core::responses::ReadReport;
use nix::fcntl::OFlag;

use crate::buffer;
use crate::error::{IoError, Result, syscall};

/// Default size of the single read buffer.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Read `path` into one buffer of `capacity` bytes.
///
/// Keeps calling `read` until the buffer is full or `read` returns 0. A
/// failing `read` ends the loop but does not fail the call: whatever was
/// gathered is still reported, with the error in `interrupted_by`.
///
/// # Errors
///
/// Open failures, and [`iolab_core::errors::CoreError::Validation`] when a
/// `capacity`-byte buffer cannot be allocated. In [`ReadMode::NonBlocking`] an interrupted open is
/// [`IoError::OpenInterrupted`] and `EAGAIN` is [`IoError::NotReady`].
pub fn read_to_capacity(path: &Path, capacity: usize, mode: ReadMode) -> Result<ReadReport> {
    let mut options = OpenOptions::new();
    options.read(true);
    if mode == ReadMode::NonBlocking {
        options.custom_flags(OFlag::O_NONBLOCK.bits());
    }
    let mut file = options
        .open(path)
        .map_err(|error| classify_open_error(mode, error))?;

    let mut buf = buffer::zeroed(capacity)?;
    let mut filled = 0;
    let mut interrupted_by = None;
    while filled < capacity {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "read failed; keeping {filled} bytes");
                interrupted_by = Some(format!("read: {error}"));
                break;
            }
        }
    }
    buf.truncate(filled);

    Ok(ReadReport {
        path: path.display().to_string(),
        mode,
        capacity,
        bytes_read: filled,
        content: String::from_utf8_lossy(&buf).into_owned(),
        bytes: buf,
        interrupted_by,
    })
}

fn classify_open_error(mode: ReadMode, error: io::Error) -> IoError {
    match (mode, error.kind()) {
        (ReadMode::NonBlocking, io::ErrorKind::Interrupted) => IoError::OpenInterrupted,
        (ReadMode::NonBlocking, io::ErrorKind::WouldBlock) => IoError::NotReady,
        _ => syscall("open")(error),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::OpenOptions;

    use iolab_core::errors::CoreError;
    use nix::sys::stat::Mode;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ReadMode::Blocking)]
    #[case(ReadMode::NonBlocking)]
    fn reads_whole_small_file(#[case] mode: ReadMode) {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("input.txt");
        std::fs::write(&path, "hello world\n").expect("seed file");

        let report = read_to_capacity(&path, DEFAULT_CAPACITY, mode).expect("read");

        assert_eq!(report.bytes_read, 12);
        assert_eq!(report.content, "hello world\n");
        assert_eq!(report.interrupted_by, None);
    }

    #[test]
    fn stops_when_buffer_is_full() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("big.bin");
        std::fs::write(&path, vec![b'a'; 4000]).expect("seed file");

        let report = read_to_capacity(&path, 1024, ReadMode::Blocking).expect("read");

        assert_eq!(report.bytes_read, 1024);
        assert_eq!(report.content.len(), 1024);
    }

    #[test]
    fn zero_capacity_reads_nothing() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("input.txt");
        std::fs::write(&path, "data").expect("seed file");

        let report = read_to_capacity(&path, 0, ReadMode::Blocking).expect("read");

        assert_eq!(report.bytes_read, 0);
        assert!(report.content.is_empty());
    }

    #[test]
    fn non_utf8_bytes_are_kept_verbatim() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("latin1.bin");
        std::fs::write(&path, [b'a', 0xff, 0xfe, b'b']).expect("seed file");

        let report = read_to_capacity(&path, DEFAULT_CAPACITY, ReadMode::Blocking).expect("read");

        assert_eq!(report.bytes_read, 4);
        assert_eq!(report.bytes, [b'a', 0xff, 0xfe, b'b']);
        assert_eq!(report.content, "a\u{fffd}\u{fffd}b");
    }

    #[test]
    fn unallocatable_capacity_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("input.txt");
        std::fs::write(&path, "data").expect("seed file");

        let error = read_to_capacity(&path, usize::MAX, ReadMode::Blocking)
            .expect_err("should not allocate");

        assert!(matches!(error, IoError::Core(CoreError::Validation(_))));
    }

    #[test]
    fn missing_file_reports_open() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let error = read_to_capacity(&temp.path().join("absent"), 16, ReadMode::NonBlocking)
            .expect_err("should fail");

        assert_eq!(error.op(), Some("open"));
        assert_eq!(error.kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn nonblocking_fifo_without_writer_reads_eof() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("pipe");
        nix::unistd::mkfifo(&path, Mode::from_bits_truncate(0o600)).expect("mkfifo");

        let report = read_to_capacity(&path, 16, ReadMode::NonBlocking).expect("read");

        assert_eq!(report.bytes_read, 0);
        assert_eq!(report.interrupted_by, None);
    }

    #[test]
    fn nonblocking_fifo_with_idle_writer_stops_on_eagain() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("pipe");
        nix::unistd::mkfifo(&path, Mode::from_bits_truncate(0o600)).expect("mkfifo");
        // Holding both ends keeps a writer attached without blocking the open.
        let _holder = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .expect("hold fifo open");

        let report = read_to_capacity(&path, 16, ReadMode::NonBlocking).expect("read");

        assert_eq!(report.bytes_read, 0);
        let reason = report.interrupted_by.expect("read should be cut short");
        assert!(reason.starts_with("read:"));
    }
}
