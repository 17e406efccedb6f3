//! Append-only writes with the four durability variants.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use iolab_core::enums::Durability;
use iolab_core::responses::AppendReport;
use nix::fcntl::OFlag;

use crate::error::{Result, syscall};

const LOG_MODE: u32 = 0o644;

/// Append `message` to `path` with a single `write`, then make it durable
/// according to `durability`.
///
/// `fsync` is `File::sync_all` and `fdatasync` is `File::sync_data`.
///
/// # Errors
///
/// Labelled `open`, `write`, `fsync` or `fdatasync`.
pub fn append_message(path: &Path, message: &[u8], durability: Durability) -> Result<AppendReport> {
    let mut file = open_for_append(path, durability).map_err(syscall("open"))?;

    let bytes_written = file.write(message).map_err(syscall("write"))?;

    match durability {
        Durability::Fsync => file.sync_all().map_err(syscall("fsync"))?,
        Durability::Fdatasync => file.sync_data().map_err(syscall("fdatasync"))?,
        Durability::None | Durability::OSync => {}
    }

    tracing::debug!(path = %path.display(), %durability, bytes_written, "appended");
    Ok(AppendReport {
        path: path.display().to_string(),
        durability,
        bytes_written,
    })
}

/// `O_WRONLY | O_CREAT | O_APPEND`, plus `O_SYNC` when asked for.
fn open_for_append(path: &Path, durability: Durability) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.append(true).create(true).mode(LOG_MODE);
    if durability.opens_synchronous() {
        options.custom_flags(OFlag::O_SYNC.bits());
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use std::os::fd::AsRawFd;

    use nix::fcntl::{FcntlArg, fcntl};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Durability::None)]
    #[case(Durability::Fsync)]
    #[case(Durability::Fdatasync)]
    #[case(Durability::OSync)]
    fn appends_without_clobbering(#[case] durability: Durability) {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("log.txt");
        std::fs::write(&path, "existing\n").expect("seed log");

        let message = durability.default_message().as_bytes();
        let report = append_message(&path, message, durability).expect("append");

        assert_eq!(report.bytes_written, message.len());
        assert_eq!(report.durability, durability);
        let content = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(content, format!("existing\n{}", durability.default_message()));
    }

    #[test]
    fn creates_missing_log() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("log.txt");

        append_message(&path, b"one\n", Durability::None).expect("first append");
        append_message(&path, b"two\n", Durability::Fsync).expect("second append");

        assert_eq!(std::fs::read_to_string(&path).expect("read log"), "one\ntwo\n");
    }

    #[rstest]
    #[case(Durability::None, false)]
    #[case(Durability::Fsync, false)]
    #[case(Durability::OSync, true)]
    fn o_sync_flag_follows_durability(#[case] durability: Durability, #[case] expect_sync: bool) {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let file = open_for_append(&temp.path().join("log.txt"), durability).expect("open");

        let flags = fcntl(file.as_raw_fd(), FcntlArg::F_GETFL).expect("F_GETFL");
        let flags = OFlag::from_bits_truncate(flags);

        assert!(flags.contains(OFlag::O_APPEND));
        assert_eq!(flags.contains(OFlag::O_SYNC), expect_sync);
    }

    #[test]
    fn open_failure_is_labelled() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let error = append_message(&temp.path().join("nope/log.txt"), b"x", Durability::None)
            .expect_err("should fail");
        assert_eq!(error.op(), Some("open"));
    }
}
