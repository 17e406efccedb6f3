//! Gather output with `writev(2)` and scatter input with `readv(2)`.

use std::fs::OpenOptions;
use std::io::{IoSlice, IoSliceMut, Seek, SeekFrom};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use iolab_core::responses::VectoredReport;
use nix::sys::uio::{readv, writev};

use crate::error::{Result, errno, syscall};

pub const DEFAULT_SEGMENTS: [&str; 3] = [
    "First sentence: Hello.\n",
    "Second sentence: I love Linux.\n",
    "Third sentence: Goodbye.\n",
];

/// Write every segment with one `writev`, rewind, and `readv` the file back
/// into one buffer per segment, each sized to its segment.
///
/// If `readv` comes back short the later buffers are truncated to what
/// actually arrived.
///
/// # Errors
///
/// Labelled `open`, `writev`, `lseek` or `readv`.
pub fn gather_scatter(path: &Path, segments: &[&str]) -> Result<VectoredReport> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
        .map_err(syscall("open"))?;

    let iov_write: Vec<IoSlice<'_>> = segments
        .iter()
        .map(|segment| IoSlice::new(segment.as_bytes()))
        .collect();
    let bytes_written = writev(&file, &iov_write).map_err(errno("writev"))?;
    tracing::debug!(segments = segments.len(), bytes_written, "writev");

    file.seek(SeekFrom::Start(0)).map_err(syscall("lseek"))?;

    let mut buffers: Vec<Vec<u8>> = segments
        .iter()
        .map(|segment| vec![0u8; segment.len()])
        .collect();
    let bytes_read = {
        let mut iov_read: Vec<IoSliceMut<'_>> = buffers
            .iter_mut()
            .map(|buffer| IoSliceMut::new(buffer))
            .collect();
        readv(&file, &mut iov_read).map_err(errno("readv"))?
    };
    tracing::debug!(bytes_read, "readv");

    let mut remaining = bytes_read;
    for buffer in &mut buffers {
        let filled = remaining.min(buffer.len());
        buffer.truncate(filled);
        remaining -= filled;
    }

    Ok(VectoredReport {
        path: path.display().to_string(),
        bytes_written,
        bytes_read,
        buffers: buffers
            .into_iter()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .collect(),
    })
}
