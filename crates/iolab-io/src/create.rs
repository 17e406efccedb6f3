//! `creat(2)`: create or truncate a file and close it straight away.

use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use iolab_core::responses::CreateReport;

use crate::error::{Result, syscall};

/// Permission bits used when the caller does not pick any.
pub const DEFAULT_MODE: u32 = 0o644;

/// `O_WRONLY | O_CREAT | O_TRUNC` with `mode`, which is exactly `creat`.
///
/// # Errors
///
/// Returns [`crate::IoError::Syscall`] labelled `creat`.
pub fn create_file(path: &Path, mode: u32) -> Result<CreateReport> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
        .map_err(syscall("creat"))?;
    drop(file);

    tracing::debug!(path = %path.display(), mode = format_args!("{mode:o}"), "created file");
    Ok(CreateReport {
        path: path.display().to_string(),
        mode,
    })
}
