use std::path::{Path, PathBuf};

pub mod append;
pub mod create;
pub mod dispatch;
pub mod eof;
pub mod fifo;
pub mod read;
pub mod record;
pub mod select;
pub mod stream_lock;
pub mod vectored;
pub mod zerocopy;

/// A failure whose message is the whole line printed to stderr, without the
/// `iolab error:` prefix.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PlainMessage(pub &'static str);

/// The path given on the command line, else the configured default.
pub(crate) fn file_or(explicit: Option<&Path>, configured: &str) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(configured), Path::to_path_buf)
}
