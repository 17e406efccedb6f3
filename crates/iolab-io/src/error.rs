use std::io;

use iolab_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// A system call failed. Renders like `perror(op)` once the source is
    /// appended (`{:#}` in anyhow).
    #[error("{op}")]
    Syscall {
        op: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("open interrupted by signal")]
    OpenInterrupted,
    #[error("File is not ready for reading")]
    NotReady,
    #[error("{thread} thread panicked")]
    ThreadPanicked { thread: String },
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// The syscall label, for syscall failures.
    #[must_use]
    pub const fn op(&self) -> Option<&'static str> {
        match self {
            Self::Syscall { op, .. } => Some(op),
            _ => None,
        }
    }

    /// Underlying OS error kind, for syscall failures.
    #[must_use]
    pub fn kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Syscall { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Label an `io::Error` with the syscall that produced it.
pub(crate) fn syscall(op: &'static str) -> impl FnOnce(io::Error) -> IoError {
    move |source| IoError::Syscall { op, source }
}

/// Same as [`syscall`] for nix's `Errno`.
pub(crate) fn errno(op: &'static str) -> impl FnOnce(nix::errno::Errno) -> IoError {
    move |errno| IoError::Syscall {
        op,
        source: io::Error::from(errno),
    }
}
